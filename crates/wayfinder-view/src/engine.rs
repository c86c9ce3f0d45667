//! Mustache-style substitution
//!
//! Delimiters are an argument of every call, never engine state, so two
//! renders with different delimiters can run side by side.

use crate::error::{Result, ViewError};
use crate::template::Delimiters;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Substitutes parameters into a template string
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &str, params: &Value, delimiters: &Delimiters) -> Result<String>;
}

/// Logic-less mustache subset
///
/// Supported tags:
/// - `{{name}}`, `{{a.b}}`, `{{.}}`: HTML-escaped value
/// - `{{{name}}}`, `{{& name}}`: raw value
/// - `{{#name}}…{{/name}}`: section (lists iterate, objects push context)
/// - `{{^name}}…{{/name}}`: inverted section
/// - `{{! comment}}`
/// - `{{> partial}}`: renders nothing, partials are not loaded
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wayfinder_view::{Delimiters, Mustache, TemplateEngine};
///
/// let html = Mustache
///     .render("Hello {{name}}", &json!({ "name": "X" }), &Delimiters::default())
///     .unwrap();
/// assert_eq!(html, "Hello X");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Mustache;

impl TemplateEngine for Mustache {
    fn render(&self, template: &str, params: &Value, delimiters: &Delimiters) -> Result<String> {
        delimiters.validate()?;
        let nodes = parse(template, delimiters)?;
        let mut out = String::with_capacity(template.len());
        let mut stack = vec![params];
        render_nodes(&nodes, &mut stack, &mut out);
        Ok(out)
    }
}

// ============================================================================
// Parsing
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Var { name: String, escape: bool },
    Section {
        name: String,
        inverted: bool,
        children: Vec<Node>,
    },
}

/// Open section waiting for its closing tag
struct Frame {
    name: String,
    inverted: bool,
    parent: Vec<Node>,
}

fn parse(template: &str, delimiters: &Delimiters) -> Result<Vec<Node>> {
    let open = delimiters.open.as_str();
    let close = delimiters.close.as_str();
    let triple_close = format!("}}{}", close);

    let mut frames: Vec<Frame> = Vec::new();
    let mut current: Vec<Node> = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find(open) {
        if start > 0 {
            current.push(Node::Text(rest[..start].to_string()));
        }
        let after_open = &rest[start + open.len()..];

        // Triple mustache: `{{{name}}}`
        if let Some(inner) = after_open.strip_prefix('{') {
            let end = inner
                .find(triple_close.as_str())
                .ok_or_else(|| unclosed_tag(template, rest))?;
            current.push(Node::Var {
                name: tag_name(&inner[..end])?,
                escape: false,
            });
            rest = &inner[end + triple_close.len()..];
            continue;
        }

        let end = after_open
            .find(close)
            .ok_or_else(|| unclosed_tag(template, rest))?;
        let tag = after_open[..end].trim();
        rest = &after_open[end + close.len()..];

        match tag.chars().next() {
            Some('!') => {}
            Some('>') => debug!(partial = %tag[1..].trim(), "partial tags render nothing"),
            Some('=') => {
                return Err(ViewError::Template(
                    "set-delimiter tags are not supported, pass delimiters in ViewOptions"
                        .to_string(),
                ))
            }
            Some('&') => current.push(Node::Var {
                name: tag_name(&tag[1..])?,
                escape: false,
            }),
            Some(marker @ ('#' | '^')) => {
                frames.push(Frame {
                    name: tag_name(&tag[1..])?,
                    inverted: marker == '^',
                    parent: std::mem::take(&mut current),
                });
            }
            Some('/') => {
                let name = tag_name(&tag[1..])?;
                let frame = frames.pop().ok_or_else(|| {
                    ViewError::Template(format!("closing tag `{}` without open section", name))
                })?;
                if frame.name != name {
                    return Err(ViewError::Template(format!(
                        "section `{}` closed by `{}`",
                        frame.name, name
                    )));
                }
                let children = std::mem::replace(&mut current, frame.parent);
                current.push(Node::Section {
                    name: frame.name,
                    inverted: frame.inverted,
                    children,
                });
            }
            _ => current.push(Node::Var {
                name: tag_name(tag)?,
                escape: true,
            }),
        }
    }

    if !rest.is_empty() {
        current.push(Node::Text(rest.to_string()));
    }

    if let Some(frame) = frames.pop() {
        return Err(ViewError::Template(format!(
            "section `{}` is never closed",
            frame.name
        )));
    }

    Ok(current)
}

fn tag_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ViewError::Template("empty tag".to_string()));
    }
    Ok(name.to_string())
}

fn unclosed_tag(template: &str, rest: &str) -> ViewError {
    let offset = template.len() - rest.len();
    ViewError::Template(format!("unclosed tag at byte {}", offset))
}

// ============================================================================
// Rendering
// ============================================================================

fn render_nodes<'v>(nodes: &[Node], stack: &mut Vec<&'v Value>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var { name, escape } => {
                if let Some(value) = lookup(name, stack) {
                    let text = stringify(value);
                    if *escape {
                        out.push_str(&escape_html(&text));
                    } else {
                        out.push_str(&text);
                    }
                }
            }
            Node::Section {
                name,
                inverted,
                children,
            } => {
                let value = lookup(name, stack);
                let truthy = value.is_some_and(is_truthy);

                if *inverted {
                    if !truthy {
                        render_nodes(children, stack, out);
                    }
                    continue;
                }

                match value {
                    Some(Value::Array(items)) => {
                        for item in items {
                            stack.push(item);
                            render_nodes(children, stack, out);
                            stack.pop();
                        }
                    }
                    Some(value) if truthy => {
                        stack.push(value);
                        render_nodes(children, stack, out);
                        stack.pop();
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Resolves a (possibly dotted) name against the context stack, innermost first
fn lookup<'a>(name: &str, stack: &[&'a Value]) -> Option<&'a Value> {
    if name == "." {
        return stack.last().copied();
    }

    let mut parts = name.split('.');
    let first = parts.next()?;
    let mut value = stack.iter().rev().find_map(|ctx| {
        let ctx: &'a Value = *ctx;
        ctx.get(first)
    })?;

    for part in parts {
        value = value.get(part)?;
    }
    Some(value)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Escapes HTML-special characters plus `/`, backtick and `=`
pub fn escape_html(text: &str) -> String {
    static SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[&<>"'/`=]"#).unwrap());

    SPECIAL
        .replace_all(text, |caps: &regex::Captures| {
            match &caps[0] {
                "&" => "&amp;",
                "<" => "&lt;",
                ">" => "&gt;",
                "\"" => "&quot;",
                "'" => "&#39;",
                "/" => "&#x2F;",
                "`" => "&#x60;",
                _ => "&#x3D;",
            }
            .to_string()
        })
        .into_owned()
}
