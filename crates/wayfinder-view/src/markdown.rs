//! Optional markdown pre-processing

/// Converts markdown source to HTML
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, source: &str) -> String;
}

/// CommonMark plus tables, strikethrough and task lists (pulldown-cmark)
#[cfg(feature = "markdown")]
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMark;

#[cfg(feature = "markdown")]
impl MarkdownRenderer for CommonMark {
    fn render(&self, source: &str) -> String {
        use pulldown_cmark::{html, Options, Parser};

        let options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(source, options);

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(all(test, feature = "markdown"))]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_emphasis() {
        let html = CommonMark.render("# Title\n\nSome *text*");
        assert_eq!(html, "<h1>Title</h1>\n<p>Some <em>text</em></p>\n");
    }

    #[test]
    fn test_placeholders_survive() {
        let html = CommonMark.render("Hello {{name}}");
        assert_eq!(html, "<p>Hello {{name}}</p>\n");
    }
}
