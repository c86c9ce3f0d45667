// Example: Headless navigation with template rendering
//
// Route handlers are synchronous, so they queue render jobs on a channel and
// a task renders them into an in-memory document.
//
// To run this example:
//   cargo run -p wayfinder --example headless

use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;
use wayfinder::{
    App, Config, DomNode, MemoryDocument, MemoryHistory, MemoryNode, MemorySource, NavigationEvent,
    ViewOptions,
};

struct RenderJob {
    view: &'static str,
    params: serde_json::Value,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default()?;
    wayfinder::logging::init(&config.logging.level)?;

    let content = MemoryNode::new();
    let document = Arc::new(MemoryDocument::new().with_node("#content", content.clone()));
    let source = MemorySource::new()
        .with_template("/views/home.mst", "<h1>Welcome</h1>")
        .with_template("/views/user.mst", "<h1>User {{id}}</h1>{{#tab}}<p>{{tab}}</p>{{/tab}}")
        .with_template("/views/docs.mst", "# Docs\n\nSection *{{section}}*");

    let history = MemoryHistory::new("/");
    let mut app = App::builder(config)
        .history(history.clone())
        .source(source)
        .document(document)
        .build();

    let (jobs, mut queue) = mpsc::unbounded_channel::<RenderJob>();

    // ========================================================================
    // Routes
    // ========================================================================

    let tx = jobs.clone();
    app.route("/", move |_| {
        let _ = tx.send(RenderJob {
            view: "home",
            params: json!({}),
        });
    })?;

    let tx = jobs.clone();
    app.route("/users/:id", move |params| {
        let _ = tx.send(RenderJob {
            view: "user",
            params: serde_json::to_value(params).unwrap_or_default(),
        });
    })?;

    let tx = jobs;
    app.route("/docs/*", move |_| {
        let _ = tx.send(RenderJob {
            view: "docs",
            params: json!({ "section": "intro" }),
        });
    })?;

    app.on_navigate(|path| println!("navigating to {}", path));

    // ========================================================================
    // Session
    // ========================================================================

    app.start()?;
    app.handle_event(NavigationEvent::link("/users/42"))?;
    app.handle_event(NavigationEvent::link("/docs/getting-started#install"))?;
    app.handle_event(NavigationEvent::link("https://elsewhere.org/"))?;
    app.navigate("/nowhere")?;

    // Handlers ran synchronously above, so every job is already queued
    let views = app.views();
    while let Ok(job) = queue.try_recv() {
        let options = ViewOptions::new().markdown(job.view == "docs");
        views
            .render("#content", job.view, &job.params, &options)
            .await?;
        println!("#content = {}", content.inner_html());
    }

    println!("history:");
    for entry in history.entries() {
        println!("  {} ({})", entry.url, entry.title);
    }

    Ok(())
}
