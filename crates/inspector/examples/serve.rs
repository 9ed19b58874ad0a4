//! Serve a small view tree and report one fake request
//!
//! Connect an inspector client to ws://127.0.0.1:9229, send
//! `Network.enable`, and the simulated request shows up a few seconds later.

use inspector::domains::network::{RequestDescriptor, ResponseDescriptor};
use inspector::{share_tree, InspectorConfig, InspectorServer};
use inspector_dom::ViewArena;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let mut arena = ViewArena::new();
    let frame = arena.add_view("Frame");
    let page = arena.add_view("Page");
    let label = arena.add_view("Label");
    arena.set_root(frame)?;
    arena.append_child(frame, page)?;
    arena.append_child(page, label)?;
    arena.set_view_property(label, "text", "Hello, inspector")?;
    arena.set_style_property(label, "color", "#336699")?;
    arena.set_style_property(label, "fontSize", 18.0)?;

    let server = InspectorServer::bind(InspectorConfig::default(), share_tree(arena)).await?;
    println!("Listening on ws://{}", server.local_addr()?);
    let context = server.context();
    let serving = tokio::spawn(server.run());

    // Wait for a client to enable the Network domain
    let tracker = loop {
        if let Some(tracker) = context.active_network() {
            break tracker;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
    };

    let request = tracker.create();
    let url = "https://example.com/greeting.json".to_string();
    request.request_will_be_sent(&RequestDescriptor {
        url: url.clone(),
        method: "GET".to_string(),
        ..Default::default()
    });
    request.response_received(&ResponseDescriptor {
        url,
        status: 200,
        status_text: "OK".to_string(),
        mime_type: "application/json".to_string(),
        ..Default::default()
    });
    request.set_data(br#"{"greeting":"hello"}"#.to_vec());
    request.loading_finished();
    println!("Reported request {}", request.request_id());

    serving.await??;
    Ok(())
}
