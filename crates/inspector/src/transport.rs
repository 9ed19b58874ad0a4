//! WebSocket transport
//!
//! Accepts inspector clients and gives each connection its own session over
//! the server's shared context and view tree.

use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast::error::RecvError;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use inspector_dom::ViewTree;

use crate::config::InspectorConfig;
use crate::domains::{SessionContext, SharedTree};
use crate::error::Result;
use crate::session::InspectorSession;

pub struct InspectorServer<T> {
    listener: TcpListener,
    config: InspectorConfig,
    context: Arc<SessionContext>,
    tree: SharedTree<T>,
}

impl<T: ViewTree + Send + 'static> InspectorServer<T> {
    /// Listen on `config.endpoint`
    pub async fn bind(config: InspectorConfig, tree: SharedTree<T>) -> Result<Self> {
        let (host, port) = config.bind_address()?;
        let listener = TcpListener::bind((host.as_str(), port)).await?;
        tracing::info!("Inspector listening on {}", listener.local_addr()?);

        Ok(Self {
            context: Arc::new(SessionContext::from_config(&config)),
            listener,
            config,
            tree,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Shared by every connection. Hosts reach the enabled tracker here.
    pub fn context(&self) -> Arc<SessionContext> {
        Arc::clone(&self.context)
    }

    /// Accept connections until the listener fails
    pub async fn run(self) -> Result<()> {
        loop {
            let (stream, peer) = self.listener.accept().await?;
            tracing::info!(%peer, "inspector client connected");

            let session = InspectorSession::with_context(
                self.config.clone(),
                Arc::clone(&self.tree),
                Arc::clone(&self.context),
            );
            tokio::spawn(async move {
                if let Err(e) = serve_connection(stream, session).await {
                    tracing::error!(%peer, "Connection failed: {}", e);
                }
                tracing::info!(%peer, "inspector client disconnected");
            });
        }
    }
}

async fn serve_connection<T: ViewTree + Send + 'static>(
    stream: TcpStream,
    mut session: InspectorSession<T>,
) -> Result<()> {
    let ws_stream = accept_async(stream).await?;
    let (mut sink, mut stream) = ws_stream.split();
    let mut events = session.subscribe();

    let result = loop {
        tokio::select! {
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = session.handle_message(&text);
                        if let Err(e) = sink.send(Message::Text(reply)).await {
                            break Err(e.into());
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break Ok(()),
                    Some(Err(e)) => break Err(e.into()),
                    _ => {}
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        let text = match serde_json::to_string(&event) {
                            Ok(text) => text,
                            Err(e) => {
                                tracing::error!("Failed to encode {}: {}", event.method, e);
                                continue;
                            }
                        };
                        if let Err(e) = sink.send(Message::Text(text)).await {
                            break Err(e.into());
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "event receiver lagged");
                    }
                    Err(RecvError::Closed) => break Ok(()),
                }
            }
        }
    };

    session.close();
    result
}
