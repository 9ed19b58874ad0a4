//! Inspector Session
//!
//! One session per connected client. It owns the client's domains, its
//! dispatcher and its event bus. The session context and the view tree are
//! shared with the host and with other sessions.

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast;

use inspector_dom::ViewTree;

use crate::config::InspectorConfig;
use crate::dispatcher::Dispatcher;
use crate::domains::{CssDomain, DomDomain, NetworkDomain, SessionContext, SharedTree};
use crate::events::EventBus;
use crate::protocol::{InspectorEvent, InspectorRequest, InspectorResponse};

pub struct InspectorSession<T> {
    config: InspectorConfig,
    context: Arc<SessionContext>,
    tree: SharedTree<T>,
    events: EventBus,
    network: NetworkDomain,
    dispatcher: Dispatcher,
}

impl<T: ViewTree + Send + 'static> InspectorSession<T> {
    /// Session with a fresh context of its own
    pub fn new(config: InspectorConfig, tree: SharedTree<T>) -> Self {
        let context = Arc::new(SessionContext::from_config(&config));
        Self::with_context(config, tree, context)
    }

    pub fn with_context(
        config: InspectorConfig,
        tree: SharedTree<T>,
        context: Arc<SessionContext>,
    ) -> Self {
        let events = EventBus::with_capacity(config.event_buffer);
        let network = NetworkDomain::new(Arc::clone(&context), events.clone(), &config);

        let mut dispatcher = Dispatcher::new(config.error_history);
        dispatcher.register(Box::new(network.clone()));
        dispatcher.register(Box::new(DomDomain::new(Arc::clone(&tree), events.clone())));
        dispatcher.register(Box::new(CssDomain::new(Arc::clone(&tree), events.clone())));

        tracing::debug!(session = %config.id, "inspector session created");

        Self {
            config,
            context,
            tree,
            events,
            network,
            dispatcher,
        }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Text frame in, response frame out
    pub fn handle_message(&mut self, text: &str) -> String {
        self.dispatcher.handle_message(text)
    }

    pub fn dispatch(&mut self, method: &str, params: Value) -> InspectorResponse {
        self.dispatcher.dispatch(InspectorRequest {
            id: 0,
            method: method.to_string(),
            params: Some(params),
        })
    }

    /// This session's Network tracker, enabled or not
    pub fn network(&self) -> &NetworkDomain {
        &self.network
    }

    pub fn context(&self) -> &Arc<SessionContext> {
        &self.context
    }

    pub fn tree(&self) -> &SharedTree<T> {
        &self.tree
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InspectorEvent> {
        self.events.subscribe()
    }

    pub fn recent_errors(&self) -> Vec<String> {
        self.dispatcher.recent_errors()
    }
}

impl<T> InspectorSession<T> {
    /// Release what the session holds in the shared context
    ///
    /// Idempotent. Dropping the session does the same.
    pub fn close(&self) {
        if self.network.enabled() {
            self.network.disable();
        }
        tracing::debug!(session = %self.config.id, "inspector session closed");
    }
}

impl<T> Drop for InspectorSession<T> {
    fn drop(&mut self) {
        self.close();
    }
}
