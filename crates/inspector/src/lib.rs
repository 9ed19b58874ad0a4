//! Inspector Backend
//!
//! Serves the WebKit Inspector protocol for a native view hierarchy. A
//! connected client (e.g. Safari Web Inspector or a Chromium DevTools
//! frontend) can browse the live view tree as a DOM, read computed styles,
//! and watch network traffic the host reports.
//!
//! # Layout
//!
//! - [`protocol`]: request/response/event envelopes
//! - [`domains`]: the `Network`, `DOM` and `CSS` command handlers
//! - [`dispatcher`]: routes `Domain.command` to a domain, turns failures into
//!   error responses
//! - [`session`]: one client's domains over a shared context
//! - [`transport`]: WebSocket server
//!
//! Hosts plug in their UI through [`inspector_dom::ViewTree`] and report
//! network activity through [`SessionContext::active_network`].

pub mod config;
pub mod dispatcher;
pub mod domains;
pub mod error;
pub mod events;
pub mod protocol;
pub mod session;
pub mod transport;

pub use config::InspectorConfig;
pub use dispatcher::Dispatcher;
pub use domains::{
    share_tree, CssDomain, Domain, DomDomain, NetworkDomain, NetworkRequest, ResourceType,
    SessionContext, SharedTree,
};
pub use error::{InspectorError, Result};
pub use events::EventBus;
pub use protocol::{InspectorEvent, InspectorRequest, InspectorResponse, ProtocolError};
pub use session::InspectorSession;
pub use transport::InspectorServer;
