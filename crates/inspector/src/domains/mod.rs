//! Protocol Domains
//!
//! Each domain is a named group of commands (`Network`, `DOM`, `CSS`) plus
//! an event sink for the notifications it pushes unprompted.

pub mod css;
pub mod dom;
pub mod network;

pub use css::CssDomain;
pub use dom::DomDomain;
pub use network::{NetworkDomain, NetworkRequest, ResourceType, SessionContext};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{InspectorError, Result};

/// Live view tree shared between the host and the DOM/CSS domains
pub type SharedTree<T> = Arc<Mutex<T>>;

pub fn share_tree<T>(tree: T) -> SharedTree<T> {
    Arc::new(Mutex::new(tree))
}

/// A panicked writer doesn't make the tree unreadable for the inspector
pub(crate) fn lock_tree<T>(tree: &SharedTree<T>) -> MutexGuard<'_, T> {
    tree.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One protocol domain
///
/// Handlers run synchronously on the caller's thread and must not block on
/// I/O. Returning `Ok(Value::Null)` means "no result" and is sent to the
/// client as an empty object.
pub trait Domain: Send {
    /// Protocol domain name, e.g. `"Network"`
    fn name(&self) -> &'static str;

    /// Handle one command (the part after the dot)
    fn handle(&mut self, command: &str, params: Value) -> Result<Value>;
}

/// Decode command params, treating absent params as `{}`
pub(crate) fn parse_params<P: DeserializeOwned>(
    domain: &str,
    command: &str,
    params: Value,
) -> Result<P> {
    let params = match params {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(params).map_err(|e| InspectorError::InvalidParams {
        method: format!("{}.{}", domain, command),
        message: e.to_string(),
    })
}

/// Unknown command error for `domain`
pub(crate) fn unknown_command(domain: &str, command: &str) -> InspectorError {
    InspectorError::UnknownMethod {
        domain: domain.to_string(),
        command: command.to_string(),
    }
}
