//! Error types for view-tree access
//!
//! Flat hierarchy. Lookups that miss are usually *not* errors at the
//! protocol level; these surface only where a collaborator refuses work.

use thiserror::Error;

use crate::types::NodeId;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("View index out of range: {0}")]
    ViewNotFound(u32),

    #[error("Unknown property '{property}' on {type_name}")]
    UnknownProperty { type_name: String, property: String },

    #[error("Property '{0}' is read-only")]
    ReadOnlyProperty(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },

    #[error("Appending view {child} under {parent} would create a cycle")]
    Cycle { child: u32, parent: u32 },

    #[error("View {child} already has a parent")]
    AlreadyAttached { child: u32 },
}
