//! Inspector DOM - view tree to protocol node model
//!
//! The host UI toolkit owns the live view hierarchy. This crate reads it
//! through the [`ViewTree`] accessor contract and produces the immutable
//! snapshots an inspector client understands.
//!
//! ## Core Design
//!
//! ```text
//! live views (ViewTree) → snapshot::document → Node (owned, eager)
//!          ↓                                      ↓
//!   NodeRegistry (ids)                   MarkupSerializer / JSON
//! ```
//!
//! Nothing is cached: each query walks the live tree again.

pub mod arena;
pub mod error;
pub mod registry;
pub mod serializer;
pub mod snapshot;
pub mod style;
pub mod tree;
pub mod types;
pub mod utils;

pub use arena::{ViewArena, ViewIndex};
pub use error::{DomError, Result};
pub use registry::NodeRegistry;
pub use serializer::MarkupSerializer;
pub use tree::ViewTree;
pub use types::*;
