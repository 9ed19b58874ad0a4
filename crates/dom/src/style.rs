//! Style inspector - read path for a view's style property set
//!
//! There is no cascade here. "Computed style" means whatever the host
//! reports as set on the view's style object, in enumeration order.

use crate::tree::{self, ViewTree};
use crate::types::{ComputedStyleProperty, NodeId, PropertyOwner};

/// Style properties of the first view with `node_id`
///
/// An unknown id yields an empty list rather than an error.
pub fn computed_style<T: ViewTree + ?Sized>(tree: &T, node_id: NodeId) -> Vec<ComputedStyleProperty> {
    match tree::find_view(tree, node_id) {
        Some(view) => style_properties(tree, &view),
        None => Vec::new(),
    }
}

pub fn style_properties<T: ViewTree + ?Sized>(
    tree: &T,
    view: &T::Handle,
) -> Vec<ComputedStyleProperty> {
    tree::set_properties(tree, view, PropertyOwner::Style)
        .into_iter()
        .map(|(name, value)| ComputedStyleProperty { name, value })
        .collect()
}
