//! The live view tree, seen from the inspector
//!
//! The host UI toolkit owns the real hierarchy. All the inspector needs is
//! this accessor contract: enumerate children, enumerate set properties,
//! read and write a property by name, and find the topmost view.

use crate::error::Result;
use crate::types::{NodeId, PropertyOwner, PropertyValue};

/// Accessor contract for a live view hierarchy
///
/// Visitors return `true` to keep going and `false` to stop early.
/// Enumeration order is meaningful: clients diff successive snapshots
/// positionally, so implementations must report children and properties
/// in a stable order.
pub trait ViewTree {
    /// Cheap reference to one live view
    type Handle: Clone;

    /// Root of the hierarchy, `None` before any UI is attached
    fn topmost_view(&self) -> Option<Self::Handle>;

    fn each_child_view(&self, view: &Self::Handle, visit: &mut dyn FnMut(Self::Handle) -> bool);

    /// Enumerate names of properties that currently hold a value
    fn each_set_property(
        &self,
        view: &Self::Handle,
        owner: PropertyOwner,
        visit: &mut dyn FnMut(&str) -> bool,
    );

    /// `None` means the property does not exist on this view
    fn property_value(
        &self,
        view: &Self::Handle,
        owner: PropertyOwner,
        name: &str,
    ) -> Option<PropertyValue>;

    /// Assign a view property by name
    fn set_property(&mut self, view: &Self::Handle, name: &str, value: PropertyValue)
        -> Result<()>;

    fn identity_id(&self, view: &Self::Handle) -> NodeId;

    fn type_name(&self, view: &Self::Handle) -> String;

    fn child_count(&self, view: &Self::Handle) -> usize;
}

/// Collect the direct children of a view in tree order
pub fn child_views<T: ViewTree + ?Sized>(tree: &T, view: &T::Handle) -> Vec<T::Handle> {
    let mut children = Vec::new();
    tree.each_child_view(view, &mut |child| {
        children.push(child);
        true
    });
    children
}

/// Collect (name, stringified value) for every set property of one bag
pub fn set_properties<T: ViewTree + ?Sized>(
    tree: &T,
    view: &T::Handle,
    owner: PropertyOwner,
) -> Vec<(String, String)> {
    let mut names = Vec::new();
    tree.each_set_property(view, owner, &mut |name| {
        names.push(name.to_string());
        true
    });

    names
        .into_iter()
        .map(|name| {
            let value = tree
                .property_value(view, owner, &name)
                .unwrap_or(PropertyValue::Null)
                .to_string();
            (name, value)
        })
        .collect()
}

/// Depth-first, pre-order search of the live tree by identity id
///
/// Starts at the topmost view (inclusive). The first match in traversal
/// order wins; duplicate ids further along are never seen.
pub fn find_view<T: ViewTree + ?Sized>(tree: &T, node_id: NodeId) -> Option<T::Handle> {
    let mut stack = vec![tree.topmost_view()?];

    while let Some(view) = stack.pop() {
        if tree.identity_id(&view) == node_id {
            return Some(view);
        }

        // Reverse so children pop left-to-right
        let children = child_views(tree, &view);
        stack.extend(children.into_iter().rev());
    }

    None
}
