//! Tree snapshotter - live view tree in, protocol `Node` out
//!
//! Every call re-walks the live tree from the topmost view. Nothing is
//! cached between queries, so two snapshots of an unchanged tree compare
//! equal and a snapshot never reflects later mutations.

use crate::tree::{self, ViewTree};
use crate::types::{Node, NodeId, NodeType, PropertyOwner};

/// Snapshot the whole tree, rooted at a `Document` node
///
/// `None` when no UI is attached yet.
pub fn document<T: ViewTree + ?Sized>(tree: &T) -> Option<Node> {
    let root = tree.topmost_view()?;
    Some(materialize(tree, &root, NodeType::Document))
}

/// Snapshot the subtree of the first view whose id matches
pub fn element<T: ViewTree + ?Sized>(tree: &T, node_id: NodeId) -> Option<Node> {
    let view = tree::find_view(tree, node_id)?;
    let node_type = match tree.topmost_view() {
        Some(root) if tree.identity_id(&root) == node_id => NodeType::Document,
        _ => NodeType::Element,
    };
    Some(materialize(tree, &view, node_type))
}

/// Recursively copy one view and its descendants
pub fn materialize<T: ViewTree + ?Sized>(tree: &T, view: &T::Handle, node_type: NodeType) -> Node {
    let mut node = Node::new(tree.identity_id(view), node_type, tree.type_name(view));
    node.child_node_count = tree.child_count(view);

    node.children = tree::child_views(tree, view)
        .iter()
        .map(|child| materialize(tree, child, NodeType::Element))
        .collect();

    node.attributes = attributes(tree, view);
    node
}

/// Flat name/value list: view properties, then style properties
pub fn attributes<T: ViewTree + ?Sized>(tree: &T, view: &T::Handle) -> Vec<String> {
    let mut flat = Vec::new();
    for owner in [PropertyOwner::View, PropertyOwner::Style] {
        for (name, value) in tree::set_properties(tree, view, owner) {
            flat.push(name);
            flat.push(value);
        }
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ViewArena;

    fn sample() -> ViewArena {
        let mut arena = ViewArena::new();
        let frame = arena.add_view("Frame");
        let page = arena.add_view("Page");
        let stack = arena.add_view("StackLayout");
        let label = arena.add_view("Label");
        let button = arena.add_view("Button");

        arena.set_root(frame).unwrap();
        arena.append_child(frame, page).unwrap();
        arena.append_child(page, stack).unwrap();
        arena.append_child(stack, label).unwrap();
        arena.append_child(stack, button).unwrap();

        arena.set_view_property(label, "text", "Hello").unwrap();
        arena.set_view_property(label, "id", "greeting").unwrap();
        arena.set_style_property(label, "color", "#ff0000").unwrap();
        arena.set_style_property(label, "fontSize", 18.0).unwrap();
        arena.set_view_property(button, "text", "Tap").unwrap();
        arena
    }

    #[test]
    fn test_empty_tree_has_no_document() {
        assert!(document(&ViewArena::new()).is_none());
    }

    #[test]
    fn test_document_shape() {
        let arena = sample();
        let root = document(&arena).unwrap();

        assert_eq!(root.node_type, NodeType::Document);
        assert_eq!(root.node_name, "Frame");
        assert_eq!(root.local_name, "Frame");
        assert_eq!(root.child_node_count, 1);
        assert_eq!(root.subtree_size(), 5);

        let stack = &root.children[0].children[0];
        assert_eq!(stack.node_type, NodeType::Element);
        let names: Vec<&str> = stack.children.iter().map(|c| c.node_name.as_str()).collect();
        assert_eq!(names, vec!["Label", "Button"]);
    }

    #[test]
    fn test_attributes_are_flattened_in_order() {
        let arena = sample();
        let root = document(&arena).unwrap();
        let label = &root.children[0].children[0].children[0];

        assert_eq!(
            label.attributes,
            vec!["text", "Hello", "id", "greeting", "color", "#ff0000", "fontSize", "18"]
        );
    }

    #[test]
    fn test_repeated_snapshots_are_equal() {
        let arena = sample();
        let first = document(&arena).unwrap();
        let second = document(&arena).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_snapshot_is_not_live() {
        let mut arena = sample();
        let before = document(&arena).unwrap();
        arena.set_view_property(3, "text", "Changed").unwrap();

        let label_id = arena.node_id_of(3).unwrap();
        assert_eq!(before.find(label_id).unwrap().attr("text"), Some("Hello"));

        let after = document(&arena).unwrap();
        assert_eq!(after.find(label_id).unwrap().attr("text"), Some("Changed"));
        // Ids survive re-snapshotting
        assert_eq!(before.find(label_id).map(|n| n.node_id), Some(label_id));
    }

    #[test]
    fn test_element_snapshot() {
        let arena = sample();
        let button_id = arena.node_id_of(4).unwrap();
        let button = element(&arena, button_id).unwrap();
        assert_eq!(button.node_type, NodeType::Element);
        assert_eq!(button.attr("text"), Some("Tap"));

        let root_id = arena.node_id_of(0).unwrap();
        assert_eq!(element(&arena, root_id).unwrap().node_type, NodeType::Document);
        assert!(element(&arena, 4242).is_none());
    }
}
