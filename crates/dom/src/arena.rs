//! Arena-backed view tree
//!
//! An in-memory [`ViewTree`] for hosts that mirror their native hierarchy
//! into Rust, and for tests.
//!
//! ```text
//! Arena: Vec<ViewNode>
//!        [View0][View1][View2]...
//!         ↑ 4-byte index, not a pointer
//! ```
//!
//! Views live in the arena from creation, but only get a node id once they
//! are reachable from the root. Detaching a subtree releases its ids.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{DomError, Result};
use crate::registry::NodeRegistry;
use crate::tree::ViewTree;
use crate::types::{NodeId, PropertyOwner, PropertyValue};

/// Index of a view inside the arena
pub type ViewIndex = u32;

/// One view and its two property bags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewNode {
    pub type_name: String,
    pub parent: Option<ViewIndex>,
    pub children: SmallVec<[ViewIndex; 4]>,
    /// Insertion-ordered, so enumeration is stable
    pub properties: Vec<(String, PropertyValue)>,
    pub style: Vec<(String, PropertyValue)>,
    pub read_only: SmallVec<[String; 2]>,
}

impl ViewNode {
    fn new(type_name: String) -> Self {
        Self {
            type_name,
            parent: None,
            children: SmallVec::new(),
            properties: Vec::new(),
            style: Vec::new(),
            read_only: SmallVec::new(),
        }
    }

    fn bag(&self, owner: PropertyOwner) -> &[(String, PropertyValue)] {
        match owner {
            PropertyOwner::View => &self.properties,
            PropertyOwner::Style => &self.style,
        }
    }
}

fn upsert(bag: &mut Vec<(String, PropertyValue)>, name: &str, value: PropertyValue) {
    match bag.iter_mut().find(|(key, _)| key == name) {
        Some(slot) => slot.1 = value,
        None => bag.push((name.to_string(), value)),
    }
}

#[derive(Debug, Default)]
pub struct ViewArena {
    views: Vec<ViewNode>,
    registry: NodeRegistry<ViewIndex>,
    root: Option<ViewIndex>,
}

impl ViewArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            views: Vec::with_capacity(capacity),
            registry: NodeRegistry::new(),
            root: None,
        }
    }

    /// Create a detached view, returns its index
    pub fn add_view(&mut self, type_name: impl Into<String>) -> ViewIndex {
        let index = self.views.len() as ViewIndex;
        self.views.push(ViewNode::new(type_name.into()));
        index
    }

    pub fn get(&self, index: ViewIndex) -> Result<&ViewNode> {
        self.views
            .get(index as usize)
            .ok_or(DomError::ViewNotFound(index))
    }

    fn get_mut(&mut self, index: ViewIndex) -> Result<&mut ViewNode> {
        self.views
            .get_mut(index as usize)
            .ok_or(DomError::ViewNotFound(index))
    }

    /// Make `index` the topmost view, replacing any previous root
    ///
    /// A view promoted from inside the old tree is unlinked from its parent
    /// first and keeps its node ids. The rest of the old tree loses them.
    pub fn set_root(&mut self, index: ViewIndex) -> Result<()> {
        self.get(index)?;
        if self.root == Some(index) {
            return Ok(());
        }
        if let Some(parent) = self.get_mut(index)?.parent.take() {
            self.get_mut(parent)?.children.retain(|c| *c != index);
        }
        if let Some(old) = self.root.take() {
            self.release_subtree(old);
        }
        self.root = Some(index);
        self.register_subtree(index);
        Ok(())
    }

    pub fn root(&self) -> Option<ViewIndex> {
        self.root
    }

    pub fn append_child(&mut self, parent: ViewIndex, child: ViewIndex) -> Result<()> {
        self.get(parent)?;
        if self.ancestors_include(parent, child) {
            return Err(DomError::Cycle { child, parent });
        }
        let node = self.get_mut(child)?;
        if node.parent.is_some() {
            return Err(DomError::AlreadyAttached { child });
        }
        node.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);

        if self.is_attached(parent) {
            self.register_subtree(child);
        }
        Ok(())
    }

    /// Unlink a view from its parent; its subtree loses its node ids
    pub fn detach(&mut self, index: ViewIndex) -> Result<()> {
        let parent = self.get_mut(index)?.parent.take();
        if let Some(parent) = parent {
            self.get_mut(parent)?.children.retain(|c| *c != index);
        }
        if self.root == Some(index) {
            self.root = None;
        }
        self.release_subtree(index);
        Ok(())
    }

    /// Whether the view is reachable from the root
    pub fn is_attached(&self, index: ViewIndex) -> bool {
        let mut current = Some(index);
        while let Some(i) = current {
            if self.root == Some(i) {
                return true;
            }
            current = self.views.get(i as usize).and_then(|v| v.parent);
        }
        false
    }

    fn ancestors_include(&self, start: ViewIndex, target: ViewIndex) -> bool {
        let mut current = Some(start);
        while let Some(i) = current {
            if i == target {
                return true;
            }
            current = self.views.get(i as usize).and_then(|v| v.parent);
        }
        false
    }

    /// Node id of an attached view
    pub fn node_id_of(&self, index: ViewIndex) -> Option<NodeId> {
        self.registry.get(&index)
    }

    pub fn set_view_property(
        &mut self,
        index: ViewIndex,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<()> {
        upsert(&mut self.get_mut(index)?.properties, name, value.into());
        Ok(())
    }

    pub fn set_style_property(
        &mut self,
        index: ViewIndex,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<()> {
        upsert(&mut self.get_mut(index)?.style, name, value.into());
        Ok(())
    }

    /// Reject inspector writes to `name` on this view
    pub fn mark_read_only(&mut self, index: ViewIndex, name: &str) -> Result<()> {
        self.get_mut(index)?.read_only.push(name.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn clear(&mut self) {
        self.views.clear();
        self.registry.clear();
        self.root = None;
    }

    fn register_subtree(&mut self, start: ViewIndex) {
        let mut stack = vec![start];
        while let Some(index) = stack.pop() {
            self.registry.assign(index);
            if let Some(view) = self.views.get(index as usize) {
                stack.extend(view.children.iter().rev().copied());
            }
        }
    }

    fn release_subtree(&mut self, start: ViewIndex) {
        let mut stack = vec![start];
        while let Some(index) = stack.pop() {
            self.registry.release(&index);
            if let Some(view) = self.views.get(index as usize) {
                stack.extend(view.children.iter().copied());
            }
        }
    }
}

impl ViewTree for ViewArena {
    type Handle = ViewIndex;

    fn topmost_view(&self) -> Option<ViewIndex> {
        self.root
    }

    fn each_child_view(&self, view: &ViewIndex, visit: &mut dyn FnMut(ViewIndex) -> bool) {
        let Some(node) = self.views.get(*view as usize) else {
            return;
        };
        for &child in &node.children {
            if !visit(child) {
                break;
            }
        }
    }

    fn each_set_property(
        &self,
        view: &ViewIndex,
        owner: PropertyOwner,
        visit: &mut dyn FnMut(&str) -> bool,
    ) {
        let Some(node) = self.views.get(*view as usize) else {
            return;
        };
        for (name, _) in node.bag(owner) {
            if !visit(name) {
                break;
            }
        }
    }

    fn property_value(
        &self,
        view: &ViewIndex,
        owner: PropertyOwner,
        name: &str,
    ) -> Option<PropertyValue> {
        self.views
            .get(*view as usize)?
            .bag(owner)
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    fn set_property(&mut self, view: &ViewIndex, name: &str, value: PropertyValue) -> Result<()> {
        let node = self.get_mut(*view)?;
        if node.read_only.iter().any(|p| p == name) {
            return Err(DomError::ReadOnlyProperty(name.to_string()));
        }
        upsert(&mut node.properties, name, value);
        Ok(())
    }

    fn identity_id(&self, view: &ViewIndex) -> NodeId {
        self.registry.get(view).unwrap_or_default()
    }

    fn type_name(&self, view: &ViewIndex) -> String {
        self.views
            .get(*view as usize)
            .map(|v| v.type_name.clone())
            .unwrap_or_default()
    }

    fn child_count(&self, view: &ViewIndex) -> usize {
        self.views
            .get(*view as usize)
            .map_or(0, |v| v.children.len())
    }
}
