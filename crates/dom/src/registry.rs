//! Node id registry
//!
//! Hands out node ids for live views. An id is assigned the first time a
//! key is seen, stays the same for as long as the key is registered, and
//! is never handed out again once released.

use ahash::AHashMap;
use std::hash::Hash;

use crate::types::NodeId;

/// Ids start at 1; 0 is never a valid node id on the wire
pub const FIRST_NODE_ID: NodeId = 1;

#[derive(Debug)]
pub struct NodeRegistry<K> {
    next_id: NodeId,
    ids: AHashMap<K, NodeId>,
}

impl<K: Hash + Eq> NodeRegistry<K> {
    pub fn new() -> Self {
        Self {
            next_id: FIRST_NODE_ID,
            ids: AHashMap::new(),
        }
    }

    /// Id for `key`, assigning the next free one if it has none yet
    pub fn assign(&mut self, key: K) -> NodeId {
        let next_id = &mut self.next_id;
        *self.ids.entry(key).or_insert_with(|| {
            let id = *next_id;
            *next_id += 1;
            id
        })
    }

    pub fn get(&self, key: &K) -> Option<NodeId> {
        self.ids.get(key).copied()
    }

    /// Forget `key`. Its id is retired, not recycled.
    pub fn release(&mut self, key: &K) -> Option<NodeId> {
        self.ids.remove(key)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl<K: Hash + Eq> Default for NodeRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}
