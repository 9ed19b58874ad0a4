//! Protocol-facing node model
//!
//! These are the shapes an inspector client sees on the wire:
//! camelCase field names, integer node types, flat attribute lists.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Node identifier, stable for as long as the view stays attached
pub type NodeId = u32;

/// Node type codes as defined by the W3C DOM
///
/// Only `Document` and `Element` are produced by the snapshotter, the rest
/// exist so that client-sent values round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    EntityReference = 5,
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    Notation = 12,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            2 => Some(NodeType::Attribute),
            3 => Some(NodeType::Text),
            4 => Some(NodeType::CdataSection),
            5 => Some(NodeType::EntityReference),
            6 => Some(NodeType::Entity),
            7 => Some(NodeType::ProcessingInstruction),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            11 => Some(NodeType::DocumentFragment),
            12 => Some(NodeType::Notation),
            _ => None,
        }
    }
}

// The wire carries node types as bare integers.
impl Serialize for NodeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for NodeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        NodeType::from_u8(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid node type {}", value)))
    }
}

/// Which property bag of a view is being addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyOwner {
    /// Properties set directly on the view (`text`, `id`, ...)
    View,
    /// Properties set on the view's style object (`color`, `margin`, ...)
    Style,
}

/// Value of a view or style property as read from the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

/// Stringified the way inspector clients expect: integral numbers lose
/// their fractional part, infinities read as `Infinity`, null reads as `null`.
impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => f.write_str("null"),
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            PropertyValue::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Text(s) => f.write_str(s),
        }
    }
}

/// Snapshot of one UI element (or the document root)
///
/// Built eagerly from the live tree; nothing in here is live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub node_id: NodeId,
    pub node_type: NodeType,
    pub node_name: String,
    pub local_name: String,
    pub node_value: String,
    pub child_node_count: usize,
    pub children: Vec<Node>,
    #[serde(rename = "documentURL")]
    pub document_url: String,
    pub role: String,
    /// Alternating name, value. View properties first, style properties
    /// after, with no marker between the two groups.
    pub attributes: Vec<String>,
}

impl Node {
    pub fn new(node_id: NodeId, node_type: NodeType, node_name: impl Into<String>) -> Self {
        let node_name = node_name.into();
        Self {
            node_id,
            node_type,
            local_name: node_name.clone(),
            node_name,
            node_value: String::new(),
            child_node_count: 0,
            children: Vec::new(),
            document_url: String::new(),
            role: String::new(),
            attributes: Vec::new(),
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Iterate attribute (name, value) pairs in order
    pub fn attribute_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .chunks_exact(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }

    /// First attribute value with the given name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attribute_pairs()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Pre-order search of this snapshot
    pub fn find(&self, node_id: NodeId) -> Option<&Node> {
        if self.node_id == node_id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(node_id))
    }

    /// Total nodes in this snapshot, self included
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_size).sum::<usize>()
    }
}

/// One entry of a computed style listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedStyleProperty {
    pub name: String,
    pub value: String,
}

impl ComputedStyleProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
