//! Markup serializer - renders a node snapshot as indented pseudo-XML
//!
//! Backs `DOM.getOuterHTML`. The output is for reading in the inspector,
//! not for parsing back.

use crate::types::{Node, NodeType};
use crate::utils;

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// Spaces per nesting level
    pub indent_width: usize,
    pub max_value_length: usize,
    /// Whether `Document` nodes get their own tag or just render children
    pub render_document_tag: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            max_value_length: 200,
            render_document_tag: true,
        }
    }
}

pub struct MarkupSerializer {
    config: SerializerConfig,
}

impl MarkupSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    pub fn serialize(&self, node: &Node) -> String {
        let mut output = String::with_capacity(256 * node.subtree_size());
        self.serialize_node(node, 0, &mut output);
        output
    }

    fn serialize_node(&self, node: &Node, depth: usize, output: &mut String) {
        if node.node_type == NodeType::Document && !self.config.render_document_tag {
            for child in &node.children {
                self.serialize_node(child, depth, output);
            }
            return;
        }

        let indent = " ".repeat(depth * self.config.indent_width);

        // Format: <Label text="Hello" color="red">
        output.push_str(&indent);
        output.push('<');
        output.push_str(&node.node_name);
        for (name, value) in node.attribute_pairs() {
            let value = utils::cap_text_length(value, self.config.max_value_length);
            output.push_str(&format!(" {}=\"{}\"", name, utils::escape_attribute(&value)));
        }

        if node.children.is_empty() {
            output.push_str(" />\n");
            return;
        }
        output.push_str(">\n");

        for child in &node.children {
            self.serialize_node(child, depth + 1, output);
        }

        output.push_str(&indent);
        output.push_str("</");
        output.push_str(&node.node_name);
        output.push_str(">\n");
    }
}

impl Default for MarkupSerializer {
    fn default() -> Self {
        Self::new()
    }
}
