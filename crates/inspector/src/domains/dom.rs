//! DOM domain - the live view tree as an inspector document
//!
//! `getDocument` snapshots the whole tree on every call. Edits go straight
//! to the live views. Most of the DOM command surface has no counterpart in
//! a native view hierarchy and answers with fixed empty results.

use inspector_dom::{
    snapshot, style, tree, utils, ComputedStyleProperty, MarkupSerializer, Node, NodeId,
    PropertyValue, ViewTree,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{lock_tree, parse_params, unknown_command, Domain, SharedTree};
use crate::error::Result;
use crate::events::EventBus;

const DOMAIN: &str = "DOM";

#[derive(Debug, Serialize)]
pub struct GetDocumentResult {
    pub root: Option<Node>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeParams {
    node_id: NodeId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetAttributesAsTextParams {
    node_id: NodeId,
    text: String,
    #[serde(default)]
    name: Option<String>,
}

pub struct DomDomain<T> {
    tree: SharedTree<T>,
    events: EventBus,
    serializer: MarkupSerializer,
}

impl<T: ViewTree> DomDomain<T> {
    pub fn new(tree: SharedTree<T>, events: EventBus) -> Self {
        Self {
            tree,
            events,
            serializer: MarkupSerializer::new(),
        }
    }

    /// Outbound sink for DOM notifications
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn get_document(&self) -> GetDocumentResult {
        let views = lock_tree(&self.tree);
        GetDocumentResult {
            root: snapshot::document(&*views),
        }
    }

    /// Assign `name` on the first live view with `node_id`
    ///
    /// The value is cut out of `text` by [`utils::extract_attribute_value`].
    /// Unknown ids are ignored. A write the host rejects is logged and the
    /// command still succeeds.
    pub fn set_attributes_as_text(&self, node_id: NodeId, name: &str, text: &str) {
        let mut views = lock_tree(&self.tree);
        let Some(view) = tree::find_view(&*views, node_id) else {
            tracing::debug!(node_id, "setAttributesAsText: no such node");
            return;
        };

        let value = utils::extract_attribute_value(name, text);
        if let Err(e) = views.set_property(&view, name, PropertyValue::Text(value)) {
            tracing::warn!(node_id, name, "setAttributesAsText rejected: {}", e);
        }
    }

    pub fn get_computed_style_for_node(&self, node_id: NodeId) -> Vec<ComputedStyleProperty> {
        let views = lock_tree(&self.tree);
        style::computed_style(&*views, node_id)
    }

    /// Flat attribute list of the first view with `node_id`
    pub fn get_attributes(&self, node_id: NodeId) -> Vec<String> {
        let views = lock_tree(&self.tree);
        tree::find_view(&*views, node_id)
            .map(|view| snapshot::attributes(&*views, &view))
            .unwrap_or_default()
    }

    pub fn get_outer_html(&self, node_id: NodeId) -> Option<String> {
        let views = lock_tree(&self.tree);
        snapshot::element(&*views, node_id).map(|node| self.serializer.serialize(&node))
    }
}

impl<T: ViewTree + Send> Domain for DomDomain<T> {
    fn name(&self) -> &'static str {
        DOMAIN
    }

    fn handle(&mut self, command: &str, params: Value) -> Result<Value> {
        match command {
            "getDocument" => Ok(serde_json::to_value(self.get_document())?),
            "setAttributesAsText" => {
                let p: SetAttributesAsTextParams = parse_params(DOMAIN, command, params)?;
                // Without a name there is nothing to assign to
                if let Some(name) = p.name {
                    self.set_attributes_as_text(p.node_id, &name, &p.text);
                }
                Ok(Value::Null)
            }
            "getAttributes" => {
                let p: NodeParams = parse_params(DOMAIN, command, params)?;
                Ok(json!({ "attributes": self.get_attributes(p.node_id) }))
            }
            "getOuterHTML" => {
                let p: NodeParams = parse_params(DOMAIN, command, params)?;
                Ok(json!({ "outerHTML": self.get_outer_html(p.node_id) }))
            }

            "enable" | "disable" | "requestChildNodes" | "setNodeValue" | "removeNode"
            | "setAttributeValue" | "removeAttribute" | "setOuterHTML"
            | "discardSearchResults" | "setInspectModeEnabled" | "highlightRect"
            | "highlightQuad" | "highlightSelector" | "highlightNode" | "hideHighlight"
            | "highlightFrame" | "releaseBackendNodeIds" | "undo" | "redo"
            | "markUndoableState" | "focus" => {
                tracing::debug!("DOM.{} ignored", command);
                Ok(Value::Null)
            }
            "querySelector" | "setNodeName" | "requestNode" | "pushNodeByPathToFrontend"
            | "pushNodeByBackendIdToFrontend" | "moveTo" => Ok(json!({ "nodeId": null })),
            "querySelectorAll" | "getSearchResults" => Ok(json!({ "nodeIds": [] })),
            "performSearch" => Ok(json!({ "searchId": "a", "resultCount": 0 })),
            "getEventListenersForNode" => Ok(json!({ "listeners": [] })),
            "getAccessibilityPropertiesForNode" => Ok(json!({ "properties": null })),
            "resolveNode" => Ok(json!({ "object": null })),
            _ => Err(unknown_command(DOMAIN, command)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::share_tree;
    use inspector_dom::{PropertyOwner, ViewArena, ViewIndex};

    struct Fixture {
        domain: DomDomain<ViewArena>,
        tree: SharedTree<ViewArena>,
        label: ViewIndex,
    }

    impl Fixture {
        fn id(&self, view: ViewIndex) -> NodeId {
            lock_tree(&self.tree).node_id_of(view).unwrap()
        }
    }

    fn fixture() -> Fixture {
        let mut arena = ViewArena::new();
        let frame = arena.add_view("Frame");
        let page = arena.add_view("Page");
        let label = arena.add_view("Label");
        arena.set_root(frame).unwrap();
        arena.append_child(frame, page).unwrap();
        arena.append_child(page, label).unwrap();
        arena.set_view_property(label, "text", "Hello").unwrap();
        arena.set_style_property(label, "color", "red").unwrap();
        arena.mark_read_only(label, "typeName").unwrap();

        let tree = share_tree(arena);
        Fixture {
            domain: DomDomain::new(tree.clone(), EventBus::new()),
            tree,
            label,
        }
    }

    #[test]
    fn test_get_document() {
        let mut f = fixture();
        let result = f.domain.handle("getDocument", Value::Null).unwrap();

        let root = &result["root"];
        assert_eq!(root["nodeType"], json!(9));
        assert_eq!(root["nodeName"], json!("Frame"));
        let label = &root["children"][0]["children"][0];
        assert_eq!(label["nodeType"], json!(1));
        assert_eq!(label["nodeId"], json!(f.id(f.label)));
        assert_eq!(label["attributes"], json!(["text", "Hello", "color", "red"]));
    }

    #[test]
    fn test_get_document_without_ui() {
        let mut domain = DomDomain::new(share_tree(ViewArena::new()), EventBus::new());
        assert_eq!(
            domain.handle("getDocument", Value::Null).unwrap(),
            json!({ "root": null })
        );
    }

    #[test]
    fn test_set_attributes_as_text() {
        let mut f = fixture();
        let node_id = f.id(f.label);
        f.domain
            .handle(
                "setAttributesAsText",
                json!({"nodeId": node_id, "name": "text", "text": "text=\"Bye\""}),
            )
            .unwrap();

        let tree = lock_tree(&f.tree);
        assert_eq!(
            tree.property_value(&f.label, PropertyOwner::View, "text"),
            Some(PropertyValue::from("Bye"))
        );
    }

    #[test]
    fn test_set_attributes_edge_cases() {
        let mut f = fixture();
        let node_id = f.id(f.label);

        // Unknown node, missing name, rejected write: all succeed silently
        for params in [
            json!({"nodeId": 999, "name": "text", "text": "text=\"x\""}),
            json!({"nodeId": node_id, "text": "x"}),
            json!({"nodeId": node_id, "name": "typeName", "text": "typeName=\"x\""}),
        ] {
            assert_eq!(f.domain.handle("setAttributesAsText", params).unwrap(), Value::Null);
        }
        assert_eq!(f.domain.get_attributes(node_id), vec!["text", "Hello", "color", "red"]);
    }

    #[test]
    fn test_computed_style_and_attributes() {
        let f = fixture();
        let node_id = f.id(f.label);
        let style = f.domain.get_computed_style_for_node(node_id);
        assert_eq!(style.len(), 1);
        assert_eq!(style[0].name, "color");
        assert!(f.domain.get_computed_style_for_node(404).is_empty());
        assert!(f.domain.get_attributes(404).is_empty());
    }

    #[test]
    fn test_get_outer_html() {
        let mut f = fixture();
        let node_id = f.id(f.label);
        assert_eq!(
            f.domain
                .handle("getOuterHTML", json!({"nodeId": node_id}))
                .unwrap(),
            json!({"outerHTML": "<Label text=\"Hello\" color=\"red\" />\n"})
        );
        assert_eq!(
            f.domain.handle("getOuterHTML", json!({"nodeId": 404})).unwrap(),
            json!({"outerHTML": null})
        );
    }

    #[test]
    fn test_stub_surface() {
        let mut f = fixture();
        assert_eq!(
            f.domain.handle("performSearch", json!({"query": "x"})).unwrap(),
            json!({"searchId": "a", "resultCount": 0})
        );
        assert_eq!(
            f.domain.handle("querySelectorAll", json!({})).unwrap(),
            json!({"nodeIds": []})
        );
        assert_eq!(
            f.domain.handle("querySelector", json!({})).unwrap(),
            json!({"nodeId": null})
        );
        assert_eq!(
            f.domain.handle("resolveNode", json!({})).unwrap(),
            json!({"object": null})
        );
        assert_eq!(
            f.domain
                .handle("getAccessibilityPropertiesForNode", json!({}))
                .unwrap(),
            json!({"properties": null})
        );
        for command in ["hideHighlight", "undo", "redo", "highlightNode", "focus"] {
            assert_eq!(f.domain.handle(command, Value::Null).unwrap(), Value::Null);
        }
        assert!(f.domain.handle("copyTo", Value::Null).is_err());
    }
}
