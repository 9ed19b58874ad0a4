//! CSS domain - read-only style inspection
//!
//! Only `getComputedStyleForNode` reads real data. There is no stylesheet
//! model behind this backend, so the stylesheet and rule commands are
//! placeholders that keep clients from erroring out.

use inspector_dom::{style, ComputedStyleProperty, NodeId, ViewTree};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{lock_tree, parse_params, unknown_command, Domain, SharedTree};
use crate::error::Result;
use crate::events::EventBus;

const DOMAIN: &str = "CSS";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyleResult {
    pub computed_style: Vec<ComputedStyleProperty>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeParams {
    node_id: NodeId,
}

pub struct CssDomain<T> {
    tree: SharedTree<T>,
    events: EventBus,
}

impl<T: ViewTree> CssDomain<T> {
    pub fn new(tree: SharedTree<T>, events: EventBus) -> Self {
        Self { tree, events }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Style properties of the first view with `node_id`, empty if none
    pub fn get_computed_style_for_node(&self, node_id: NodeId) -> ComputedStyleResult {
        let views = lock_tree(&self.tree);
        ComputedStyleResult {
            computed_style: style::computed_style(&*views, node_id),
        }
    }
}

impl<T: ViewTree + Send> Domain for CssDomain<T> {
    fn name(&self) -> &'static str {
        DOMAIN
    }

    fn handle(&mut self, command: &str, params: Value) -> Result<Value> {
        match command {
            "getComputedStyleForNode" => {
                let p: NodeParams = parse_params(DOMAIN, command, params)?;
                Ok(serde_json::to_value(self.get_computed_style_for_node(p.node_id))?)
            }

            "enable" | "disable" | "setStyleSheetText" | "forcePseudoState" => {
                tracing::debug!("CSS.{} ignored", command);
                Ok(Value::Null)
            }
            // No cascade is modelled
            "getMatchedStylesForNode" | "getInlineStylesForNode" => Ok(json!({})),
            "getAllStyleSheets" => Ok(json!({ "headers": [] })),
            "getStyleSheet" => Ok(json!({ "styleSheet": null })),
            "getStyleSheetText" => Ok(json!({ "text": "" })),
            "setStyleText" => Ok(json!({ "style": null })),
            "setRuleSelector" | "addRule" => Ok(json!({ "rule": null })),
            "createStyleSheet" => Ok(json!({ "styleSheetId": null })),
            "getSupportedCSSProperties" => Ok(json!({ "cssProperties": [] })),
            "getSupportedSystemFontFamilyNames" => Ok(json!({ "fontFamilyNames": [] })),
            "getNamedFlowCollection" => Ok(json!({ "namedFlows": null })),
            _ => Err(unknown_command(DOMAIN, command)),
        }
    }
}
