//! Inspector configuration

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::{InspectorError, Result};
use crate::events::DEFAULT_CAPACITY;

/// Single-frame model: every network event reports these
pub const MAIN_FRAME_ID: &str = "NativeScriptMainFrameIdentifier";
pub const MAIN_LOADER_ID: &str = "Loader Identifier";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    pub id: String,
    /// Where the WebSocket transport listens, `ws://host:port`
    pub endpoint: String,
    pub frame_id: String,
    pub loader_id: String,
    /// Keep at most this many requests for `getResponseBody`; `None` keeps all
    pub max_retained_requests: Option<usize>,
    pub event_buffer: usize,
    /// How many dispatch failures the dispatcher remembers
    pub error_history: usize,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            endpoint: "ws://127.0.0.1:9229".to_string(),
            frame_id: MAIN_FRAME_ID.to_string(),
            loader_id: MAIN_LOADER_ID.to_string(),
            max_retained_requests: None,
            event_buffer: DEFAULT_CAPACITY,
            error_history: 32,
        }
    }
}

impl InspectorConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Host and port to bind, validated from `endpoint`
    pub fn bind_address(&self) -> Result<(String, u16)> {
        let invalid = |reason: &str| InspectorError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: reason.to_string(),
        };

        let url = Url::parse(&self.endpoint).map_err(|e| invalid(&e.to_string()))?;
        if url.scheme() != "ws" {
            return Err(invalid("scheme must be ws"));
        }
        let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| invalid("missing port"))?;

        Ok((host.to_string(), port))
    }
}
