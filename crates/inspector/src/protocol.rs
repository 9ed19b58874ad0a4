//! Inspector Protocol Types
//!
//! Wire envelopes for the WebKit Inspector protocol: client commands,
//! backend responses, and unsolicited events. Domain payloads live with
//! their domains.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command id chosen by the client
pub type RequestId = u64;

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const SERVER_ERROR: i32 = -32000;

/// Command sent by the inspector client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectorRequest {
    pub id: RequestId,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Reply to one command; exactly one of `result`/`error` is set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectorResponse {
    /// `None` only when the command was too malformed to carry an id
    pub id: Option<RequestId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ProtocolError>,
}

impl InspectorResponse {
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<RequestId>, error: ProtocolError) -> Self {
        Self {
            id,
            result: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Protocol error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ProtocolError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

/// Unsolicited backend → client notification (no id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectorEvent {
    pub method: String,
    pub params: Value,
}

impl InspectorEvent {
    pub fn new<P: Serialize>(method: impl Into<String>, params: &P) -> serde_json::Result<Self> {
        Ok(Self {
            method: method.into(),
            params: serde_json::to_value(params)?,
        })
    }
}

/// Split `Domain.command` into its two halves
pub fn split_method(method: &str) -> Option<(&str, &str)> {
    let (domain, command) = method.split_once('.')?;
    if domain.is_empty() || command.is_empty() {
        return None;
    }
    Some((domain, command))
}
