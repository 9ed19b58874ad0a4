//! Error types for the inspector backend

use inspector_dom::DomError;
use thiserror::Error;

use crate::protocol::{ProtocolError, INVALID_PARAMS, METHOD_NOT_FOUND, SERVER_ERROR};

pub type Result<T> = std::result::Result<T, InspectorError>;

#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("One Network domain may be enabled at a time")]
    NetworkAlreadyEnabled,

    #[error("Malformed method name: {0}")]
    MalformedMethod(String),

    #[error("'{0}' wasn't found")]
    UnknownDomain(String),

    #[error("'{domain}.{command}' wasn't found")]
    UnknownMethod { domain: String, command: String },

    #[error("Invalid params for {method}: {message}")]
    InvalidParams { method: String, message: String },

    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Dom(#[from] DomError),
}

impl InspectorError {
    /// Protocol error code reported to the client
    pub fn code(&self) -> i32 {
        // Undecodable frames are answered by the dispatcher directly; a
        // `Json` error here means a result failed to encode.
        match self {
            InspectorError::MalformedMethod(_)
            | InspectorError::UnknownDomain(_)
            | InspectorError::UnknownMethod { .. } => METHOD_NOT_FOUND,
            InspectorError::InvalidParams { .. } => INVALID_PARAMS,
            _ => SERVER_ERROR,
        }
    }

    pub fn to_protocol(&self) -> ProtocolError {
        ProtocolError::new(self.code(), self.to_string())
    }
}
