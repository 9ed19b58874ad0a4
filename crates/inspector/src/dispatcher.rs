//! Dispatcher - routes inbound commands to their domain
//!
//! Domains are registered once at startup and looked up by the part of the
//! method name before the dot. Every failure becomes an error response; the
//! dispatcher itself never fails.

use serde_json::Value;
use std::collections::VecDeque;

use crate::domains::Domain;
use crate::error::{InspectorError, Result};
use crate::protocol::{split_method, InspectorRequest, InspectorResponse, ProtocolError, PARSE_ERROR};

pub struct Dispatcher {
    domains: Vec<Box<dyn Domain>>,
    errors: VecDeque<String>,
    error_history: usize,
}

impl Dispatcher {
    pub fn new(error_history: usize) -> Self {
        Self {
            domains: Vec::new(),
            errors: VecDeque::new(),
            error_history,
        }
    }

    /// Add a domain. A later registration with the same name is never reached.
    pub fn register(&mut self, domain: Box<dyn Domain>) {
        tracing::debug!("Registered domain: {}", domain.name());
        self.domains.push(domain);
    }

    pub fn domain_names(&self) -> Vec<&'static str> {
        self.domains.iter().map(|d| d.name()).collect()
    }

    /// Run one decoded command
    pub fn dispatch(&mut self, request: InspectorRequest) -> InspectorResponse {
        let id = request.id;
        match self.route(&request.method, request.params.unwrap_or(Value::Null)) {
            Ok(Value::Null) => InspectorResponse::success(id, Value::Object(Default::default())),
            Ok(result) => InspectorResponse::success(id, result),
            Err(e) => {
                self.record(format!("{}: {}", request.method, e));
                InspectorResponse::failure(Some(id), e.to_protocol())
            }
        }
    }

    /// Decode, run and encode one text frame
    pub fn handle_message(&mut self, text: &str) -> String {
        let response = match serde_json::from_str::<InspectorRequest>(text) {
            Ok(request) => self.dispatch(request),
            Err(e) => {
                self.record(format!("malformed message: {}", e));
                InspectorResponse::failure(
                    request_id_of(text),
                    ProtocolError::new(PARSE_ERROR, e.to_string()),
                )
            }
        };

        serde_json::to_string(&response).unwrap_or_else(|e| {
            tracing::error!("Failed to encode response: {}", e);
            format!(
                r#"{{"id":null,"error":{{"code":{},"message":"unencodable response"}}}}"#,
                PARSE_ERROR
            )
        })
    }

    /// Most recent failures, oldest first
    pub fn recent_errors(&self) -> Vec<String> {
        self.errors.iter().cloned().collect()
    }

    fn route(&mut self, method: &str, params: Value) -> Result<Value> {
        let (domain_name, command) =
            split_method(method).ok_or_else(|| InspectorError::MalformedMethod(method.to_string()))?;

        let domain = self
            .domains
            .iter_mut()
            .find(|d| d.name() == domain_name)
            .ok_or_else(|| InspectorError::UnknownDomain(domain_name.to_string()))?;

        tracing::debug!(method, "dispatching");
        domain.handle(command, params)
    }

    fn record(&mut self, error: String) {
        tracing::warn!("{}", error);
        if self.error_history == 0 {
            return;
        }
        while self.errors.len() >= self.error_history {
            self.errors.pop_front();
        }
        self.errors.push_back(error);
    }
}

/// Salvage the id from a message that didn't decode as a request
fn request_id_of(text: &str) -> Option<u64> {
    serde_json::from_str::<Value>(text)
        .ok()?
        .get("id")?
        .as_u64()
}
