//! Network domain - request lifecycle tracking
//!
//! The host's HTTP stack calls [`NetworkDomain::create`] when a load starts
//! and then drives the returned [`NetworkRequest`] through
//! sent → response received → finished. Events go out only while the
//! tracker is enabled; the request table fills regardless so that
//! `getResponseBody` works for anything seen this session.
//!
//! At most one tracker may be enabled per [`SessionContext`]. The host
//! finds it through [`SessionContext::active_network`].

use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{parse_params, unknown_command, Domain};
use crate::config::InspectorConfig;
use crate::error::{InspectorError, Result};
use crate::events::EventBus;
use crate::protocol::InspectorEvent;

const DOMAIN: &str = "Network";

/// Coarse content classification, drives body encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResourceType {
    Document,
    Stylesheet,
    Image,
    Font,
    Script,
    #[serde(rename = "XHR")]
    Xhr,
    #[default]
    Other,
}

/// Exact-match MIME table, consulted before the `image/` and `font/` rules
const RESOURCE_TYPE_BY_MIME_TYPE: &[(&str, ResourceType)] = &[
    ("text/xml", ResourceType::Document),
    ("text/plain", ResourceType::Document),
    ("text/html", ResourceType::Document),
    ("application/xml", ResourceType::Document),
    ("application/xhtml+xml", ResourceType::Document),
    ("text/css", ResourceType::Stylesheet),
    ("text/javascript", ResourceType::Script),
    ("text/ecmascript", ResourceType::Script),
    ("application/javascript", ResourceType::Script),
    ("application/ecmascript", ResourceType::Script),
    ("application/x-javascript", ResourceType::Script),
    ("application/json", ResourceType::Script),
    ("application/x-json", ResourceType::Script),
    ("text/x-javascript", ResourceType::Script),
    ("text/x-json", ResourceType::Script),
    ("text/typescript", ResourceType::Script),
];

impl ResourceType {
    pub fn from_mime_type(mime_type: &str) -> Self {
        let mut resource_type = RESOURCE_TYPE_BY_MIME_TYPE
            .iter()
            .find(|(mime, _)| *mime == mime_type)
            .map_or(ResourceType::Other, |(_, rt)| *rt);

        // Substring, not prefix: "application/x-font/woff" counts as a font
        if mime_type.contains("image/") {
            resource_type = ResourceType::Image;
        }
        if mime_type.contains("font/") {
            resource_type = ResourceType::Font;
        }
        resource_type
    }

    pub fn has_text_content(self) -> bool {
        matches!(
            self,
            ResourceType::Document
                | ResourceType::Stylesheet
                | ResourceType::Script
                | ResourceType::Xhr
        )
    }
}

/// Body as returned by `Network.getResponseBody`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub body: String,
    pub base64_encoded: bool,
}

/// One tracked network transaction
#[derive(Debug, Clone)]
pub struct Request {
    request_id: String,
    mime_type: Option<String>,
    resource_type: ResourceType,
    data: Option<Vec<u8>>,
}

impl Request {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            mime_type: None,
            resource_type: ResourceType::Other,
            data: None,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Setting the same value again keeps any explicit resource type
    pub fn set_mime_type(&mut self, mime_type: &str) {
        if self.mime_type.as_deref() != Some(mime_type) {
            self.resource_type = ResourceType::from_mime_type(mime_type);
            self.mime_type = Some(mime_type.to_string());
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    /// Override the classification until the next mime type change
    pub fn set_resource_type(&mut self, resource_type: ResourceType) {
        self.resource_type = resource_type;
    }

    pub fn has_text_content(&self) -> bool {
        self.resource_type.has_text_content()
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = Some(data);
    }

    pub fn response_body(&self) -> ResponseBody {
        let data = self.data.as_deref().unwrap_or_default();
        let text = self.has_text_content();
        ResponseBody {
            body: if text {
                String::from_utf8_lossy(data).into_owned()
            } else {
                B64.encode(data)
            },
            base64_encoded: !text,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Request id → request, shared by every tracker of a session context
pub struct RequestTable {
    requests: DashMap<String, Request>,
    /// Insertion order, only kept when retention is bounded
    order: Mutex<VecDeque<String>>,
    max_retained: Option<usize>,
}

impl RequestTable {
    pub fn new(max_retained: Option<usize>) -> Self {
        Self {
            requests: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            max_retained,
        }
    }

    pub fn insert(&self, request: Request) {
        let request_id = request.request_id.clone();
        self.requests.insert(request_id.clone(), request);

        if let Some(max) = self.max_retained {
            let mut order = lock(&self.order);
            order.push_back(request_id);
            while order.len() > max {
                if let Some(oldest) = order.pop_front() {
                    tracing::debug!(request_id = %oldest, "evicting tracked request");
                    self.requests.remove(&oldest);
                }
            }
        }
    }

    /// Clone of the request, if still retained
    pub fn get(&self, request_id: &str) -> Option<Request> {
        self.requests.get(request_id).map(|r| r.value().clone())
    }

    /// Mutate a retained request in place; `false` if it is gone
    pub fn update(&self, request_id: &str, f: impl FnOnce(&mut Request)) -> bool {
        match self.requests.get_mut(request_id) {
            Some(mut request) => {
                f(request.value_mut());
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Monotonic request id source; never resets, never reuses
#[derive(Debug)]
pub struct RequestIdSequence {
    last: AtomicU64,
}

impl RequestIdSequence {
    pub fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self) -> String {
        (self.last.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }
}

impl Default for RequestIdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// State shared by everything composed around one inspected app
///
/// Holds the active-tracker slot, the request table, and the id sequence.
pub struct SessionContext {
    active_network: Mutex<Option<Arc<NetworkShared>>>,
    requests: RequestTable,
    sequence: RequestIdSequence,
}

impl SessionContext {
    pub fn new(max_retained_requests: Option<usize>) -> Self {
        Self {
            active_network: Mutex::new(None),
            requests: RequestTable::new(max_retained_requests),
            sequence: RequestIdSequence::new(),
        }
    }

    pub fn from_config(config: &InspectorConfig) -> Self {
        Self::new(config.max_retained_requests)
    }

    /// The enabled tracker, if any. Hosts create requests through it.
    pub fn active_network(&self) -> Option<NetworkDomain> {
        lock(&self.active_network)
            .as_ref()
            .map(|shared| NetworkDomain {
                shared: Arc::clone(shared),
            })
    }

    pub fn requests(&self) -> &RequestTable {
        &self.requests
    }

    /// Compare-and-set: claim the slot unless another tracker holds it
    fn activate(&self, tracker: &Arc<NetworkShared>) -> Result<()> {
        let mut slot = lock(&self.active_network);
        match slot.as_ref() {
            Some(current) if !Arc::ptr_eq(current, tracker) => {
                Err(InspectorError::NetworkAlreadyEnabled)
            }
            _ => {
                *slot = Some(Arc::clone(tracker));
                Ok(())
            }
        }
    }

    fn deactivate(&self, tracker: &Arc<NetworkShared>) {
        let mut slot = lock(&self.active_network);
        if slot.as_ref().is_some_and(|current| Arc::ptr_eq(current, tracker)) {
            *slot = None;
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(None)
    }
}

struct NetworkShared {
    enabled: AtomicBool,
    events: EventBus,
    frame_id: String,
    loader_id: String,
    context: Arc<SessionContext>,
}

impl NetworkShared {
    fn emit<P: Serialize>(&self, method: &str, params: &P) {
        match InspectorEvent::new(method, params) {
            Ok(event) => self.events.publish(event),
            Err(e) => tracing::error!("Failed to encode {}: {}", method, e),
        }
    }
}

/// Request as described by the host HTTP stack
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDescriptor {
    pub url: String,
    pub method: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_data: Option<String>,
}

/// Response as described by the host HTTP stack
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDescriptor {
    pub url: String,
    pub status: u16,
    pub status_text: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    pub mime_type: String,
}

#[derive(Serialize)]
struct Initiator {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestWillBeSent<'a> {
    request_id: &'a str,
    frame_id: &'a str,
    loader_id: &'a str,
    #[serde(rename = "documentURL")]
    document_url: &'a str,
    request: &'a RequestDescriptor,
    timestamp: f64,
    initiator: Initiator,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResponseReceived<'a> {
    request_id: &'a str,
    frame_id: &'a str,
    loader_id: &'a str,
    timestamp: f64,
    #[serde(rename = "type")]
    resource_type: ResourceType,
    response: &'a ResponseDescriptor,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadingFinished<'a> {
    request_id: &'a str,
    timestamp: f64,
}

/// Seconds since the Unix epoch
fn timestamp() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Network domain tracker
///
/// Cheap to clone; clones are the same tracker.
#[derive(Clone)]
pub struct NetworkDomain {
    shared: Arc<NetworkShared>,
}

impl NetworkDomain {
    pub fn new(context: Arc<SessionContext>, events: EventBus, config: &InspectorConfig) -> Self {
        Self {
            shared: Arc::new(NetworkShared {
                enabled: AtomicBool::new(false),
                events,
                frame_id: config.frame_id.clone(),
                loader_id: config.loader_id.clone(),
                context,
            }),
        }
    }

    pub fn enabled(&self) -> bool {
        self.shared.enabled.load(Ordering::SeqCst)
    }

    /// Start delivering network events; fails if another tracker is active
    pub fn enable(&self) -> Result<()> {
        self.shared.context.activate(&self.shared)?;
        self.shared.enabled.store(true, Ordering::SeqCst);
        tracing::info!("Network domain enabled");
        Ok(())
    }

    /// Stop delivering network events. Idempotent.
    pub fn disable(&self) {
        self.shared.context.deactivate(&self.shared);
        self.shared.enabled.store(false, Ordering::SeqCst);
        tracing::info!("Network domain disabled");
    }

    pub fn is_same(&self, other: &NetworkDomain) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Start tracking a new request
    pub fn create(&self) -> NetworkRequest {
        let request_id = self.shared.context.sequence.next_id();
        self.shared
            .context
            .requests
            .insert(Request::new(request_id.clone()));
        tracing::debug!(request_id = %request_id, "tracking request");

        NetworkRequest {
            request_id,
            shared: Arc::clone(&self.shared),
        }
    }

    /// `None` for ids never seen (or already evicted)
    pub fn get_response_body(&self, request_id: &str) -> Option<ResponseBody> {
        self.shared
            .context
            .requests
            .get(request_id)
            .map(|request| request.response_body())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetResponseBodyParams {
    request_id: String,
}

impl Domain for NetworkDomain {
    fn name(&self) -> &'static str {
        DOMAIN
    }

    fn handle(&mut self, command: &str, params: Value) -> Result<Value> {
        match command {
            "enable" => {
                self.enable()?;
                Ok(Value::Null)
            }
            "disable" => {
                self.disable();
                Ok(Value::Null)
            }
            "getResponseBody" => {
                let p: GetResponseBodyParams = parse_params(DOMAIN, command, params)?;
                match self.get_response_body(&p.request_id) {
                    Some(body) => Ok(serde_json::to_value(body)?),
                    None => Ok(Value::Null),
                }
            }
            // The embedding platform has no cache or cookie jar to manage
            "canClearBrowserCache" | "canClearBrowserCookies" => Ok(json!({ "result": false })),
            "clearBrowserCache" | "clearBrowserCookies" | "setCacheDisabled"
            | "setExtraHTTPHeaders" => {
                tracing::debug!("Network.{} ignored", command);
                Ok(Value::Null)
            }
            "loadResource" => Ok(json!({ "content": "", "mimeType": "", "status": 200 })),
            _ => Err(unknown_command(DOMAIN, command)),
        }
    }
}

/// Host-side handle for one tracked request
#[derive(Clone)]
pub struct NetworkRequest {
    request_id: String,
    shared: Arc<NetworkShared>,
}

impl NetworkRequest {
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    fn enabled(&self) -> bool {
        self.shared.enabled.load(Ordering::SeqCst)
    }

    fn update(&self, f: impl FnOnce(&mut Request)) {
        if !self.shared.context.requests.update(&self.request_id, f) {
            tracing::debug!(request_id = %self.request_id, "request no longer retained");
        }
    }

    pub fn request_will_be_sent(&self, request: &RequestDescriptor) {
        if !self.enabled() {
            return;
        }
        let shared = &self.shared;
        shared.emit(
            "Network.requestWillBeSent",
            &RequestWillBeSent {
                request_id: &self.request_id,
                frame_id: &shared.frame_id,
                loader_id: &shared.loader_id,
                document_url: &request.url,
                request,
                timestamp: timestamp(),
                initiator: Initiator { kind: "Script" },
            },
        );
    }

    pub fn response_received(&self, response: &ResponseDescriptor) {
        if !self.enabled() {
            return;
        }
        let mut resource_type = ResourceType::from_mime_type(&response.mime_type);
        self.update(|r| {
            r.set_mime_type(&response.mime_type);
            resource_type = r.resource_type();
        });

        let shared = &self.shared;
        shared.emit(
            "Network.responseReceived",
            &ResponseReceived {
                request_id: &self.request_id,
                frame_id: &shared.frame_id,
                loader_id: &shared.loader_id,
                timestamp: timestamp(),
                resource_type,
                response,
            },
        );
    }

    pub fn loading_finished(&self) {
        if !self.enabled() {
            return;
        }
        self.shared.emit(
            "Network.loadingFinished",
            &LoadingFinished {
                request_id: &self.request_id,
                timestamp: timestamp(),
            },
        );
    }

    pub fn set_mime_type(&self, mime_type: &str) {
        self.update(|r| r.set_mime_type(mime_type));
    }

    pub fn set_resource_type(&self, resource_type: ResourceType) {
        self.update(|r| r.set_resource_type(resource_type));
    }

    /// Buffer the payload for `getResponseBody`
    pub fn set_data(&self, data: impl Into<Vec<u8>>) {
        let data = data.into();
        self.update(|r| r.set_data(data));
    }

    /// Current state of the request, if still retained
    pub fn snapshot(&self) -> Option<Request> {
        self.shared.context.requests.get(&self.request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    fn tracker(context: &Arc<SessionContext>) -> (NetworkDomain, EventBus) {
        let events = EventBus::new();
        let network = NetworkDomain::new(
            Arc::clone(context),
            events.clone(),
            &InspectorConfig::default(),
        );
        (network, events)
    }

    #[test]
    fn test_resource_type_table() {
        for (mime, expected) in RESOURCE_TYPE_BY_MIME_TYPE {
            assert_eq!(ResourceType::from_mime_type(mime), *expected, "{}", mime);
        }
        assert_eq!(ResourceType::from_mime_type("image/png"), ResourceType::Image);
        assert_eq!(ResourceType::from_mime_type("font/woff2"), ResourceType::Font);
        assert_eq!(
            ResourceType::from_mime_type("application/x-font/ttf"),
            ResourceType::Font
        );
        assert_eq!(
            ResourceType::from_mime_type("application/octet-stream"),
            ResourceType::Other
        );
        assert_eq!(ResourceType::from_mime_type(""), ResourceType::Other);
    }

    #[test]
    fn test_has_text_content() {
        let text = [
            ResourceType::Document,
            ResourceType::Stylesheet,
            ResourceType::Script,
            ResourceType::Xhr,
        ];
        let binary = [ResourceType::Image, ResourceType::Font, ResourceType::Other];
        assert!(text.iter().all(|rt| rt.has_text_content()));
        assert!(binary.iter().all(|rt| !rt.has_text_content()));
    }

    #[test]
    fn test_json_is_script_with_text() {
        let mut request = Request::new("1");
        request.set_mime_type("application/json");
        assert_eq!(request.resource_type(), ResourceType::Script);
        assert!(request.has_text_content());
    }

    #[test]
    fn test_resource_type_follows_last_mime_type() {
        let mut request = Request::new("1");
        assert_eq!(request.resource_type(), ResourceType::Other);

        request.set_mime_type("image/jpeg");
        assert_eq!(request.resource_type(), ResourceType::Image);
        request.set_mime_type("text/css");
        assert_eq!(request.resource_type(), ResourceType::Stylesheet);

        request.set_resource_type(ResourceType::Xhr);
        request.set_mime_type("text/css");
        assert_eq!(request.resource_type(), ResourceType::Xhr);
        request.set_mime_type("text/html");
        assert_eq!(request.resource_type(), ResourceType::Document);
    }

    #[test]
    fn test_resource_type_wire_names() {
        assert_eq!(serde_json::to_value(ResourceType::Xhr).unwrap(), json!("XHR"));
        assert_eq!(
            serde_json::to_value(ResourceType::Stylesheet).unwrap(),
            json!("Stylesheet")
        );
    }

    #[test]
    fn test_single_active_tracker() {
        let context = Arc::new(SessionContext::default());
        let (a, _) = tracker(&context);
        let (b, _) = tracker(&context);

        a.enable().unwrap();
        a.enable().unwrap(); // re-enabling self is fine
        assert!(matches!(b.enable(), Err(InspectorError::NetworkAlreadyEnabled)));
        assert!(!b.enabled());
        assert!(context.active_network().unwrap().is_same(&a));

        // Disabling a non-active tracker leaves the slot alone
        b.disable();
        assert!(context.active_network().unwrap().is_same(&a));

        a.disable();
        a.disable();
        assert!(context.active_network().is_none());
        b.enable().unwrap();
        assert!(b.enabled());
    }

    #[test]
    fn test_ids_are_monotonic_across_reenable() {
        let context = Arc::new(SessionContext::default());
        let (network, _) = tracker(&context);

        let first = network.create();
        let second = network.create();
        network.enable().unwrap();
        network.disable();
        network.enable().unwrap();
        let third = network.create();

        let ids: Vec<u64> = [first, second, third]
            .iter()
            .map(|r| r.request_id().parse().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);

        // Ids come from the context, not the tracker
        let (other, _) = tracker(&context);
        assert_eq!(other.create().request_id(), "4");
    }

    #[test]
    fn test_text_body() {
        let context = Arc::new(SessionContext::default());
        let (network, _) = tracker(&context);
        let request = network.create();
        request.set_mime_type("text/html");
        request.set_data("<p>héllo</p>");

        let body = network.get_response_body(request.request_id()).unwrap();
        assert_eq!(
            body,
            ResponseBody {
                body: "<p>héllo</p>".to_string(),
                base64_encoded: false,
            }
        );
    }

    #[test]
    fn test_invalid_utf8_text_body_is_lossy() {
        let context = Arc::new(SessionContext::default());
        let (network, _) = tracker(&context);
        let request = network.create();
        request.set_mime_type("text/plain");
        request.set_data(vec![0xff, b'a']);

        let body = network.get_response_body(request.request_id()).unwrap();
        assert!(!body.base64_encoded);
        assert_eq!(body.body, "\u{fffd}a");
    }

    #[test]
    fn test_binary_body_is_base64() {
        let context = Arc::new(SessionContext::default());
        let (network, _) = tracker(&context);
        let request = network.create();
        let bytes = vec![0x89, b'P', b'N', b'G', 0x00, 0xff];
        request.set_mime_type("image/png");
        request.set_data(bytes.clone());

        let body = network.get_response_body(request.request_id()).unwrap();
        assert!(body.base64_encoded);
        assert_eq!(B64.decode(body.body).unwrap(), bytes);
    }

    #[test]
    fn test_missing_body() {
        let context = Arc::new(SessionContext::default());
        let (network, _) = tracker(&context);
        assert!(network.get_response_body("404").is_none());

        let request = network.create();
        let body = network.get_response_body(request.request_id()).unwrap();
        assert_eq!(body.body, "");
        assert!(body.base64_encoded);
    }

    #[test]
    fn test_events_only_when_enabled() {
        let context = Arc::new(SessionContext::default());
        let (network, events) = tracker(&context);
        let mut rx = events.subscribe();

        let request = network.create();
        request.request_will_be_sent(&RequestDescriptor {
            url: "https://example.com/a.png".into(),
            method: "GET".into(),
            ..Default::default()
        });
        request.loading_finished();
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

        network.enable().unwrap();
        let descriptor = RequestDescriptor {
            url: "https://example.com/data".into(),
            method: "GET".into(),
            ..Default::default()
        };
        request.request_will_be_sent(&descriptor);
        request.response_received(&ResponseDescriptor {
            url: descriptor.url.clone(),
            status: 200,
            status_text: "OK".into(),
            mime_type: "application/json".into(),
            ..Default::default()
        });
        request.loading_finished();

        let sent = rx.try_recv().unwrap();
        assert_eq!(sent.method, "Network.requestWillBeSent");
        assert_eq!(sent.params["requestId"], json!(request.request_id()));
        assert_eq!(sent.params["frameId"], json!("NativeScriptMainFrameIdentifier"));
        assert_eq!(sent.params["loaderId"], json!("Loader Identifier"));
        assert_eq!(sent.params["documentURL"], json!("https://example.com/data"));
        assert_eq!(sent.params["initiator"], json!({"type": "Script"}));
        assert!(sent.params["timestamp"].as_f64().unwrap() > 0.0);

        let received = rx.try_recv().unwrap();
        assert_eq!(received.method, "Network.responseReceived");
        assert_eq!(received.params["type"], json!("Script"));
        assert_eq!(received.params["response"]["mimeType"], json!("application/json"));

        let finished = rx.try_recv().unwrap();
        assert_eq!(finished.method, "Network.loadingFinished");
        assert_eq!(finished.params["requestId"], json!(request.request_id()));

        assert!(request.snapshot().unwrap().has_text_content());
    }

    #[test]
    fn test_response_ignored_while_disabled() {
        let context = Arc::new(SessionContext::default());
        let (network, _) = tracker(&context);
        let request = network.create();
        request.response_received(&ResponseDescriptor {
            mime_type: "text/css".into(),
            ..Default::default()
        });
        assert_eq!(request.snapshot().unwrap().mime_type(), None);
    }

    #[test]
    fn test_bounded_retention() {
        let context = Arc::new(SessionContext::new(Some(2)));
        let (network, _) = tracker(&context);
        let first = network.create();
        let _second = network.create();
        let third = network.create();

        assert_eq!(context.requests().len(), 2);
        assert!(network.get_response_body(first.request_id()).is_none());
        assert!(network.get_response_body(third.request_id()).is_some());
        // Updates to evicted requests are dropped quietly
        first.set_data("late");
        assert!(first.snapshot().is_none());
    }

    #[test]
    fn test_stub_commands() {
        let context = Arc::new(SessionContext::default());
        let (mut network, _) = tracker(&context);

        assert_eq!(
            network.handle("canClearBrowserCache", Value::Null).unwrap(),
            json!({"result": false})
        );
        assert_eq!(
            network.handle("canClearBrowserCookies", Value::Null).unwrap(),
            json!({"result": false})
        );
        assert_eq!(
            network
                .handle("loadResource", json!({"frameId": "f", "url": "x"}))
                .unwrap(),
            json!({"content": "", "mimeType": "", "status": 200})
        );
        for command in ["clearBrowserCache", "clearBrowserCookies", "setCacheDisabled"] {
            assert_eq!(network.handle(command, Value::Null).unwrap(), Value::Null);
        }
        assert!(network.handle("emulateNetworkConditions", Value::Null).is_err());
    }

    #[test]
    fn test_get_response_body_command() {
        let context = Arc::new(SessionContext::default());
        let (mut network, _) = tracker(&context);
        let request = network.create();
        request.set_mime_type("text/plain");
        request.set_data("ok");

        let result = network
            .handle("getResponseBody", json!({"requestId": request.request_id()}))
            .unwrap();
        assert_eq!(result, json!({"body": "ok", "base64Encoded": false}));

        let missing = network
            .handle("getResponseBody", json!({"requestId": "999"}))
            .unwrap();
        assert_eq!(missing, Value::Null);

        assert!(matches!(
            network.handle("getResponseBody", json!({})),
            Err(InspectorError::InvalidParams { .. })
        ));
    }
}
