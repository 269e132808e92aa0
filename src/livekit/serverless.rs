//! Single-invocation adapter for serverless runtimes.
//!
//! The runtime hands over one event (`{"method": "...", "body": ...}`) and
//! expects `{"statusCode": ..., "headers": {...}, "body": "..."}` back.

use crate::livekit::dispatch::dispatch;
use crate::livekit::livekit_token::LiveKitConfig;
use crate::utils::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One inbound invocation.
///
/// `body` may arrive as a JSON string or already decoded as an object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerlessRequest {
    pub method: String,
    #[serde(default)]
    pub body: Option<Value>,
}

impl ServerlessRequest {
    pub fn new(method: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method: method.into(),
            body,
        }
    }

    fn body_bytes(&self) -> Vec<u8> {
        match &self.body {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(raw)) => raw.as_bytes().to_vec(),
            Some(other) => other.to_string().into_bytes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerlessResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// Handles one invocation by delegating to [`dispatch`].
pub fn handle(
    request: &ServerlessRequest,
    config: &LiveKitConfig,
    clock: &dyn Clock,
) -> ServerlessResponse {
    let reply = dispatch(&request.method, &request.body_bytes(), config, clock);
    ServerlessResponse {
        status_code: reply.status,
        headers: reply
            .headers
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
        body: reply.body,
    }
}

/// Parses a raw event and handles it. An unreadable event is answered like
/// a request with an empty method, i.e. `405`.
pub fn handle_event(event: &str, config: &LiveKitConfig, clock: &dyn Clock) -> ServerlessResponse {
    let request = serde_json::from_str::<ServerlessRequest>(event).unwrap_or_default();
    handle(&request, config, clock)
}
