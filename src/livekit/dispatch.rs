//! Protocol layer shared by every deployment adapter.
//!
//! [`dispatch`] maps an HTTP method and raw body to a complete [`TokenReply`].
//! The Actix handler and the serverless handler only translate that reply
//! into their own response types, so both produce the same status, headers
//! and body for the same input.

use crate::error::IssueError;
use crate::livekit::livekit_token::{issue_credential, parse_token_request, LiveKitConfig};
use crate::utils::Clock;
use serde_json::json;
use tracing::{error, warn};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// A transport-neutral HTTP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenReply {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl TokenReply {
    fn cors(status: u16) -> Self {
        Self {
            status,
            headers: vec![
                ("Access-Control-Allow-Origin", ALLOW_ORIGIN.to_string()),
                ("Access-Control-Allow-Methods", ALLOW_METHODS.to_string()),
                ("Access-Control-Allow-Headers", ALLOW_HEADERS.to_string()),
            ],
            body: String::new(),
        }
    }

    /// `200` with CORS headers and an empty body.
    pub fn preflight() -> Self {
        Self::cors(200)
    }

    pub fn json(status: u16, body: serde_json::Value) -> Self {
        let mut reply = Self::cors(status);
        reply
            .headers
            .push(("Content-Type", "application/json".to_string()));
        reply.body = body.to_string();
        reply
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "error": message }))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Handles one request to the token endpoint.
///
/// `OPTIONS` always succeeds regardless of configuration, `POST` issues a
/// token, anything else gets `405`. Issuance failures become `500` with
/// the error text in the body; nothing is retried or retained.
pub fn dispatch(method: &str, body: &[u8], config: &LiveKitConfig, clock: &dyn Clock) -> TokenReply {
    match method.to_ascii_uppercase().as_str() {
        "OPTIONS" => TokenReply::preflight(),
        "POST" => issue(body, config, clock),
        other => {
            warn!(method = other, "rejecting unsupported method on token endpoint");
            TokenReply::error(405, "Method not allowed")
        }
    }
}

fn issue(body: &[u8], config: &LiveKitConfig, clock: &dyn Clock) -> TokenReply {
    // Configuration first: an unconfigured issuer must not even parse the body.
    if let Err(e) = config.signing_key_pair() {
        return failure_reply(&e);
    }

    let request = parse_token_request(body);
    match issue_credential(
        config,
        request.room_name.as_deref(),
        request.participant_name.as_deref(),
        clock,
    ) {
        Ok(response) => TokenReply::json(
            200,
            json!({ "token": response.token, "url": response.url }),
        ),
        Err(e) => failure_reply(&e),
    }
}

/// `500` carrying the error text, for every [`IssueError`] variant.
fn failure_reply(e: &IssueError) -> TokenReply {
    error!(error = %e, "token issuance failed");
    TokenReply::error(500, &e.to_string())
}
