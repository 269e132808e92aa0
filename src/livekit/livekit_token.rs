use crate::error::{ConfigError, IssueError};
use crate::utils::Clock;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use std::fmt;
use tracing::{debug, info};

/// Room used when the request does not name one.
pub const DEFAULT_ROOM: &str = "default-room";
/// Prefix of the generated participant identity (`user-<unix seconds>`).
pub const PARTICIPANT_PREFIX: &str = "user-";
/// `aud` claim expected by the LiveKit server.
pub const AUDIENCE: &str = "livekit";
/// Returned as `url` when `LIVEKIT_URL` is unset.
pub const DEFAULT_URL: &str = "wss://your-project.livekit.cloud";
pub const DEFAULT_TTL_SECS: i64 = 3600;
/// Longest accepted `LIVEKIT_TOKEN_TTL`: one year.
pub const MAX_TTL_SECS: i64 = 31_536_000;

/// Represents the configuration required for LiveKit token issuance.
///
/// Built once at startup and shared read-only by every request. The signing
/// key pair is optional here: a server without credentials still starts and
/// answers CORS preflights, but every issuance request fails with
/// [`IssueError::Configuration`].
///
/// # Fields
///
/// - `api_key`: the LiveKit API key, copied into the `iss` claim.
/// - `api_secret`: the shared HS256 secret used to sign tokens.
/// - `url`: the WebSocket endpoint clients should connect to.
/// - `ttl_secs`: lifetime of each issued token.
#[derive(Clone)]
pub struct LiveKitConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub url: String,
    pub ttl_secs: i64,
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("url", &self.url)
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl LiveKitConfig {
    /// A fully configured issuer with the default endpoint and TTL.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
            url: DEFAULT_URL.to_string(),
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }

    /// An issuer with no signing key pair.
    pub fn unconfigured() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            url: DEFAULT_URL.to_string(),
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_ttl(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Loads the LiveKit configuration from environment variables.
    ///
    /// Reads `LIVEKIT_API_KEY`, `LIVEKIT_API_SECRET`, `LIVEKIT_URL` and
    /// `LIVEKIT_TOKEN_TTL`. Missing credentials are not an error at this
    /// point; only a malformed TTL is.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`LiveKitConfig::load`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let ttl_secs = match lookup("LIVEKIT_TOKEN_TTL") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|ttl| (1..=MAX_TTL_SECS).contains(ttl))
                .ok_or(ConfigError::InvalidTtl(raw))?,
            None => DEFAULT_TTL_SECS,
        };

        Ok(Self {
            api_key: non_empty("LIVEKIT_API_KEY"),
            api_secret: non_empty("LIVEKIT_API_SECRET"),
            url: lookup("LIVEKIT_URL").unwrap_or_else(|| DEFAULT_URL.to_string()),
            ttl_secs,
        })
    }

    /// Returns `(api_key, api_secret)` or [`IssueError::Configuration`].
    pub fn signing_key_pair(&self) -> Result<(&str, &str), IssueError> {
        match (self.api_key.as_deref(), self.api_secret.as_deref()) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Ok((key, secret))
            }
            _ => Err(IssueError::Configuration),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.signing_key_pair().is_ok()
    }
}

/// Capabilities granted inside the room. Issued tokens always carry all four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_publish: bool,
    pub can_subscribe: bool,
    pub can_publish_data: bool,
    pub can_update_metadata: bool,
}

impl Permissions {
    pub const fn full() -> Self {
        Self {
            can_publish: true,
            can_subscribe: true,
            can_publish_data: true,
            can_update_metadata: true,
        }
    }
}

/// JWT payload of a LiveKit access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveKitClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: i64,
    pub nbf: i64,
    pub iat: i64,
    pub room: String,
    pub permissions: Permissions,
}

impl LiveKitClaims {
    /// Claims for `participant` in `room`, valid from `now` for `ttl_secs`.
    ///
    /// Fails with [`IssueError::ExpiryOutOfRange`] when `now + ttl_secs`
    /// overflows.
    pub fn new(
        api_key: &str,
        room: &str,
        participant: &str,
        now: i64,
        ttl_secs: i64,
    ) -> Result<Self, IssueError> {
        let exp = now.checked_add(ttl_secs).ok_or(IssueError::ExpiryOutOfRange)?;
        Ok(Self {
            iss: api_key.to_string(),
            sub: participant.to_string(),
            aud: AUDIENCE.to_string(),
            exp,
            nbf: now,
            iat: now,
            room: room.to_string(),
            permissions: Permissions::full(),
        })
    }
}

/// Represents the JSON body of a token request.
///
/// Both fields are optional. An absent field gets its default during
/// issuance; a field present as `""` is kept as the empty string.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    pub room_name: Option<String>,
    pub participant_name: Option<String>,
}

/// Represents the response containing a LiveKit access token.
///
/// # Fields
///
/// - `token`: the signed JWT (`header.payload.signature`, base64url).
/// - `url`: the LiveKit endpoint the client should connect to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub url: String,
}

/// Parses a token request body.
///
/// An empty body, invalid JSON, or a JSON value that is not an object is
/// treated as a request with no fields at all. Each field is read on its own:
/// a non-string value counts as absent without discarding the other field.
/// On duplicate keys the last occurrence wins.
pub fn parse_token_request(body: &[u8]) -> TokenRequest {
    if body.is_empty() {
        return TokenRequest::default();
    }
    let value = match serde_json::from_slice::<Value>(body) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "unparseable token request body, using defaults");
            return TokenRequest::default();
        }
    };
    let Some(object) = value.as_object() else {
        debug!("token request body is not an object, using defaults");
        return TokenRequest::default();
    };
    let field = |name: &str| object.get(name).and_then(Value::as_str).map(str::to_string);

    TokenRequest {
        room_name: field("roomName"),
        participant_name: field("participantName"),
    }
}

/// Issues a LiveKit access token.
///
/// The signing key pair is checked before anything else, so a missing
/// configuration never reaches the clock or the signer. Missing `room_name`
/// becomes [`DEFAULT_ROOM`], missing `participant_name` becomes
/// `user-<now>`.
///
/// # Returns
///
/// The signed token plus the configured connection URL, or an
/// [`IssueError`] for the request boundary to turn into an HTTP 500.
pub fn issue_credential(
    config: &LiveKitConfig,
    room_name: Option<&str>,
    participant_name: Option<&str>,
    clock: &dyn Clock,
) -> Result<TokenResponse, IssueError> {
    let (api_key, api_secret) = config.signing_key_pair()?;

    let now = clock.now_unix();
    let room = room_name.map_or_else(|| DEFAULT_ROOM.to_string(), str::to_string);
    let participant = participant_name
        .map_or_else(|| format!("{PARTICIPANT_PREFIX}{now}"), str::to_string);

    let claims = LiveKitClaims::new(api_key, &room, &participant, now, config.ttl_secs)?;
    let token = sign_claims(&claims, api_secret)?;

    info!(room = %claims.room, participant = %claims.sub, exp = claims.exp, "issued LiveKit token");

    Ok(TokenResponse {
        token,
        url: config.url.clone(),
    })
}

/// Signs `claims` with HS256.
pub fn sign_claims(claims: &LiveKitClaims, api_secret: &str) -> Result<String, IssueError> {
    let header = Header::new(Algorithm::HS256);
    let token = encode(&header, claims, &EncodingKey::from_secret(api_secret.as_bytes()))?;
    Ok(token)
}
