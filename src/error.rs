//! Error types.
//!
//! [`IssueError`] covers a single token request and is turned into an HTTP 500
//! reply at the request boundary. [`ConfigError`] is only raised at startup.

/// Failures while minting a LiveKit access token.
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    /// `LIVEKIT_API_KEY` or `LIVEKIT_API_SECRET` is unset or empty.
    #[error("Missing LiveKit credentials")]
    Configuration,

    /// The JWT signing step itself failed. The message reaches the caller.
    #[error("Error generating token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),

    /// `now + ttl` does not fit in a unix timestamp.
    #[error("Error generating token: expiry out of range")]
    ExpiryOutOfRange,
}

/// Invalid values in the process environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid SERVER_PORT: {0}")]
    InvalidPort(String),

    #[error("Invalid LIVEKIT_TOKEN_TTL (expected 1..=31536000 seconds): {0}")]
    InvalidTtl(String),
}

/// Failures in the `.cursorrules` generator.
#[cfg(feature = "rules")]
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("OpenAI API key not found, set OPENAI_API_KEY")]
    MissingApiKey,

    #[error("failed to reach the text generation API: {0}")]
    Http(#[from] reqwest::Error),

    #[error("text generation API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("text generation API returned no content")]
    EmptyCompletion,

    #[error("failed to write rules file: {0}")]
    Io(#[from] std::io::Error),
}
