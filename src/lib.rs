//! # tiny_livekit
//!
//! `tiny_livekit` is a small Actix-Web backend that issues [LiveKit](https://livekit.io)
//! access tokens, with an optional `.cursorrules` generator backed by an
//! OpenAI-compatible chat completions API.
//!
//! ## ✅ Features
//!
//! - 🎥 Short-lived HS256 LiveKit tokens scoped to a room and participant
//! - 🌍 Permissive CORS (`POST, OPTIONS`) for browser clients
//! - ☁️ Serverless adapter answering exactly like the HTTP server
//! - 🔐 Rate limiting with `actix-governor`
//! - 🧪 Environment file support (`.env`, `.env.production`, etc.)
//!
//! ## 🔧 Configuration
//!
//! Start the app like this:
//!
//! ```bash
//! cargo run -- .env.production
//! ```
//!
//! ### `.env` values (LiveKit)
//!
//! - `LIVEKIT_API_KEY` (required for issuance)
//! - `LIVEKIT_API_SECRET` (required for issuance)
//! - `LIVEKIT_URL=wss://your-project.livekit.cloud` (optional)
//! - `LIVEKIT_TOKEN_TTL=3600` (optional, seconds)
//!
//! ### Server & Rate Limiting
//!
//! - `SERVER_HOST=127.0.0.1`
//! - `SERVER_PORT=6666`
//! - `GOVERNOR_BURST=5`
//! - `GOVERNOR_PER_SECOND=2`
//!
//! ### Rules generator (only if `--features rules` is enabled)
//!
//! - `OPENAI_API_KEY`
//! - `OPENAI_BASE_URL=https://api.openai.com/v1`
//! - `OPENAI_MODEL` (optional, overrides the per-operation default: `gpt-4.1`, or `gpt-4o` for LiveKit rules)
//!
//! ## 📡 Endpoint
//!
//! `POST /api/token` with an optional JSON body
//! `{"roomName": "...", "participantName": "..."}` answers
//! `{"token": "...", "url": "..."}`. A body that is not valid JSON is
//! treated as `{}`.
//!
//! ## 📚 Modules
//!
//! - [`livekit`](crate::livekit) — token issuance and its HTTP/serverless adapters
//! - [`config`](crate::config) — server configuration
//! - [`utils`](crate::utils) — environment loader, tracing setup, clocks
//!
//! ### Rules (conditionally included)
//!
//! - [`rules`](crate::rules) — `.cursorrules` generation *(only with `--features rules`)*

pub mod config;
pub mod error;
pub mod livekit;
pub mod utils;

#[cfg(feature = "rules")]
pub mod rules;
