// --- File: src/config.rs ---

use crate::error::ConfigError;
use crate::livekit::LiveKitConfig;
use std::env;

// --- Unified Configuration Struct ---
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,

    // --- Rate limiting (actix-governor) ---
    pub governor_burst: u32,
    pub governor_per_second: u64,

    pub livekit: LiveKitConfig,
}

impl AppConfig {
    // Load configuration from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".into());

        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 6666,
        };

        // Unparseable governor values fall back to the defaults.
        let governor_burst = lookup("GOVERNOR_BURST")
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);
        let governor_per_second = lookup("GOVERNOR_PER_SECOND")
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);

        let livekit = LiveKitConfig::from_lookup(&lookup)?;

        Ok(AppConfig {
            server_host,
            server_port,
            governor_burst,
            governor_per_second,
            livekit,
        })
    }
}
