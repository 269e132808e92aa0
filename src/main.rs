use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use std::io;
use std::sync::Arc;
use tiny_livekit::config::AppConfig;
use tiny_livekit::livekit::{self, TOKEN_PATH};
use tiny_livekit::utils::{self, Clock, SystemClock};
use tracing::{info, warn};

/// The main entry point for the application.
///
/// Loads the env file named by the first command-line argument (default
/// `.env`), builds the configuration once, and serves the token endpoint
/// behind the rate limiter.
///
/// # Returns
///
/// An error if the configuration is invalid or the server cannot bind.
#[actix_web::main]
async fn main() -> io::Result<()> {
    // 👇 Load env file from args, before the subscriber reads RUST_LOG
    let env_file = utils::ensure_dotenv_loaded();
    utils::init_tracing();
    info!("📦 Loading environment from {env_file}");

    let config =
        AppConfig::load().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    if !config.livekit.is_configured() {
        warn!("⚠️  LIVEKIT_API_KEY / LIVEKIT_API_SECRET not set, token requests will fail with 500.");
    }

    let governor_conf = GovernorConfigBuilder::default()
        .burst_size(config.governor_burst)
        .seconds_per_request(config.governor_per_second)
        .finish()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "GOVERNOR_BURST and GOVERNOR_PER_SECOND must be non-zero",
            )
        })?;

    let bind = (config.server_host.clone(), config.server_port);
    info!("🚀 Server starting on http://{}:{}", bind.0, bind.1);
    info!(
        "🔗 Test: curl -X POST http://{}:{}{} -d '{{\"roomName\":\"TestRoom\",\"participantName\":\"TestUser\"}}'",
        bind.0, bind.1, TOKEN_PATH
    );

    let livekit_config = web::Data::new(config.livekit.clone());
    let clock: web::Data<dyn Clock> = web::Data::from(Arc::new(SystemClock) as Arc<dyn Clock>);

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(Logger::default())
            .app_data(livekit_config.clone())
            .app_data(clock.clone())
            .configure(livekit::configure)
    })
    .bind(bind)?
    .run()
    .await
}
