#![allow(dead_code)]

use actix_web::{test, web, App};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use tiny_livekit::livekit::{self, LiveKitClaims, LiveKitConfig};
use tiny_livekit::utils::{Clock, FixedClock};

pub const API_KEY: &str = "APItestKey";
pub const API_SECRET: &str = "test-secret-with-enough-entropy-1234";
pub const NOW: i64 = 1_000_000_000;

pub fn test_config() -> LiveKitConfig {
    LiveKitConfig::new(API_KEY, API_SECRET)
}

pub async fn setup_test_app(
    config: LiveKitConfig,
    now: i64,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(now));
    test::init_service(
        App::new()
            .app_data(web::Data::new(config))
            .app_data(web::Data::from(clock))
            .configure(livekit::configure),
    )
    .await
}

/// Decodes the payload segment without checking the signature.
pub fn decode_payload(token: &str) -> LiveKitClaims {
    let payload = token.split('.').nth(1).expect("token has a payload segment");
    let bytes = URL_SAFE_NO_PAD.decode(payload).expect("payload is base64url");
    serde_json::from_slice(&bytes).expect("payload is LiveKit claims")
}

/// Recomputes the HS256 signature over `header.payload` and compares.
pub fn signature_matches(token: &str, secret: &str) -> bool {
    let Some((signing_input, signature)) = token.rsplit_once('.') else {
        return false;
    };
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("any key length");
    mac.update(signing_input.as_bytes());
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()) == signature
}
