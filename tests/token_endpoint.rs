// tests/token_endpoint.rs

use actix_web::test as actix_test;
use actix_web::{http::header, http::StatusCode};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};

use tiny_livekit::livekit::{issue_credential, LiveKitConfig, Permissions, TOKEN_PATH};
use tiny_livekit::error::IssueError;
use tiny_livekit::utils::Clock;

mod common;
use common::{decode_payload, setup_test_app, signature_matches, test_config, API_KEY, API_SECRET, NOW};

fn assert_cors(resp: &actix_web::dev::ServiceResponse) {
    let headers = resp.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(headers.get("access-control-allow-methods").unwrap(), "POST, OPTIONS");
    assert_eq!(headers.get("access-control-allow-headers").unwrap(), "Content-Type");
}

#[actix_web::test]
async fn test_design_review_scenario() {
    let app = setup_test_app(test_config(), NOW).await;
    let req = actix_test::TestRequest::post()
        .uri(TOKEN_PATH)
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(r#"{"roomName": "design-review", "participantName": "alice"}"#)
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_cors(&resp);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "application/json");

    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["url"], "wss://your-project.livekit.cloud");
    let token = body["token"].as_str().expect("token is a string");
    assert_eq!(token.split('.').count(), 3);
    assert!(signature_matches(token, API_SECRET));

    let claims = decode_payload(token);
    assert_eq!(claims.room, "design-review");
    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.iss, API_KEY);
    assert_eq!(claims.aud, "livekit");
    assert_eq!(claims.iat, 1_000_000_000);
    assert_eq!(claims.nbf, 1_000_000_000);
    assert_eq!(claims.exp, 1_000_003_600);
    assert_eq!(claims.permissions, Permissions::full());
}

#[actix_web::test]
async fn test_configured_url_is_returned() {
    let config = test_config().with_url("wss://media.example.com");
    let app = setup_test_app(config, NOW).await;
    let req = actix_test::TestRequest::post().uri(TOKEN_PATH).set_payload("{}").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["url"], "wss://media.example.com");
}

#[actix_web::test]
async fn test_absent_fields_use_defaults() {
    let app = setup_test_app(test_config(), NOW).await;
    let req = actix_test::TestRequest::post().uri(TOKEN_PATH).set_payload("{}").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    let claims = decode_payload(body["token"].as_str().unwrap());
    assert_eq!(claims.room, "default-room");
    assert_eq!(claims.sub, "user-1000000000");
}

#[actix_web::test]
async fn test_empty_room_is_not_defaulted() {
    let app = setup_test_app(test_config(), NOW).await;
    let req = actix_test::TestRequest::post()
        .uri(TOKEN_PATH)
        .set_payload(r#"{"roomName": ""}"#)
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    let claims = decode_payload(body["token"].as_str().unwrap());
    assert_eq!(claims.room, "");
    assert_eq!(claims.sub, "user-1000000000");
}

#[actix_web::test]
async fn test_truncated_json_falls_back_to_defaults() {
    let app = setup_test_app(test_config(), NOW).await;
    let req = actix_test::TestRequest::post()
        .uri(TOKEN_PATH)
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(r#"{"roomName": "design-rev"#)
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(resp).await;
    let claims = decode_payload(body["token"].as_str().unwrap());
    assert_eq!(claims.room, "default-room");
    assert_eq!(claims.sub, "user-1000000000");
}

#[actix_web::test]
async fn test_wrongly_typed_room_keeps_participant() {
    let app = setup_test_app(test_config(), NOW).await;
    let req = actix_test::TestRequest::post()
        .uri(TOKEN_PATH)
        .set_payload(r#"{"roomName": 5, "participantName": "alice"}"#)
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    let claims = decode_payload(body["token"].as_str().unwrap());
    assert_eq!(claims.room, "default-room");
    assert_eq!(claims.sub, "alice");
}

#[actix_web::test]
async fn test_missing_body_falls_back_to_defaults() {
    let app = setup_test_app(test_config(), NOW).await;
    let req = actix_test::TestRequest::post().uri(TOKEN_PATH).to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_missing_credentials_is_server_error() {
    let app = setup_test_app(LiveKitConfig::unconfigured(), NOW).await;
    let req = actix_test::TestRequest::post()
        .uri(TOKEN_PATH)
        .set_payload(r#"{"roomName": "design-review"}"#)
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&resp);
    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing LiveKit credentials");
    assert!(body.get("token").is_none());
}

#[actix_web::test]
async fn test_options_succeeds_without_credentials() {
    let app = setup_test_app(LiveKitConfig::unconfigured(), NOW).await;
    let req = actix_test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri(TOKEN_PATH)
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_cors(&resp);
    let body = actix_test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn test_get_is_method_not_allowed() {
    let app = setup_test_app(test_config(), NOW).await;
    let req = actix_test::TestRequest::get().uri(TOKEN_PATH).to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors(&resp);
}

#[actix_web::test]
async fn test_same_second_same_inputs_same_token() {
    let app = setup_test_app(test_config(), NOW).await;
    let mut tokens = Vec::new();
    for _ in 0..2 {
        let req = actix_test::TestRequest::post()
            .uri(TOKEN_PATH)
            .set_payload(r#"{"roomName": "r", "participantName": "p"}"#)
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;
        tokens.push(body["token"].as_str().unwrap().to_string());
    }
    assert_eq!(tokens[0], tokens[1]);
    assert_eq!(decode_payload(&tokens[0]).iat, NOW);
}

#[actix_web::test]
async fn test_custom_ttl() {
    let app = setup_test_app(test_config().with_ttl(600), NOW).await;
    let req = actix_test::TestRequest::post().uri(TOKEN_PATH).to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    let claims = decode_payload(body["token"].as_str().unwrap());
    assert_eq!(claims.exp - claims.iat, 600);
    assert_eq!(claims.nbf, claims.iat);
}

struct CountingClock(AtomicUsize);

impl Clock for CountingClock {
    fn now_unix(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst);
        NOW
    }
}

#[test]
fn test_unconfigured_issuer_never_reaches_signing() {
    let clock = CountingClock(AtomicUsize::new(0));
    let err = issue_credential(&LiveKitConfig::unconfigured(), None, None, &clock).unwrap_err();
    assert!(matches!(err, IssueError::Configuration));
    assert_eq!(clock.0.load(Ordering::SeqCst), 0);
}
