use crate::livekit::dispatch::{dispatch, TokenReply};
use crate::livekit::livekit_token::LiveKitConfig;
use crate::utils::Clock;
use actix_web::http::{Method, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};

/// Path of the token endpoint.
pub const TOKEN_PATH: &str = "/api/token";

/// Actix-Web handler for `POST` and `OPTIONS` on [`TOKEN_PATH`].
///
/// Expects `web::Data<LiveKitConfig>` and `web::Data<dyn Clock>` in the app
/// data. The body is taken as raw bytes so a malformed or missing JSON body
/// never trips an extractor error; [`dispatch`] falls back to defaults.
pub async fn token_handler(
    req: HttpRequest,
    body: web::Bytes,
    config: web::Data<LiveKitConfig>,
    clock: web::Data<dyn Clock>,
) -> HttpResponse {
    let reply = dispatch(req.method().as_str(), &body, config.get_ref(), clock.get_ref());
    into_http_response(reply)
}

fn into_http_response(reply: TokenReply) -> HttpResponse {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = HttpResponse::build(status);
    for (name, value) in reply.headers {
        builder.insert_header((name, value));
    }
    builder.body(reply.body)
}

/// Mounts the token endpoint. Other verbs on the path get `405` from [`dispatch`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(TOKEN_PATH)
            .route(web::post().to(token_handler))
            .route(web::method(Method::OPTIONS).to(token_handler))
            .default_service(web::route().to(token_handler)),
    );
}
