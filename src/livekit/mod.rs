pub mod dispatch;
pub mod handlers;
pub mod livekit_token;
pub mod serverless;

pub use dispatch::{dispatch, TokenReply};
pub use handlers::{configure, token_handler, TOKEN_PATH};
pub use livekit_token::{
    issue_credential, parse_token_request, LiveKitClaims, LiveKitConfig, Permissions,
    TokenRequest, TokenResponse,
};
