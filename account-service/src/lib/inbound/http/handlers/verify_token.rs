use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

/// Reached only through the auth middleware, so arriving here means the
/// presented token is valid.
pub async fn verify_token() -> ApiSuccess<TokenStatusData> {
    ApiSuccess::new(
        StatusCode::OK,
        TokenStatusData {
            message: "token valid".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenStatusData {
    pub message: String,
}
