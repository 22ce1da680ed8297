use auth::AuthRejection;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the access token and adds the caller to request extensions.
///
/// The `Authorization` header carries the raw token; a `Bearer ` prefix is
/// tolerated. Rejections short-circuit with the matching status and message.
pub async fn authenticate<US: UserServicePort>(
    State(state): State<AppState<US>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = match req.headers().get(header::AUTHORIZATION) {
        None => state.authenticator.authenticate_token(None, Utc::now()),
        Some(value) => match value.to_str() {
            Ok(raw) => state.authenticator.authenticate_token(Some(raw), Utc::now()),
            Err(_) => return Err(reject(AuthRejection::InvalidToken)),
        },
    }
    .into_result()
    .map_err(reject)?;

    let user_id = UserId::from_string(&claims.identity).map_err(|e| {
        tracing::warn!(error = %e, "Token identity is not a user id");
        reject(AuthRejection::InvalidToken)
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn reject(rejection: AuthRejection) -> ApiError {
    tracing::warn!(reason = %rejection, "Request rejected by auth guard");
    ApiError::from(rejection)
}
