use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginSession;
use crate::domain::user::models::Password;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Log in with username and password.
///
/// The token is returned twice: raw in the `authorization` response header
/// and in the `token` body field. A body missing either credential gets the
/// same answer as a wrong password.
pub async fn login<US: UserServicePort>(
    State(state): State<AppState<US>>,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "Unreadable login body");
        ApiError::from(UserError::InvalidCredentials)
    })?;

    // An empty password can never match; answer like any other bad login.
    let password =
        Password::new(body.password).map_err(|_| ApiError::from(UserError::InvalidCredentials))?;

    let session = state
        .user_service
        .login(LoginCommand {
            username: body.username,
            password,
        })
        .await
        .map_err(ApiError::from)?;

    let data = LoginResponseData::from(&session);

    Ok((
        [(header::AUTHORIZATION, session.token)],
        ApiSuccess::new(StatusCode::OK, data),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    #[serde(flatten)]
    pub user: UserData,
    pub token: String,
}

impl From<&LoginSession> for LoginResponseData {
    fn from(session: &LoginSession) -> Self {
        Self {
            user: (&session.user).into(),
            token: session.token.clone(),
        }
    }
}
