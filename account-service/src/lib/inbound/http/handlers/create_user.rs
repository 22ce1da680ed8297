use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Register a new account. Malformed fields answer 422 before the service runs.
pub async fn create_user<US: UserServicePort>(
    State(state): State<AppState<US>>,
    body: Result<Json<CreateUserBody>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = body?;
    let command = CreateUserCommand::try_from(body)?;
    let user = state.user_service.create_user(command).await?;

    Ok(ApiSuccess::new(StatusCode::CREATED, UserData::from(&user)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserBody {
    username: String,
    email: String,
    password: String,
    #[serde(default)]
    profile_pic: Option<String>,
}

impl TryFrom<CreateUserBody> for CreateUserCommand {
    type Error = UserError;

    fn try_from(body: CreateUserBody) -> Result<Self, Self::Error> {
        Ok(CreateUserCommand::new(
            Username::new(body.username)?,
            EmailAddress::new(body.email)?,
            Password::new(body.password)?,
            body.profile_pic,
        ))
    }
}
