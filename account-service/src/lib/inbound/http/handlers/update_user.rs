use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn update_user<US: UserServicePort>(
    State(state): State<AppState<US>>,
    Path(user_id): Path<String>,
    body: Result<Json<UpdateUserBody>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&user_id)
        .map_err(|_| ApiError::NotFound("user not found".to_string()))?;
    let Json(body) = body?;
    let command = UpdateUserCommand::try_from(body)?;

    let user = state.user_service.update_user(&user_id, command).await?;

    Ok(ApiSuccess::new(StatusCode::OK, UserData::from(&user)))
}

/// Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserBody {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    profile_pic: Option<String>,
}

impl TryFrom<UpdateUserBody> for UpdateUserCommand {
    type Error = UserError;

    fn try_from(body: UpdateUserBody) -> Result<Self, Self::Error> {
        Ok(UpdateUserCommand {
            username: body.username.map(Username::new).transpose()?,
            email: body.email.map(EmailAddress::new).transpose()?,
            password: body.password.map(Password::new).transpose()?,
            profile_pic: body.profile_pic,
        })
    }
}
