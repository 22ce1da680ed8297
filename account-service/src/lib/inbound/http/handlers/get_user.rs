use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::UserProfileData;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_user<US: UserServicePort>(
    State(state): State<AppState<US>>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserProfileData>, ApiError> {
    // An id that cannot exist is reported like any unknown id.
    let user_id = UserId::from_string(&user_id)
        .map_err(|_| ApiError::NotFound("user not found".to_string()))?;

    state
        .user_service
        .get_user_profile(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}
