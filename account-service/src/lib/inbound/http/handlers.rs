use auth::AuthRejection;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::Song;
use crate::domain::user::models::User;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::UserSummary;
use crate::user::errors::UserError;

pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod get_user_by_username;
pub mod list_users;
pub mod login;
pub mod update_user;
pub mod verify_token;

const INTERNAL_ERROR_MESSAGE: &str = "internal server error";
const INVALID_BODY_MESSAGE: &str = "request body is invalid";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Centralized error responder.
///
/// Every handler and the auth middleware fail through this type, so the
/// mapping from error kind to status code lives in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody::new(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByUsername(_) => {
                ApiError::NotFound(err.to_string())
            }
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidCredentials => ApiError::BadRequest(err.to_string()),
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::Store(_) | UserError::Internal(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<AuthRejection> for ApiError {
    fn from(rejection: AuthRejection) -> Self {
        match rejection.status_code() {
            401 => ApiError::Unauthorized(rejection.to_string()),
            _ => ApiError::InternalServerError(rejection.to_string()),
        }
    }
}

/// Unreadable bodies answer 422 without echoing the parser's detail.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        ApiError::UnprocessableEntity(INVALID_BODY_MESSAGE.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub status_code: u16,
    pub error: String,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, error: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            error,
        }
    }
}

/// Sanitized user: everything but the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub profile_pic: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            profile_pic: user.profile_pic.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummaryData {
    pub id: String,
    pub username: String,
    pub profile_pic: String,
}

impl From<&UserSummary> for UserSummaryData {
    fn from(summary: &UserSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            username: summary.username.as_str().to_string(),
            profile_pic: summary.profile_pic.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongData {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Song> for SongData {
    fn from(song: &Song) -> Self {
        Self {
            id: song.id.to_string(),
            title: song.title.clone(),
            artist: song.artist.clone(),
            created_at: song.created_at,
        }
    }
}

/// Sanitized user enriched with its relationship sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfileData {
    #[serde(flatten)]
    pub user: UserData,
    pub songs: Vec<SongData>,
    pub followers: Vec<UserSummaryData>,
    pub following: Vec<UserSummaryData>,
}

impl From<&UserProfile> for UserProfileData {
    fn from(profile: &UserProfile) -> Self {
        Self {
            user: (&profile.user).into(),
            songs: profile.songs.iter().map(SongData::from).collect(),
            followers: profile.followers.iter().map(UserSummaryData::from).collect(),
            following: profile.following.iter().map(UserSummaryData::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;
    use crate::domain::user::models::DEFAULT_PROFILE_PIC;
    use crate::user::errors::StoreError;

    fn user() -> User {
        User {
            id: UserId::new(),
            username: Username::new("djshmarl".to_string()).unwrap(),
            email: EmailAddress::new("dj@example.com".to_string()).unwrap(),
            password_hash: "$2b$04$secret-hash-value".to_string(),
            profile_pic: DEFAULT_PROFILE_PIC.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_data_has_no_password_hash() {
        let value = serde_json::to_value(UserData::from(&user())).unwrap();
        let rendered = value.to_string();

        assert!(value.get("password_hash").is_none());
        assert!(value.get("hashedPassword").is_none());
        assert!(!rendered.contains("secret-hash-value"));
        assert_eq!(value["username"], "djshmarl");
    }

    #[test]
    fn test_profile_data_flattens_user() {
        let profile = UserProfile {
            user: user(),
            songs: vec![],
            followers: vec![],
            following: vec![],
        };

        let value = serde_json::to_value(UserProfileData::from(&profile)).unwrap();

        assert_eq!(value["username"], "djshmarl");
        assert!(value["songs"].as_array().unwrap().is_empty());
        assert!(value["followers"].is_array());
        assert!(value["following"].is_array());
        assert!(!value.to_string().contains("secret-hash-value"));
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            ApiError::from(UserError::InvalidCredentials),
            ApiError::BadRequest("username or password is incorrect".to_string())
        );
        assert!(matches!(
            ApiError::from(UserError::UsernameAlreadyExists("dj".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::NotFound("id".to_string())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::Store(StoreError::LookupFailed(
                "relation users does not exist".to_string()
            ))),
            ApiError::InternalServerError(_)
        ));
        assert!(matches!(
            ApiError::from(AuthRejection::ExpiredToken),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(AuthRejection::VerificationFailure),
            ApiError::InternalServerError(_)
        ));
    }

    #[tokio::test]
    async fn test_internal_error_does_not_leak_detail() {
        let response = ApiError::InternalServerError("relation users does not exist".to_string())
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(body["status_code"], 500);
        assert_eq!(body["error"], "internal server error");
    }
}
