use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginSession;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::Username;
use crate::domain::user::models::DEFAULT_PROFILE_PIC;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuing
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn hash_password(&self, password: &Password) -> Result<String, UserError> {
        self.authenticator
            .hash_password(password.as_str())
            .map_err(|e| UserError::Internal(format!("Password hashing failed: {}", e)))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let (by_username, by_email) = tokio::try_join!(
            self.repository.find_by_username(&command.username),
            self.repository.find_by_email(&command.email),
        )?;

        if by_email.is_some() {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }
        if by_username.is_some() {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let password_hash = self.hash_password(&command.password)?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            profile_pic: command
                .profile_pic
                .unwrap_or_else(|| DEFAULT_PROFILE_PIC.to_string()),
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User created");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_profile(&self, id: &UserId) -> Result<UserProfile, UserError> {
        let user = self.get_user(id).await?;

        let (songs, followers, following) = tokio::try_join!(
            self.repository.find_songs(id),
            self.repository.find_followers(id),
            self.repository.find_following(id),
        )?;

        Ok(UserProfile {
            user,
            songs,
            followers,
            following,
        })
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_username) = command.username {
            if new_username != user.username {
                let taken = self.repository.find_by_username(&new_username).await?;
                if taken.is_some_and(|other| other.id != user.id) {
                    return Err(UserError::UsernameAlreadyExists(new_username.to_string()));
                }
                user.username = new_username;
            }
        }

        if let Some(new_email) = command.email {
            if new_email != user.email {
                let taken = self.repository.find_by_email(&new_email).await?;
                if taken.is_some_and(|other| other.id != user.id) {
                    return Err(UserError::EmailAlreadyExists(new_email.to_string()));
                }
                user.email = new_email;
            }
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.hash_password(&new_password)?;
        }

        if let Some(profile_pic) = command.profile_pic {
            user.profile_pic = profile_pic;
        }

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginSession, UserError> {
        // A name that can never have been registered is treated as unknown.
        let user = match Username::new(command.username) {
            Ok(username) => self.repository.find_by_username(&username).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            self.authenticator.verify_decoy(command.password.as_str());
            tracing::info!("Login rejected");
            return Err(UserError::InvalidCredentials);
        };

        let issued = self
            .authenticator
            .authenticate(
                command.password.as_str(),
                &user.password_hash,
                user.id,
                Utc::now(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::info!("Login rejected");
                    UserError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(
                        user_id = %user.id,
                        error = %err,
                        "Stored password hash could not be verified"
                    );
                    UserError::InvalidCredentials
                }
                AuthenticationError::JwtError(err) => {
                    UserError::Internal(format!("Token generation failed: {}", err))
                }
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginSession {
            user,
            token: issued.access_token,
            issued_at: issued.claims.iat,
            expires_at: issued.claims.exp,
        })
    }
}
