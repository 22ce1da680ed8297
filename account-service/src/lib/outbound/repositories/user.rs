use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Song;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSummary;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::StoreError;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = "id, username, email, password_hash, profile_pic, created_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    profile_pic: String,
    created_at: DateTime<Utc>,
}

/// Stored rows are trusted; validation happens on the way in.
impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId(row.id),
            username: Username::from_stored(row.username),
            email: EmailAddress::from_stored(row.email),
            password_hash: row.password_hash,
            profile_pic: row.profile_pic,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserSummaryRow {
    id: Uuid,
    username: String,
    profile_pic: String,
}

impl From<UserSummaryRow> for UserSummary {
    fn from(row: UserSummaryRow) -> Self {
        UserSummary {
            id: UserId(row.id),
            username: Username::from_stored(row.username),
            profile_pic: row.profile_pic,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SongRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    artist: String,
    created_at: DateTime<Utc>,
}

impl From<SongRow> for Song {
    fn from(row: SongRow) -> Self {
        Song {
            id: row.id,
            owner_id: UserId(row.owner_id),
            title: row.title,
            artist: row.artist,
            created_at: row.created_at,
        }
    }
}

fn lookup_failed(e: sqlx::Error) -> UserError {
    StoreError::LookupFailed(e.to_string()).into()
}

/// Map a failed insert/update, turning unique violations into conflicts.
fn write_failed(e: sqlx::Error, user: &User) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some("users_username_key") => {
                    return UserError::UsernameAlreadyExists(user.username.to_string());
                }
                Some("users_email_key") => {
                    return UserError::EmailAlreadyExists(user.email.to_string());
                }
                _ => {}
            }
        }
    }
    StoreError::WriteFailed(e.to_string()).into()
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, profile_pic, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.profile_pic)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_failed(e, &user))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        sqlx::query_as::<_, UserRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(lookup_failed)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let query = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);

        sqlx::query_as::<_, UserRow>(&query)
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(lookup_failed)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);

        sqlx::query_as::<_, UserRow>(&query)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(lookup_failed)
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let query = format!("SELECT {} FROM users ORDER BY created_at DESC", USER_COLUMNS);

        sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(User::from).collect())
            .map_err(lookup_failed)
    }

    async fn find_songs(&self, owner: &UserId) -> Result<Vec<Song>, UserError> {
        let rows = sqlx::query_as::<_, SongRow>(
            r#"
            SELECT id, owner_id, title, artist, created_at
            FROM songs
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(lookup_failed)?;

        Ok(rows.into_iter().map(Song::from).collect())
    }

    async fn find_followers(&self, id: &UserId) -> Result<Vec<UserSummary>, UserError> {
        sqlx::query_as::<_, UserSummaryRow>(
            r#"
            SELECT u.id, u.username, u.profile_pic
            FROM follows f
            JOIN users u ON u.id = f.follower_id
            WHERE f.followee_id = $1
            ORDER BY u.username
            "#,
        )
        .bind(id.0)
        .fetch_all(&self.pool)
        .await
        .map(|rows| rows.into_iter().map(UserSummary::from).collect())
        .map_err(lookup_failed)
    }

    async fn find_following(&self, id: &UserId) -> Result<Vec<UserSummary>, UserError> {
        sqlx::query_as::<_, UserSummaryRow>(
            r#"
            SELECT u.id, u.username, u.profile_pic
            FROM follows f
            JOIN users u ON u.id = f.followee_id
            WHERE f.follower_id = $1
            ORDER BY u.username
            "#,
        )
        .bind(id.0)
        .fetch_all(&self.pool)
        .await
        .map(|rows| rows.into_iter().map(UserSummary::from).collect())
        .map_err(lookup_failed)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, profile_pic = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.profile_pic)
        .execute(&self.pool)
        .await
        .map_err(|e| write_failed(e, &user))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::from(StoreError::WriteFailed(e.to_string())))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
