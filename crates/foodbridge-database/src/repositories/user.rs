//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_entity::user::model::{CreateUser, DeliveryLocation};
use foodbridge_entity::user::{ApprovalStatus, User, UserRole};

/// Repository for account CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find an account by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// Create a new account.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, display_name, role, approval_status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.display_name)
        .bind(data.role)
        .bind(data.approval_status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::conflict(format!("Username '{}' already exists", data.username))
            }
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("Email already in use".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// List accounts of a role with a given approval status.
    pub async fn find_by_role_and_approval(
        &self,
        role: UserRole,
        approval: ApprovalStatus,
    ) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role = $1 AND approval_status = $2 ORDER BY created_at ASC",
        )
        .bind(role)
        .bind(approval)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users by role", e))
    }

    /// Flip an account's approval status, guarded on the current one.
    ///
    /// Returns `None` when the account was not in `from` anymore.
    pub async fn update_approval(
        &self,
        user_id: Uuid,
        from: ApprovalStatus,
        to: ApprovalStatus,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET approval_status = $3, updated_at = NOW() \
             WHERE id = $1 AND approval_status = $2 RETURNING *",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update approval", e))
    }

    /// Set an NGO's drop-off location.
    pub async fn update_delivery_location(
        &self,
        user_id: Uuid,
        location: &DeliveryLocation,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET delivery_lat = $2, delivery_lng = $3, delivery_address = $4, \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(location.lat)
        .bind(location.lng)
        .bind(&location.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update delivery location", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }
}
