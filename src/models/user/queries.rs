use sqlx::PgPool;

use super::types::{NewUser, User, UserPublic};
use crate::errors::AppError;

/// Find a user by username for authentication. Returns the internal row
/// with the password hash.
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password, role, created_at, updated_at \
         FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Create a user. Duplicate usernames surface as a field-keyed error.
pub async fn create(pool: &PgPool, new: &NewUser) -> Result<i64, AppError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, password, role) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&new.username)
    .bind(&new.password)
    .bind(&new.role)
    .fetch_one(pool)
    .await
    .map_err(crate::models::map_unique_violation)?;
    Ok(id)
}

/// All non-admin accounts, for the admin user listing.
pub async fn list_regular(pool: &PgPool) -> Result<Vec<UserPublic>, AppError> {
    let users = sqlx::query_as::<_, UserPublic>(
        "SELECT id, username, role, created_at FROM users \
         WHERE role = 'user' ORDER BY username",
    )
    .fetch_all(pool)
    .await?;
    Ok(users)
}
