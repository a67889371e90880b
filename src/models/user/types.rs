use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Internal user row, password hash included. Never serialized to clients.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-facing view of a user.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Credentials payload for register/login/create-admin.
#[derive(Debug, Deserialize)]
pub struct CredentialsInput {
    pub username: String,
    pub password: String,
}
