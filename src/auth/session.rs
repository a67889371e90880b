use actix_session::Session;
use serde::Serialize;

use crate::errors::AppError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// The authenticated identity stored in the cookie session.
#[derive(Serialize, Debug, Clone)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub role: String,
}

pub fn store_login(session: &Session, id: i64, username: &str, role: &str) {
    let _ = session.insert("user_id", id);
    let _ = session.insert("username", username);
    let _ = session.insert("role", role);
}

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

pub fn get_role(session: &Session) -> Option<String> {
    session.get::<String>("role").unwrap_or(None)
}

/// Current session identity, or None when not logged in.
pub fn current_user(session: &Session) -> Option<SessionUser> {
    let id = get_user_id(session)?;
    let username = session.get::<String>("username").unwrap_or(None)?;
    let role = get_role(session)?;
    Some(SessionUser { id, username, role })
}

/// Require a logged-in session.
pub fn require_login(session: &Session) -> Result<SessionUser, AppError> {
    current_user(session).ok_or(AppError::Unauthorized)
}

/// Require a logged-in admin.
pub fn require_admin(session: &Session) -> Result<SessionUser, AppError> {
    let user = require_login(session)?;
    if user.role == ROLE_ADMIN {
        Ok(user)
    } else {
        Err(AppError::Forbidden(
            "Acesso restrito a administradores.".to_string(),
        ))
    }
}
