use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};

use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use sqlx::PgPool;

use crate::auth::rate_limit::RateLimiter;
use crate::auth::{password, session};
use crate::errors::{AppError, ErrorBody};
use crate::models::user::{self, CredentialsInput, NewUser};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    is_authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<session::SessionUser>,
}

fn validate_credentials(input: &CredentialsInput) -> Result<(), AppError> {
    let mut errors = BTreeMap::new();
    if input.username.trim().is_empty() {
        errors.insert("username".to_string(), "Campo obrigatório.".to_string());
    }
    if input.password.len() < MIN_PASSWORD_LEN {
        errors.insert(
            "password".to_string(),
            "A senha deve ter pelo menos 6 caracteres.".to_string(),
        );
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

async fn create_account(
    pool: &PgPool,
    input: &CredentialsInput,
    role: &str,
) -> Result<HttpResponse, AppError> {
    validate_credentials(input)?;
    let hash = password::hash_password(&input.password).map_err(AppError::Hash)?;
    let new = NewUser {
        username: input.username.trim().to_string(),
        password: hash,
        role: role.to_string(),
    };
    let id = user::create(pool, &new).await?;
    log::info!("created {} account '{}' (id {})", role, new.username, id);
    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Usuário registrado com sucesso.",
        "id": id,
    })))
}

/// POST /api/auth/register: self-service signup, always role 'user'.
pub async fn register(
    pool: web::Data<PgPool>,
    input: web::Json<CredentialsInput>,
) -> Result<HttpResponse, AppError> {
    create_account(&pool, &input, session::ROLE_USER).await
}

/// POST /api/auth/create-admin: admin-only creation of another admin.
pub async fn create_admin(
    pool: web::Data<PgPool>,
    session: Session,
    input: web::Json<CredentialsInput>,
) -> Result<HttpResponse, AppError> {
    session::require_admin(&session)?;
    create_account(&pool, &input, session::ROLE_ADMIN).await
}

/// POST /api/auth/login. Failed attempts are rate limited per IP before any
/// database access happens.
pub async fn login(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    session: Session,
    limiter: web::Data<RateLimiter>,
    input: web::Json<CredentialsInput>,
) -> Result<HttpResponse, AppError> {
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        log::warn!("login rate limit hit for {ip}");
        return Ok(HttpResponse::TooManyRequests().json(ErrorBody {
            error: "Muitas tentativas de login. Tente novamente mais tarde.".to_string(),
            fields: None,
        }));
    }

    let found = user::find_by_username(&pool, input.username.trim()).await?;
    let verified = match &found {
        Some(u) => {
            password::verify_password(&input.password, &u.password).map_err(AppError::Hash)?
        }
        None => false,
    };

    match found {
        Some(u) if verified => {
            limiter.clear(ip);
            session.renew();
            session::store_login(&session, u.id, &u.username, &u.role);
            log::info!("user '{}' logged in", u.username);
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "message": "Login realizado com sucesso.",
                "user": session::SessionUser {
                    id: u.id,
                    username: u.username,
                    role: u.role,
                },
            })))
        }
        _ => {
            limiter.record_failure(ip);
            Ok(HttpResponse::Unauthorized().json(ErrorBody {
                error: "Usuário ou senha inválidos.".to_string(),
                fields: None,
            }))
        }
    }
}

/// POST /api/auth/logout.
pub async fn logout(session: Session) -> Result<HttpResponse, AppError> {
    session.purge();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Logout realizado com sucesso.",
    })))
}

/// GET /api/auth/status: who the cookie says we are, if anyone.
pub async fn status(session: Session) -> Result<HttpResponse, AppError> {
    let user = session::current_user(&session);
    Ok(HttpResponse::Ok().json(StatusBody {
        is_authenticated: user.is_some(),
        user,
    }))
}

/// GET /api/users: non-admin accounts, for assigning form ownership.
pub async fn list_users(
    pool: web::Data<PgPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    session::require_admin(&session)?;
    let users = user::list_regular(&pool).await?;
    Ok(HttpResponse::Ok().json(users))
}
