pub mod auth_handlers;
pub mod form_handlers;
pub mod report_handlers;
pub mod submission_handlers;
pub mod upload_handlers;

use actix_web::{HttpResponse, middleware, web};

use crate::auth::middleware::require_auth;
use crate::errors::{AppError, ErrorBody};

/// Parse a path segment as a numeric id. Malformed ids are a client error,
/// not a routing miss.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::BadId(raw.to_string()))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody {
        error: "Rota não encontrada.".to_string(),
        fields: None,
    })
}

/// The API route table. Prefixes whose every route needs a session are
/// gated by the auth middleware; mixed prefixes (public and protected
/// routes side by side) rely on the per-handler session checks, so an
/// unknown path still falls through to the JSON 404 instead of a 401.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/auth/register", web::post().to(auth_handlers::register))
        .route("/api/auth/login", web::post().to(auth_handlers::login))
        .route("/api/auth/logout", web::post().to(auth_handlers::logout))
        .route("/api/auth/status", web::get().to(auth_handlers::status))
        .route(
            "/api/auth/create-admin",
            web::post().to(auth_handlers::create_admin),
        )
        .route("/api/forms", web::get().to(form_handlers::list))
        .route("/api/forms", web::post().to(form_handlers::create))
        .route("/api/forms/{id}/plan", web::get().to(form_handlers::plan))
        .route("/api/forms/{id}", web::get().to(form_handlers::get))
        .route("/api/forms/{id}", web::put().to(form_handlers::update))
        .route("/api/forms/{id}", web::delete().to(form_handlers::delete))
        // /report and /{id}/restore BEFORE /{id} to avoid routing conflicts
        .route(
            "/api/submissions/report",
            web::get().to(report_handlers::generate),
        )
        .route(
            "/api/submissions/{id}/restore",
            web::put().to(submission_handlers::restore),
        )
        .route(
            "/api/submissions",
            web::post().to(submission_handlers::submit),
        )
        .route("/api/submissions", web::get().to(submission_handlers::list))
        .route(
            "/api/submissions/{id}",
            web::put().to(submission_handlers::update),
        )
        .route(
            "/api/submissions/{id}",
            web::delete().to(submission_handlers::soft_delete),
        )
        .service(
            web::scope("/api/users")
                .wrap(middleware::from_fn(require_auth))
                .route("", web::get().to(auth_handlers::list_users)),
        )
        .service(
            web::scope("/api/uploads")
                .wrap(middleware::from_fn(require_auth))
                .route("/logo", web::post().to(upload_handlers::logo)),
        )
        .default_service(web::to(not_found));
}
