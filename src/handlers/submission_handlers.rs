use actix_session::Session;
use actix_web::{HttpResponse, web};
use sqlx::PgPool;

use super::parse_id;
use crate::auth::session;
use crate::errors::AppError;
use crate::models::form;
use crate::models::submission::{self, SubmissionFilter, SubmissionInput};

/// POST /api/submissions: public submission endpoint. The payload is
/// validated against the owning form's declared fields; a logged-in
/// submitter is recorded, anonymous ones are not.
pub async fn submit(
    pool: web::Data<PgPool>,
    session: Session,
    input: web::Json<SubmissionInput>,
) -> Result<HttpResponse, AppError> {
    let mut input = input.into_inner();
    input.normalize();

    let form_id = input
        .form_id
        .ok_or_else(|| AppError::field("formId", "Campo obrigatório."))?;
    let form = form::find_by_id(&pool, form_id)
        .await?
        .ok_or_else(|| AppError::not_found("Formulário não encontrado."))?;
    input.validate_against(&form.fields)?;

    let user_id = session::get_user_id(&session);
    let created = submission::insert(&pool, form_id, user_id, &input).await?;
    log::info!("submission {} stored for form {}", created.id, form_id);
    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Cadastro realizado com sucesso.",
        "submission": created,
    })))
}

/// GET /api/submissions: multi-criteria listing. Admins search across
/// everything; regular users are scoped to their own submissions and must
/// name the form.
pub async fn list(
    pool: web::Data<PgPool>,
    session: Session,
    query: web::Query<SubmissionFilter>,
) -> Result<HttpResponse, AppError> {
    let user = session::require_login(&session)?;
    let mut criteria = query.into_inner();
    if user.role != session::ROLE_ADMIN {
        if criteria.form_id.is_none() {
            return Err(AppError::field("formId", "Campo obrigatório."));
        }
        criteria.user_id = Some(user.id);
        criteria.include_deleted = Some(false);
    }

    let found = submission::filter(&pool, &criteria, false).await?;
    Ok(HttpResponse::Ok().json(found))
}

/// PUT /api/submissions/{id}: full replace, revalidated against the current
/// form definition. Admin only.
pub async fn update(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<String>,
    input: web::Json<SubmissionInput>,
) -> Result<HttpResponse, AppError> {
    session::require_admin(&session)?;
    let id = parse_id(&path)?;

    let existing = submission::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Cadastro não encontrado."))?;
    let form = form::find_by_id(&pool, existing.form_id)
        .await?
        .ok_or_else(|| AppError::not_found("Formulário não encontrado."))?;

    let mut input = input.into_inner();
    input.normalize();
    input.validate_against(&form.fields)?;

    let updated = submission::update(&pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Cadastro não encontrado."))?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/submissions/{id}: soft delete, repeatable. Admin only.
pub async fn soft_delete(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    session::require_admin(&session)?;
    let id = parse_id(&path)?;
    let message = if submission::soft_delete(&pool, id).await? {
        "Cadastro soft-deletado com sucesso."
    } else {
        "Cadastro já foi soft-deletado anteriormente."
    };
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": message })))
}

/// PUT /api/submissions/{id}/restore: undo a soft delete. Admin only.
pub async fn restore(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    session::require_admin(&session)?;
    let id = parse_id(&path)?;
    let restored = submission::restore(&pool, id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Cadastro restaurado com sucesso.",
        "submission": restored,
    })))
}
