use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use sqlx::PgPool;

use super::parse_id;
use crate::auth::session;
use crate::config::Config;
use crate::errors::AppError;
use crate::fields::wizard;
use crate::models::form::{self, FormInput};

/// POST /api/forms: define a new dynamic form. Admin only. A form with no
/// owner defaults to the creating admin.
pub async fn create(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    session: Session,
    input: web::Json<FormInput>,
) -> Result<HttpResponse, AppError> {
    let admin = session::require_admin(&session)?;
    let mut input = input.into_inner();
    input.validate()?;
    if input.owner_id.is_none() {
        input.owner_id = Some(admin.id);
    }

    let created = form::create(&pool, &input, &config.public_base_url).await?;
    log::info!("form '{}' created with id {}", created.name, created.id);
    Ok(HttpResponse::Created().json(created))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListQuery {
    pub owner_id: Option<i64>,
}

/// GET /api/forms: admins see everything (optionally narrowed to one owner),
/// regular users their own forms.
pub async fn list(
    pool: web::Data<PgPool>,
    session: Session,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let user = session::require_login(&session)?;
    let forms = if user.role == session::ROLE_ADMIN {
        match query.owner_id {
            Some(owner_id) => form::list_by_owner(&pool, owner_id).await?,
            None => form::list_all(&pool).await?,
        }
    } else {
        form::list_by_owner(&pool, user.id).await?
    };
    Ok(HttpResponse::Ok().json(forms))
}

/// GET /api/forms/{id}: public, the submission page needs it anonymously.
pub async fn get(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    let found = form::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Formulário não encontrado."))?;
    Ok(HttpResponse::Ok().json(found))
}

/// GET /api/forms/{id}/plan: the declared fields resolved against the
/// catalog and grouped into wizard steps, ready for rendering.
pub async fn plan(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    let found = form::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Formulário não encontrado."))?;
    let steps = wizard::steps(&found.fields);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "formId": found.id,
        "name": found.name,
        "termsText": found.terms_text,
        "logoUrl": found.logo_url,
        "steps": steps,
    })))
}

/// PUT /api/forms/{id}: full replace of the mutable attributes. Admin only.
pub async fn update(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<String>,
    input: web::Json<FormInput>,
) -> Result<HttpResponse, AppError> {
    session::require_admin(&session)?;
    let id = parse_id(&path)?;
    input.validate()?;
    let updated = form::update(&pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Formulário não encontrado."))?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/forms/{id}: hard delete, submissions cascade. Admin only.
pub async fn delete(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    session::require_admin(&session)?;
    let id = parse_id(&path)?;
    if !form::delete(&pool, id).await? {
        return Err(AppError::not_found("Formulário não encontrado."));
    }
    log::info!("form {id} deleted");
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Formulário deletado com sucesso.",
    })))
}
