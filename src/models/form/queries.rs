use sqlx::PgPool;

use super::types::{Form, FormInput};
use crate::errors::AppError;

const SELECT_FORM: &str = "SELECT id, name, fields, url, terms_text, logo_url, owner_id, \
                           created_at, updated_at FROM forms";

/// Create a form definition. The canonical access URL embeds the allocated
/// id, so the row is inserted first and the URL filled in afterwards. Both
/// statements run in one transaction so no placeholder row survives a
/// failure in between.
pub async fn create(
    pool: &PgPool,
    input: &FormInput,
    public_base_url: &str,
) -> Result<Form, AppError> {
    let mut tx = pool.begin().await?;

    // url is unique, so the placeholder has to be too
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO forms (name, fields, url, terms_text, logo_url, owner_id) \
         VALUES ($1, $2, 'pending-' || gen_random_uuid(), $3, $4, $5) RETURNING id",
    )
    .bind(input.name.trim())
    .bind(&input.fields)
    .bind(&input.terms_text)
    .bind(&input.logo_url)
    .bind(input.owner_id)
    .fetch_one(&mut *tx)
    .await?;

    let url = format!("{}/form/{}", public_base_url.trim_end_matches('/'), id);
    let form = sqlx::query_as::<_, Form>(
        "UPDATE forms SET url = $1 WHERE id = $2 \
         RETURNING id, name, fields, url, terms_text, logo_url, owner_id, created_at, updated_at",
    )
    .bind(&url)
    .bind(id)
    .fetch_one(&mut *tx)
    .await
    .map_err(crate::models::map_unique_violation)?;

    tx.commit().await?;
    Ok(form)
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Form>, AppError> {
    let forms = sqlx::query_as::<_, Form>(&format!("{SELECT_FORM} ORDER BY created_at DESC"))
        .fetch_all(pool)
        .await?;
    Ok(forms)
}

pub async fn list_by_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Form>, AppError> {
    let forms = sqlx::query_as::<_, Form>(&format!(
        "{SELECT_FORM} WHERE owner_id = $1 ORDER BY created_at DESC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    Ok(forms)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Form>, AppError> {
    let form = sqlx::query_as::<_, Form>(&format!("{SELECT_FORM} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(form)
}

/// Full replace of the mutable attributes. Returns None when the id is
/// unknown.
pub async fn update(pool: &PgPool, id: i64, input: &FormInput) -> Result<Option<Form>, AppError> {
    let form = sqlx::query_as::<_, Form>(
        "UPDATE forms SET name = $1, fields = $2, terms_text = $3, logo_url = $4, \
                          updated_at = now() \
         WHERE id = $5 \
         RETURNING id, name, fields, url, terms_text, logo_url, owner_id, created_at, updated_at",
    )
    .bind(input.name.trim())
    .bind(&input.fields)
    .bind(&input.terms_text)
    .bind(&input.logo_url)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(form)
}

/// Hard delete. Submissions cascade at the schema level.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM forms WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
