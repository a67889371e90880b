use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;

use super::filter::{BindValue, SubmissionFilter, build_where};
use super::types::{
    DeleteOutcome, Submission, SubmissionInput, delete_transition, restore_transition,
};
use crate::errors::AppError;

const ATTR_COLS: &str = "nome_completo, nome_social, sexo, situacao_funcional, matricula, \
     nome_mae, data_admissao, data_nascimento, rg, cpf, lotacao, setor, cargo, salario_base, \
     endereco_residencial, bairro, cidade, estado, cep, telefone_fixo, celular, whatsapp, \
     email, banco_recebimento, observacoes, aceita_termos, mensagem";

fn select_sql(where_clause: &str, order: &str) -> String {
    format!(
        "SELECT id, form_id, user_id, {ATTR_COLS}, submitted_at, deleted_at, \
                created_at, updated_at \
         FROM submissions WHERE {where_clause} {order}"
    )
}

fn returning_sql() -> String {
    format!(
        "RETURNING id, form_id, user_id, {ATTR_COLS}, submitted_at, deleted_at, \
                   created_at, updated_at"
    )
}

fn bind_attrs<'q>(
    q: QueryAs<'q, sqlx::Postgres, Submission, PgArguments>,
    input: &'q SubmissionInput,
) -> QueryAs<'q, sqlx::Postgres, Submission, PgArguments> {
    q.bind(&input.nome_completo)
        .bind(&input.nome_social)
        .bind(&input.sexo)
        .bind(&input.situacao_funcional)
        .bind(&input.matricula)
        .bind(&input.nome_mae)
        .bind(input.data_admissao)
        .bind(input.data_nascimento)
        .bind(&input.rg)
        .bind(&input.cpf)
        .bind(&input.lotacao)
        .bind(&input.setor)
        .bind(&input.cargo)
        .bind(input.salario_base)
        .bind(&input.endereco_residencial)
        .bind(&input.bairro)
        .bind(&input.cidade)
        .bind(&input.estado)
        .bind(&input.cep)
        .bind(&input.telefone_fixo)
        .bind(&input.celular)
        .bind(&input.whatsapp)
        .bind(&input.email)
        .bind(&input.banco_recebimento)
        .bind(&input.observacoes)
        .bind(input.aceita_termos.unwrap_or(false))
        .bind(&input.mensagem)
}

/// Insert a validated submission. Unique-index violations come back as
/// field-keyed duplicate errors.
pub async fn insert(
    pool: &PgPool,
    form_id: i64,
    user_id: Option<i64>,
    input: &SubmissionInput,
) -> Result<Submission, AppError> {
    let placeholders: Vec<String> = (3..=29).map(|n| format!("${n}")).collect();
    let sql = format!(
        "INSERT INTO submissions (form_id, user_id, {ATTR_COLS}) \
         VALUES ($1, $2, {}) {}",
        placeholders.join(", "),
        returning_sql()
    );

    let q = sqlx::query_as::<_, Submission>(&sql)
        .bind(form_id)
        .bind(user_id);
    let submission = bind_attrs(q, input)
        .fetch_one(pool)
        .await
        .map_err(crate::models::map_unique_violation)?;
    Ok(submission)
}

/// Full replace of the mutable attributes. Returns None for an unknown id.
pub async fn update(
    pool: &PgPool,
    id: i64,
    input: &SubmissionInput,
) -> Result<Option<Submission>, AppError> {
    let cols: Vec<&str> = ATTR_COLS.split(", ").collect();
    let assignments: Vec<String> = cols
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{col} = ${}", i + 2))
        .collect();
    let sql = format!(
        "UPDATE submissions SET {}, updated_at = now() WHERE id = $1 {}",
        assignments.join(", "),
        returning_sql()
    );

    let q = sqlx::query_as::<_, Submission>(&sql).bind(id);
    let submission = bind_attrs(q, input)
        .fetch_optional(pool)
        .await
        .map_err(crate::models::map_unique_violation)?;
    Ok(submission)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Submission>, AppError> {
    let sql = select_sql("id = $1", "");
    let submission = sqlx::query_as::<_, Submission>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(submission)
}

/// Filter submissions. Listing order is newest first; reports ask for
/// ascending submission time.
pub async fn filter(
    pool: &PgPool,
    criteria: &SubmissionFilter,
    ascending: bool,
) -> Result<Vec<Submission>, AppError> {
    let (where_clause, binds) = build_where(criteria, 0);
    let order = if ascending {
        "ORDER BY submitted_at ASC"
    } else {
        "ORDER BY submitted_at DESC"
    };
    let sql = select_sql(&where_clause, order);

    let mut q = sqlx::query_as::<_, Submission>(&sql);
    for bind in binds {
        q = match bind {
            BindValue::Int(v) => q.bind(v),
            BindValue::Text(v) => q.bind(v),
            BindValue::Date(v) => q.bind(v),
        };
    }
    let submissions = q.fetch_all(pool).await?;
    Ok(submissions)
}

/// Soft-delete outcome: Ok(true) when the record was live, Ok(false) when
/// it was already deleted (the operation is idempotent).
pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
    let existing: Option<(Option<DateTime<Utc>>,)> =
        sqlx::query_as("SELECT deleted_at FROM submissions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    let (deleted_at,) = existing.ok_or_else(|| AppError::not_found("Cadastro não encontrado."))?;

    match delete_transition(deleted_at) {
        DeleteOutcome::AlreadyDeleted => Ok(false),
        DeleteOutcome::Deleted => {
            sqlx::query(
                "UPDATE submissions SET deleted_at = now(), updated_at = now() WHERE id = $1",
            )
            .bind(id)
            .execute(pool)
            .await?;
            Ok(true)
        }
    }
}

/// Undo a soft delete. Restoring a live record is an invalid transition.
pub async fn restore(pool: &PgPool, id: i64) -> Result<Submission, AppError> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Cadastro não encontrado."))?;
    restore_transition(existing.deleted_at)?;

    let sql = format!(
        "UPDATE submissions SET deleted_at = NULL, updated_at = now() WHERE id = $1 {}",
        returning_sql()
    );
    let submission = sqlx::query_as::<_, Submission>(&sql)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(crate::models::map_unique_violation)?;
    Ok(submission)
}
