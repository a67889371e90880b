use std::collections::BTreeMap;

use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::session;
use crate::errors::AppError;
use crate::models::form;
use crate::models::submission::{self, SubmissionFilter};
use crate::report;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportQuery {
    pub form_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn parse_date(
    raw: &Option<String>,
    key: &str,
    errors: &mut BTreeMap<String, String>,
) -> Option<NaiveDate> {
    let raw = raw.as_deref()?.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            errors.insert(
                key.to_string(),
                "Data inválida (formato AAAA-MM-DD).".to_string(),
            );
            None
        }
    }
}

/// Resolve the selection window from the raw query. Either a form id or a
/// complete date range is required, and the range must not be inverted.
pub fn resolve_period(
    query: &ReportQuery,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), AppError> {
    let mut errors = BTreeMap::new();
    let start = parse_date(&query.start_date, "startDate", &mut errors);
    let end = parse_date(&query.end_date, "endDate", &mut errors);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if query.form_id.is_none() && (start.is_none() || end.is_none()) {
        return Err(AppError::field(
            "formId",
            "Informe um formulário ou um período completo (data inicial e final).",
        ));
    }
    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            return Err(AppError::field(
                "startDate",
                "Período inválido: data inicial após a final.",
            ));
        }
    }
    Ok((start, end))
}

/// GET /api/submissions/report: PDF export of live submissions, selected by
/// form or by submission date range. Admin only.
pub async fn generate(
    pool: web::Data<PgPool>,
    session: Session,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    session::require_admin(&session)?;

    let (start, end) = resolve_period(&query)?;

    let (form_name, filename) = match query.form_id {
        Some(form_id) => {
            let found = form::find_by_id(&pool, form_id)
                .await?
                .ok_or_else(|| AppError::not_found("Formulário não encontrado."))?;
            let filename = format!("relatorio_form_{form_id}.pdf");
            (found.name, filename)
        }
        None => {
            // date-range reports cut across forms
            let filename = match (start, end) {
                (Some(s), Some(e)) => format!("relatorio_{s}_{e}.pdf"),
                _ => "relatorio.pdf".to_string(),
            };
            ("Formulário Desconhecido".to_string(), filename)
        }
    };

    let criteria = SubmissionFilter {
        form_id: query.form_id,
        submitted_from: start,
        submitted_to: end,
        ..Default::default()
    };
    let records = submission::filter(&pool, &criteria, true).await?;
    let bytes = report::build(&form_name, &records)?;

    log::info!("report '{filename}' with {} record(s)", records.len());
    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename={filename}"),
        ))
        .body(bytes))
}
