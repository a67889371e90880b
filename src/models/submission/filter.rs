use chrono::NaiveDate;
use serde::Deserialize;

/// Multi-criteria submission filter, bound straight from the query string.
/// Soft-deleted records are excluded unless `includeDeleted` is set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionFilter {
    pub form_id: Option<i64>,
    pub nome_completo: Option<String>,
    pub situacao_funcional: Option<String>,
    pub matricula: Option<String>,
    pub email: Option<String>,
    pub sexo: Option<String>,
    pub submitted_from: Option<NaiveDate>,
    pub submitted_to: Option<NaiveDate>,
    pub birth_from: Option<NaiveDate>,
    pub birth_to: Option<NaiveDate>,
    pub include_deleted: Option<bool>,
    /// Scoping for non-admin callers; set by the handler, never from the
    /// query string.
    #[serde(skip)]
    pub user_id: Option<i64>,
}

/// A value bound into the generated WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Int(i64),
    Text(String),
    Date(NaiveDate),
}

/// Build a parameterized WHERE fragment for the filter. `param_offset` is
/// the number of $N placeholders already consumed by the caller.
pub fn build_where(filter: &SubmissionFilter, param_offset: usize) -> (String, Vec<BindValue>) {
    let mut parts: Vec<String> = Vec::new();
    let mut binds: Vec<BindValue> = Vec::new();

    if !filter.include_deleted.unwrap_or(false) {
        parts.push("deleted_at IS NULL".to_string());
    }

    let mut push = |parts: &mut Vec<String>, binds: &mut Vec<BindValue>, sql: &str, v: BindValue| {
        let n = param_offset + binds.len() + 1;
        parts.push(sql.replace("$N", &format!("${n}")));
        binds.push(v);
    };

    if let Some(form_id) = filter.form_id {
        push(&mut parts, &mut binds, "form_id = $N", BindValue::Int(form_id));
    }
    if let Some(user_id) = filter.user_id {
        push(&mut parts, &mut binds, "user_id = $N", BindValue::Int(user_id));
    }
    if let Some(nome) = filter.nome_completo.as_deref().filter(|s| !s.is_empty()) {
        push(
            &mut parts,
            &mut binds,
            "nome_completo ILIKE '%' || $N || '%'",
            BindValue::Text(nome.to_string()),
        );
    }
    if let Some(v) = filter.situacao_funcional.as_deref().filter(|s| !s.is_empty()) {
        push(&mut parts, &mut binds, "situacao_funcional = $N", BindValue::Text(v.to_string()));
    }
    if let Some(v) = filter.matricula.as_deref().filter(|s| !s.is_empty()) {
        push(&mut parts, &mut binds, "matricula = $N", BindValue::Text(v.to_string()));
    }
    if let Some(v) = filter.email.as_deref().filter(|s| !s.is_empty()) {
        push(&mut parts, &mut binds, "email = $N", BindValue::Text(v.to_string()));
    }
    if let Some(v) = filter.sexo.as_deref().filter(|s| !s.is_empty()) {
        push(&mut parts, &mut binds, "sexo = $N", BindValue::Text(v.to_string()));
    }
    if let Some(d) = filter.submitted_from {
        push(&mut parts, &mut binds, "submitted_at::date >= $N", BindValue::Date(d));
    }
    if let Some(d) = filter.submitted_to {
        push(&mut parts, &mut binds, "submitted_at::date <= $N", BindValue::Date(d));
    }
    if let Some(d) = filter.birth_from {
        push(&mut parts, &mut binds, "data_nascimento >= $N", BindValue::Date(d));
    }
    if let Some(d) = filter.birth_to {
        push(&mut parts, &mut binds, "data_nascimento <= $N", BindValue::Date(d));
    }

    if parts.is_empty() {
        ("1=1".to_string(), binds)
    } else {
        (parts.join(" AND "), binds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_excludes_deleted() {
        let (sql, binds) = build_where(&SubmissionFilter::default(), 0);
        assert_eq!(sql, "deleted_at IS NULL");
        assert!(binds.is_empty());
    }

    #[test]
    fn include_deleted_drops_the_guard() {
        let filter = SubmissionFilter {
            include_deleted: Some(true),
            ..Default::default()
        };
        let (sql, binds) = build_where(&filter, 0);
        assert_eq!(sql, "1=1");
        assert!(binds.is_empty());
    }

    #[test]
    fn form_id_and_name_substring() {
        let filter = SubmissionFilter {
            form_id: Some(7),
            nome_completo: Some("silva".to_string()),
            ..Default::default()
        };
        let (sql, binds) = build_where(&filter, 0);
        assert_eq!(
            sql,
            "deleted_at IS NULL AND form_id = $1 AND nome_completo ILIKE '%' || $2 || '%'"
        );
        assert_eq!(
            binds,
            vec![BindValue::Int(7), BindValue::Text("silva".to_string())]
        );
    }

    #[test]
    fn exact_criteria_in_order() {
        let filter = SubmissionFilter {
            situacao_funcional: Some("ativo".to_string()),
            sexo: Some("feminino".to_string()),
            include_deleted: Some(true),
            ..Default::default()
        };
        let (sql, binds) = build_where(&filter, 0);
        assert_eq!(sql, "situacao_funcional = $1 AND sexo = $2");
        assert_eq!(binds.len(), 2);
    }

    #[test]
    fn date_ranges() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let filter = SubmissionFilter {
            submitted_from: Some(from),
            submitted_to: Some(to),
            ..Default::default()
        };
        let (sql, binds) = build_where(&filter, 0);
        assert_eq!(
            sql,
            "deleted_at IS NULL AND submitted_at::date >= $1 AND submitted_at::date <= $2"
        );
        assert_eq!(binds, vec![BindValue::Date(from), BindValue::Date(to)]);
    }

    #[test]
    fn param_offset_shifts_placeholders() {
        let filter = SubmissionFilter {
            form_id: Some(1),
            ..Default::default()
        };
        let (sql, _) = build_where(&filter, 3);
        assert_eq!(sql, "deleted_at IS NULL AND form_id = $4");
    }

    #[test]
    fn empty_strings_are_ignored() {
        let filter = SubmissionFilter {
            email: Some(String::new()),
            include_deleted: Some(true),
            ..Default::default()
        };
        let (sql, binds) = build_where(&filter, 0);
        assert_eq!(sql, "1=1");
        assert!(binds.is_empty());
    }

    #[test]
    fn scoping_user_id_binds_before_text_criteria() {
        let filter = SubmissionFilter {
            form_id: Some(2),
            user_id: Some(9),
            email: Some("a@b.com".to_string()),
            ..Default::default()
        };
        let (sql, binds) = build_where(&filter, 0);
        assert_eq!(
            sql,
            "deleted_at IS NULL AND form_id = $1 AND user_id = $2 AND email = $3"
        );
        assert_eq!(binds.len(), 3);
    }
}
