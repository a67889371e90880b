use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::AppError;

/// A form definition: which fields the dynamic submission form collects,
/// in render order, plus optional terms text and logo.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: i64,
    pub name: String,
    pub fields: Vec<String>,
    pub url: String,
    pub terms_text: Option<String>,
    pub logo_url: Option<String>,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload. Updates fully replace the mutable attributes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub name: String,
    pub fields: Vec<String>,
    #[serde(default)]
    pub terms_text: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub owner_id: Option<i64>,
}

impl FormInput {
    /// Name and field list must be non-empty.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = BTreeMap::new();
        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "Nome é obrigatório.".to_string());
        }
        if self.fields.iter().all(|f| f.trim().is_empty()) {
            errors.insert(
                "fields".to_string(),
                "Pelo menos um campo é obrigatório.".to_string(),
            );
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}
