pub mod form;
pub mod submission;
pub mod user;

use crate::errors::AppError;

/// Translate a unique-constraint violation into a field-keyed duplicate
/// error; anything else stays a database error.
pub fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            let field = match db.constraint() {
                Some("submissions_live_cpf_key") => "cpf",
                Some("submissions_live_email_key") => "email",
                Some("submissions_live_matricula_key") => "matricula",
                Some("users_username_key") => "username",
                Some("forms_url_key") => "url",
                _ => "value",
            };
            return AppError::Duplicate(field.to_string());
        }
    }
    AppError::Db(e)
}
