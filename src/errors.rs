use std::collections::BTreeMap;
use std::fmt;

use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

/// JSON body for every error response: a human message plus an optional
/// field -> message map for validation failures.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Migrate(sqlx::migrate::MigrateError),
    Hash(String),
    Unauthorized,
    Forbidden(String),
    NotFound(String),
    BadId(String),
    Validation(BTreeMap<String, String>),
    Duplicate(String),
    InvalidState(String),
    Upload(String),
}

impl AppError {
    /// Single-field validation error.
    pub fn field(name: &str, message: &str) -> Self {
        let mut map = BTreeMap::new();
        map.insert(name.to_string(), message.to_string());
        AppError::Validation(map)
    }

    pub fn not_found(message: &str) -> Self {
        AppError::NotFound(message.to_string())
    }

    /// Client-facing message for a duplicate on the given attribute.
    pub fn duplicate_message(field: &str) -> String {
        match field {
            "cpf" => "Este CPF já está cadastrado.".to_string(),
            "email" => "Este e-mail já está cadastrado.".to_string(),
            "matricula" => "Esta matrícula já está cadastrada.".to_string(),
            "username" => "Nome de usuário já existe.".to_string(),
            "url" => "Esta URL já está em uso.".to_string(),
            other => format!("Valor duplicado para {other}."),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Migrate(e) => write!(f, "Migration error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::Unauthorized => write!(f, "Authentication required"),
            AppError::Forbidden(e) => write!(f, "Access denied: {e}"),
            AppError::NotFound(e) => write!(f, "{e}"),
            AppError::BadId(e) => write!(f, "Invalid id: {e}"),
            AppError::Validation(map) => {
                write!(f, "Validation failed")?;
                for (field, msg) in map {
                    write!(f, "; {field}: {msg}")?;
                }
                Ok(())
            }
            AppError::Duplicate(field) => write!(f, "duplicate value for {field}"),
            AppError::InvalidState(e) => write!(f, "{e}"),
            AppError::Upload(e) => write!(f, "Upload error: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized => HttpResponse::Unauthorized().json(ErrorBody {
                error: "Não autenticado.".to_string(),
                fields: None,
            }),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(ErrorBody {
                error: msg.clone(),
                fields: None,
            }),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(ErrorBody {
                error: msg.clone(),
                fields: None,
            }),
            AppError::BadId(msg) => HttpResponse::BadRequest().json(ErrorBody {
                error: format!("Id inválido: {msg}"),
                fields: None,
            }),
            AppError::Validation(map) => HttpResponse::BadRequest().json(ErrorBody {
                error: "Erro de validação.".to_string(),
                fields: Some(map.clone()),
            }),
            AppError::Duplicate(field) => {
                let message = AppError::duplicate_message(field);
                let mut fields = BTreeMap::new();
                fields.insert(field.clone(), message.clone());
                HttpResponse::BadRequest().json(ErrorBody {
                    error: message,
                    fields: Some(fields),
                })
            }
            AppError::InvalidState(msg) => HttpResponse::BadRequest().json(ErrorBody {
                error: msg.clone(),
                fields: None,
            }),
            AppError::Upload(msg) => HttpResponse::BadRequest().json(ErrorBody {
                error: msg.clone(),
                fields: None,
            }),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().json(ErrorBody {
                    error: "Erro interno do servidor.".to_string(),
                    fields: None,
                })
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        AppError::Migrate(e)
    }
}
