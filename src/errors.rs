//! errors.rs
//! Errores tipados de la aplicación: cada variante lleva su status HTTP
//! y un código legible por máquina.

use serde::Serialize;
use thiserror::Error;

/// Campo (o lista de campos) señalado por un error de validación.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorField {
    Single(String),
    Multiple(Vec<String>),
}

impl From<&str> for ErrorField {
    fn from(field: &str) -> Self {
        ErrorField::Single(field.to_string())
    }
}

impl From<Vec<String>> for ErrorField {
    fn from(fields: Vec<String>) -> Self {
        ErrorField::Multiple(fields)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Entrada inválida o ausente (400).
    #[error("{message}")]
    Validation { message: String, field: ErrorField },

    /// Recurso referenciado inexistente (404).
    #[error("{resource} no encontrado")]
    NotFound { resource: String },

    /// Fallo inesperado de persistencia (500). La causa original se
    /// conserva para los logs, nunca se serializa en la respuesta.
    #[error("{message}")]
    Database {
        message: String,
        cause: anyhow::Error,
    },

    /// Error genérico con status y código propios.
    #[error("{message}")]
    App {
        message: String,
        status_code: u16,
        code: &'static str,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>, field: impl Into<ErrorField>) -> Self {
        AppError::Validation {
            message: message.into(),
            field: field.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn database(message: impl Into<String>, cause: anyhow::Error) -> Self {
        AppError::Database {
            message: message.into(),
            cause,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Validation { .. } => 400,
            AppError::NotFound { .. } => 404,
            AppError::Database { .. } => 500,
            AppError::App { status_code, .. } => *status_code,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Database { .. } => "DATABASE_ERROR",
            AppError::App { code, .. } => code,
        }
    }
}
