//! Stable error codes for the presenter and session.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Db(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Author not found: {0}")]
    AuthorNotFound(String),

    #[error("Nothing selected: {0}")]
    NoSelection(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Terminal I/O failed: {0}")]
    Io(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "DB_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AuthorNotFound(_) => "AUTHOR_NOT_FOUND",
            Self::NoSelection(_) => "EMPTY_SELECTION",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// True for failures the operator caused and can fix in the form.
    pub fn is_operator_fixable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NoSelection(_))
    }

    pub fn to_serde(&self) -> AppErrorDto {
        let details = match self {
            Self::AuthorNotFound(name) => Some(serde_json::json!({ "author": name })),
            _ => None,
        };
        AppErrorDto {
            code: self.code().to_string(),
            message: self.to_string(),
            details,
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_serde().serialize(serializer)
    }
}

#[derive(Debug, Serialize)]
pub struct AppErrorDto {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
