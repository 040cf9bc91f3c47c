//! Error types for the library server

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Field name -> list of messages
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Failures of the student spreadsheet import pipeline
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Malformed spreadsheet: {0}")]
    MalformedInput(String),

    #[error("Spreadsheet has no data rows")]
    EmptySheet,

    #[error("No rows matched city '{0}'")]
    NoMatchingRows(String),

    #[error("Failed to persist imported rows: {0}")]
    Persistence(#[source] sqlx::Error),
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{message}")]
    Fields {
        status: StatusCode,
        message: String,
        errors: FieldErrors,
    },

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Import(#[from] ImportError),
}

impl AppError {
    /// Error carrying a single field message
    pub fn field(
        status: StatusCode,
        message: impl Into<String>,
        field: &str,
        detail: impl Into<String>,
    ) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![detail.into()]);
        AppError::Fields {
            status,
            message: message.into(),
            errors,
        }
    }

    /// Convert `validator` failures into a 400 with one entry per field
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        let errors = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        AppError::Fields {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid request body".to_string(),
            errors,
        }
    }
}

/// Storage error code reported to clients in `errors.database`
pub fn database_code(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db) => db
            .code()
            .map(|c| c.into_owned())
            .unwrap_or_else(|| "UNKNOWN".to_string()),
        sqlx::Error::PoolTimedOut => "POOL_TIMED_OUT".to_string(),
        sqlx::Error::PoolClosed => "POOL_CLOSED".to_string(),
        sqlx::Error::Io(_) => "IO_ERROR".to_string(),
        sqlx::Error::RowNotFound => "ROW_NOT_FOUND".to_string(),
        _ => "DB_ERROR".to_string(),
    }
}

/// True for PostgreSQL unique_violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub errors: FieldErrors,
}

fn single(field: &str, detail: impl Into<String>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), vec![detail.into()]);
    errors
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, FieldErrors::new()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, FieldErrors::new()),
            AppError::Database(e) => {
                let code = database_code(&e);
                tracing::error!(code = %code, "Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                    single("database", code),
                )
            }
            AppError::Fields {
                status,
                message,
                errors,
            } => (status, message, errors),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    FieldErrors::new(),
                )
            }
            AppError::Import(e) => import_error_parts(e),
        };

        (status, Json(ErrorResponse { message, errors })).into_response()
    }
}

fn import_error_parts(err: ImportError) -> (StatusCode, String, FieldErrors) {
    match err {
        ImportError::MissingFile => (
            StatusCode::BAD_REQUEST,
            "No file uploaded".to_string(),
            single("file", "A spreadsheet file is required"),
        ),
        ImportError::EmptySheet => (
            StatusCode::BAD_REQUEST,
            "The spreadsheet is empty".to_string(),
            single("file", "The first sheet has no data rows"),
        ),
        ImportError::NoMatchingRows(city) => (
            StatusCode::BAD_REQUEST,
            "No students found for the target city".to_string(),
            single("city", format!("No row has city '{}'", city)),
        ),
        // Unreadable uploads are reported as server errors
        ImportError::MalformedInput(reason) => {
            tracing::error!("Failed to parse spreadsheet: {}", reason);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                FieldErrors::new(),
            )
        }
        ImportError::Persistence(e) => {
            let code = database_code(&e);
            tracing::error!(code = %code, "Import upsert failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save imported students".to_string(),
                single("database", code),
            )
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
