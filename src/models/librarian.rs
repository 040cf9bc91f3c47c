//! Librarian model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Librarian record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Librarian {
    pub id: i32,
    pub cpf: String,
    pub name: String,
    pub email: String,
    /// Argon2 hash, never serialized
    #[serde(skip_serializing, default)]
    #[schema(write_only)]
    pub password_hash: String,
}

/// Create or update librarian request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LibrarianInput {
    #[validate(length(min = 11, max = 14, message = "CPF must have 11 digits"))]
    pub cpf: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}
