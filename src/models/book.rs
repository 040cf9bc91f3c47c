//! Book (catalog title) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book record, keyed by ISBN digits
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub publication_year: Option<i32>,
    pub edition: Option<String>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    /// ISBN, punctuation allowed ("978-85-7522-123-4")
    #[validate(length(min = 10, message = "ISBN is required"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub publication_year: Option<i32>,
    pub edition: Option<String>,
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub publication_year: Option<i32>,
    pub edition: Option<String>,
}

/// Keep only the digits of an ISBN
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.chars().filter(|c| c.is_ascii_digit()).collect()
}
