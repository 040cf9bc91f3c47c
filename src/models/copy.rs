//! Copy (physical exemplar of a book) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Copy record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookCopy {
    pub id: i32,
    /// New, Regular, Damaged or Lost
    pub condition: String,
    pub acquisition_year: Option<i32>,
    pub discard_year: Option<i32>,
    pub book_isbn: String,
}

/// Copy joined with its book and computed availability
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CopyDetails {
    pub id: i32,
    pub condition: String,
    pub acquisition_year: Option<i32>,
    pub discard_year: Option<i32>,
    pub book_isbn: String,
    pub book_title: String,
    pub author: Option<String>,
    #[sqlx(default)]
    pub publisher: Option<String>,
    /// Available, Borrowed or Unavailable
    #[sqlx(default)]
    pub availability: Option<String>,
}

/// Create copy request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCopy {
    #[validate(length(min = 1, message = "Condition is required"))]
    pub condition: String,
    pub acquisition_year: Option<i32>,
    pub discard_year: Option<i32>,
    #[validate(length(min = 1, message = "Book ISBN is required"))]
    pub book_isbn: String,
}

/// Update copy request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCopy {
    #[validate(length(min = 1, message = "Condition is required"))]
    pub condition: String,
    pub acquisition_year: Option<i32>,
    pub discard_year: Option<i32>,
}
