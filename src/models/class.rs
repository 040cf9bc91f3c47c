//! School class model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Class (course, grade and school year)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SchoolClass {
    pub id: i32,
    pub course: String,
    /// e.g. "2º Ano"
    pub grade: String,
    pub school_year: i32,
}

/// Create class request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClass {
    #[validate(length(min = 1, message = "Course is required"))]
    pub course: String,
    #[validate(length(min = 1, message = "Grade is required"))]
    pub grade: String,
    #[validate(range(min = 1900, max = 2999, message = "Invalid school year"))]
    pub school_year: i32,
}
