//! Loan model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Loan status values stored in `loans.status`
pub const STATUS_OPEN: &str = "Open";
pub const STATUS_CLOSED: &str = "Closed";

/// Loan model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub librarian_id: i32,
    pub student_registration: String,
    pub copy_id: i32,
    pub loan_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub status: String,
    pub description: Option<String>,
}

/// Loan listing row with student and librarian names
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanSummary {
    pub id: i32,
    pub librarian_id: i32,
    pub student_registration: String,
    pub copy_id: i32,
    pub loan_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub status: String,
    pub description: Option<String>,
    pub student_name: String,
    pub librarian_name: String,
}

/// Single loan with the borrowed book
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanDetails {
    pub id: i32,
    pub librarian_id: i32,
    pub student_registration: String,
    pub copy_id: i32,
    pub loan_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub status: String,
    pub description: Option<String>,
    pub student_name: String,
    pub book_title: String,
    pub book_isbn: String,
    pub copy_condition: String,
}

/// Create loan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLoan {
    pub librarian_id: i32,
    #[validate(length(min = 1, message = "Student registration is required"))]
    pub student_registration: String,
    pub copy_id: i32,
    pub loan_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    /// Defaults to "Open"
    pub status: Option<String>,
    pub description: Option<String>,
}

/// Update loan request (return, status, notes)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLoan {
    pub return_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
    pub description: Option<String>,
}
