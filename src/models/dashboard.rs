//! Dashboard aggregation rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Counters for the dashboard cards
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DashboardSummary {
    pub students: i64,
    pub books: i64,
    pub copies: i64,
    pub classes: i64,
    pub open_loans: i64,
    pub overdue_loans: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TopBook {
    pub isbn: String,
    pub title: String,
    pub author: Option<String>,
    pub loans: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OverdueLoan {
    pub id: i32,
    pub student_name: String,
    pub book_title: String,
    pub due_date: NaiveDate,
    pub days_overdue: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MonthlyLoans {
    /// "YYYY-MM"
    pub month: String,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoansPerMonth {
    pub year: i32,
    pub months: Vec<MonthlyLoans>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CopyAvailability {
    pub available: i64,
    pub borrowed: i64,
    pub unavailable: i64,
}
