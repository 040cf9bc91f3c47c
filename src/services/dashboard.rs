//! Dashboard aggregation service

use chrono::{Datelike, Utc};

use crate::{
    error::AppResult,
    models::dashboard::{CopyAvailability, DashboardSummary, LoansPerMonth, OverdueLoan, TopBook},
    repository::Repository,
};

const DEFAULT_TOP_BOOKS: i64 = 5;
const MAX_TOP_BOOKS: i64 = 100;

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

/// Requested limit, falling back to the default for missing or non-positive values
fn top_books_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(n) if n > 0 => n.min(MAX_TOP_BOOKS),
        _ => DEFAULT_TOP_BOOKS,
    }
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn summary(&self) -> AppResult<DashboardSummary> {
        self.repository.dashboard_summary().await
    }

    pub async fn top_books(&self, limit: Option<i64>) -> AppResult<Vec<TopBook>> {
        self.repository.dashboard_top_books(top_books_limit(limit)).await
    }

    pub async fn overdue_loans(&self) -> AppResult<Vec<OverdueLoan>> {
        self.repository.dashboard_overdue_loans().await
    }

    /// Loans grouped by month for `year` (current year by default)
    pub async fn loans_per_month(&self, year: Option<i32>) -> AppResult<LoansPerMonth> {
        let year = year.unwrap_or_else(|| Utc::now().year());
        let months = self.repository.dashboard_loans_per_month(year).await?;
        Ok(LoansPerMonth { year, months })
    }

    pub async fn copy_availability(&self) -> AppResult<CopyAvailability> {
        self.repository.dashboard_copy_availability().await
    }
}
