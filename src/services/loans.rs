//! Loan management service

use axum::http::StatusCode;

use crate::{
    error::{AppError, AppResult},
    models::loan::{
        CreateLoan, Loan, LoanDetails, LoanSummary, UpdateLoan, STATUS_CLOSED, STATUS_OPEN,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

fn not_found() -> AppError {
    AppError::NotFound("Loan not found".to_string())
}

fn check_status(status: &str) -> AppResult<()> {
    if status == STATUS_OPEN || status == STATUS_CLOSED {
        return Ok(());
    }
    Err(AppError::field(
        StatusCode::BAD_REQUEST,
        "Invalid loan status",
        "status",
        format!("Status must be {} or {}", STATUS_OPEN, STATUS_CLOSED),
    ))
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn create(&self, loan: &CreateLoan) -> AppResult<Loan> {
        if let Some(status) = &loan.status {
            check_status(status)?;
        }
        let loan = self.repository.loans_create(loan).await?;
        tracing::info!(
            "Loan {} opened for student {} (copy {})",
            loan.id,
            loan.student_registration,
            loan.copy_id
        );
        Ok(loan)
    }

    pub async fn list(&self) -> AppResult<Vec<LoanSummary>> {
        self.repository.loans_list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<LoanDetails> {
        self.repository.loans_get(id).await?.ok_or_else(not_found)
    }

    /// Record a return or change status/description
    pub async fn update(&self, id: i32, data: &UpdateLoan) -> AppResult<Loan> {
        check_status(&data.status)?;
        self.repository.loans_update(id, data).await?.ok_or_else(not_found)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repository.loans_delete(id).await? == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
