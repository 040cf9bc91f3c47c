//! Loans repository for database operations

use super::Repository;
use crate::{
    error::AppResult,
    models::loan::{CreateLoan, Loan, LoanDetails, LoanSummary, UpdateLoan, STATUS_OPEN},
};

impl Repository {
    pub async fn loans_create(&self, loan: &CreateLoan) -> AppResult<Loan> {
        let row = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans
                (librarian_id, student_registration, copy_id, loan_date, due_date, status, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(loan.librarian_id)
        .bind(&loan.student_registration)
        .bind(loan.copy_id)
        .bind(loan.loan_date)
        .bind(loan.due_date)
        .bind(loan.status.as_deref().unwrap_or(STATUS_OPEN))
        .bind(&loan.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// All loans with student and librarian names
    pub async fn loans_list(&self) -> AppResult<Vec<LoanSummary>> {
        let rows = sqlx::query_as::<_, LoanSummary>(
            r#"
            SELECT l.*, s.name AS student_name, lb.name AS librarian_name
            FROM loans l
            JOIN students s ON l.student_registration = s.registration_number
            JOIN librarians lb ON l.librarian_id = lb.id
            ORDER BY l.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Loan with the borrowed book and copy condition
    pub async fn loans_get(&self, id: i32) -> AppResult<Option<LoanDetails>> {
        let row = sqlx::query_as::<_, LoanDetails>(
            r#"
            SELECT l.*, s.name AS student_name, b.title AS book_title,
                   b.isbn AS book_isbn, c.condition AS copy_condition
            FROM loans l
            JOIN students s ON l.student_registration = s.registration_number
            JOIN copies c ON l.copy_id = c.id
            JOIN books b ON c.book_isbn = b.isbn
            WHERE l.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn loans_update(&self, id: i32, data: &UpdateLoan) -> AppResult<Option<Loan>> {
        let row = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET return_date = $1, status = $2, description = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(data.return_date)
        .bind(&data.status)
        .bind(&data.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn loans_delete(&self, id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
