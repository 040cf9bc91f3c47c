//! Read-only aggregations for the dashboard

use super::Repository;
use crate::{
    error::AppResult,
    models::dashboard::{CopyAvailability, DashboardSummary, MonthlyLoans, OverdueLoan, TopBook},
};

impl Repository {
    pub async fn dashboard_summary(&self) -> AppResult<DashboardSummary> {
        let row = sqlx::query_as::<_, DashboardSummary>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM students) AS students,
                (SELECT COUNT(*) FROM books) AS books,
                (SELECT COUNT(*) FROM copies) AS copies,
                (SELECT COUNT(*) FROM classes) AS classes,
                (SELECT COUNT(*) FROM loans WHERE status = 'Open') AS open_loans,
                (SELECT COUNT(*) FROM loans
                  WHERE status = 'Open' AND due_date < CURRENT_DATE) AS overdue_loans
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Most borrowed books
    pub async fn dashboard_top_books(&self, limit: i64) -> AppResult<Vec<TopBook>> {
        let rows = sqlx::query_as::<_, TopBook>(
            r#"
            SELECT b.isbn, b.title, b.author, COUNT(*) AS loans
            FROM loans l
            JOIN copies c ON l.copy_id = c.id
            JOIN books b ON c.book_isbn = b.isbn
            GROUP BY b.isbn, b.title, b.author
            ORDER BY loans DESC, b.title
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Open loans past their due date, oldest first
    pub async fn dashboard_overdue_loans(&self) -> AppResult<Vec<OverdueLoan>> {
        let rows = sqlx::query_as::<_, OverdueLoan>(
            r#"
            SELECT l.id, s.name AS student_name, b.title AS book_title, l.due_date,
                   (CURRENT_DATE - l.due_date)::int AS days_overdue
            FROM loans l
            JOIN students s ON l.student_registration = s.registration_number
            JOIN copies c ON l.copy_id = c.id
            JOIN books b ON c.book_isbn = b.isbn
            WHERE l.status = 'Open' AND l.due_date < CURRENT_DATE
            ORDER BY l.due_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn dashboard_loans_per_month(&self, year: i32) -> AppResult<Vec<MonthlyLoans>> {
        let rows = sqlx::query_as::<_, MonthlyLoans>(
            r#"
            SELECT TO_CHAR(loan_date, 'YYYY-MM') AS month, COUNT(*) AS total
            FROM loans
            WHERE loan_date IS NOT NULL
              AND EXTRACT(YEAR FROM loan_date)::int = $1
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn dashboard_copy_availability(&self) -> AppResult<CopyAvailability> {
        let row = sqlx::query_as::<_, CopyAvailability>(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN c.condition IN ('New', 'Regular') AND l.id IS NULL
                                  THEN 1 ELSE 0 END), 0)::bigint AS available,
                COALESCE(SUM(CASE WHEN l.status = 'Open' THEN 1 ELSE 0 END), 0)::bigint AS borrowed,
                COALESCE(SUM(CASE WHEN c.condition IN ('Damaged', 'Lost')
                                  THEN 1 ELSE 0 END), 0)::bigint AS unavailable
            FROM copies c
            LEFT JOIN loans l ON l.copy_id = c.id AND l.status = 'Open'
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
