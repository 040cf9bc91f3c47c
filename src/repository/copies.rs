//! Copy domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::copy::{BookCopy, CopyDetails, CreateCopy, UpdateCopy},
};

/// Copies joined with their book. Availability: damaged, lost or past the
/// discard year is Unavailable; an open loan is Borrowed.
const COPY_DETAILS_SELECT: &str = r#"
    SELECT
        c.id, c.condition, c.acquisition_year, c.discard_year, c.book_isbn,
        b.title AS book_title, b.author, b.publisher,
        CASE
            WHEN c.condition IN ('Damaged', 'Lost')
                 OR EXTRACT(YEAR FROM CURRENT_DATE)::int > c.discard_year
            THEN 'Unavailable'
            WHEN EXISTS (
                SELECT 1 FROM loans l
                WHERE l.copy_id = c.id AND l.status = 'Open'
            )
            THEN 'Borrowed'
            ELSE 'Available'
        END AS availability
    FROM copies c
    JOIN books b ON c.book_isbn = b.isbn
"#;

impl Repository {
    pub async fn copies_create(&self, data: &CreateCopy) -> AppResult<BookCopy> {
        let row = sqlx::query_as::<_, BookCopy>(
            r#"
            INSERT INTO copies (condition, acquisition_year, discard_year, book_isbn)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.condition)
        .bind(data.acquisition_year)
        .bind(data.discard_year)
        .bind(&data.book_isbn)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn copies_list(&self) -> AppResult<Vec<CopyDetails>> {
        let query = format!("{} ORDER BY c.id", COPY_DETAILS_SELECT);
        let rows = sqlx::query_as::<_, CopyDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn copies_get(&self, id: i32) -> AppResult<Option<CopyDetails>> {
        let query = format!("{} WHERE c.id = $1", COPY_DETAILS_SELECT);
        let row = sqlx::query_as::<_, CopyDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn copies_list_by_book(&self, isbn: &str) -> AppResult<Vec<CopyDetails>> {
        let query = format!("{} WHERE c.book_isbn = $1 ORDER BY c.id", COPY_DETAILS_SELECT);
        let rows = sqlx::query_as::<_, CopyDetails>(&query)
            .bind(isbn)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn copies_update(&self, id: i32, data: &UpdateCopy) -> AppResult<Option<BookCopy>> {
        let row = sqlx::query_as::<_, BookCopy>(
            r#"
            UPDATE copies
            SET condition = $1, acquisition_year = $2, discard_year = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&data.condition)
        .bind(data.acquisition_year)
        .bind(data.discard_year)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn copies_delete(&self, id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM copies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
