//! Book domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
};

impl Repository {
    /// Insert a book; `isbn` must already be normalized.
    /// Duplicate ISBNs surface as a unique violation from the database.
    pub async fn books_create(&self, isbn: &str, data: &CreateBook) -> Result<Book, sqlx::Error> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (isbn, title, author, publisher, subject, grade, publication_year, edition)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(isbn)
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.publisher)
        .bind(&data.subject)
        .bind(&data.grade)
        .bind(data.publication_year)
        .bind(&data.edition)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn books_list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY title")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn books_get(&self, isbn: &str) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn books_exists(&self, isbn: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
            .bind(isbn)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn books_update(&self, isbn: &str, data: &UpdateBook) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, author = $2, publisher = $3, subject = $4,
                grade = $5, publication_year = $6, edition = $7
            WHERE isbn = $8
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.publisher)
        .bind(&data.subject)
        .bind(&data.grade)
        .bind(data.publication_year)
        .bind(&data.edition)
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Number of copies attached to a book
    pub async fn books_count_copies(&self, isbn: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM copies WHERE book_isbn = $1")
            .bind(isbn)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn books_delete(&self, isbn: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
