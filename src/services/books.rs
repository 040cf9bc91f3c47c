//! Book catalog service

use axum::http::StatusCode;

use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::book::{normalize_isbn, Book, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

fn not_found() -> AppError {
    AppError::field(
        StatusCode::NOT_FOUND,
        "Book not found",
        "isbn",
        "ISBN not found",
    )
}

/// Normalized ISBN, or a 400 if no digits remain
fn parse_isbn(isbn: &str) -> AppResult<String> {
    let isbn = normalize_isbn(isbn);
    if isbn.is_empty() {
        return Err(AppError::field(
            StatusCode::BAD_REQUEST,
            "Invalid ISBN",
            "isbn",
            "ISBN must contain digits",
        ));
    }
    Ok(isbn)
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Insert a book; the database detects duplicate ISBNs
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let isbn = parse_isbn(&data.isbn)?;
        match self.repository.books_create(&isbn, data).await {
            Ok(book) => Ok(book),
            Err(e) if is_unique_violation(&e) => Err(AppError::field(
                StatusCode::BAD_REQUEST,
                "A book with this ISBN already exists",
                "isbn",
                "ISBN already registered",
            )),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books_list().await
    }

    pub async fn get(&self, isbn: &str) -> AppResult<Book> {
        let isbn = parse_isbn(isbn)?;
        self.repository.books_get(&isbn).await?.ok_or_else(not_found)
    }

    pub async fn update(&self, isbn: &str, data: &UpdateBook) -> AppResult<Book> {
        let isbn = parse_isbn(isbn)?;
        self.repository
            .books_update(&isbn, data)
            .await?
            .ok_or_else(not_found)
    }

    /// Delete a book that has no copies
    pub async fn delete(&self, isbn: &str) -> AppResult<()> {
        let isbn = parse_isbn(isbn)?;
        let copies = self.repository.books_count_copies(&isbn).await?;
        if copies > 0 {
            return Err(AppError::field(
                StatusCode::BAD_REQUEST,
                format!("Cannot delete book: {} copy(ies) linked", copies),
                "isbn",
                "Book has linked copies",
            ));
        }
        if self.repository.books_delete(&isbn).await? == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_isbn() {
        assert_eq!(parse_isbn("978-85-7522-123-4").unwrap(), "9788575221234");
        assert!(parse_isbn("---").is_err());
    }
}
