//! Copy (exemplar) management service

use axum::http::StatusCode;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::normalize_isbn,
        copy::{BookCopy, CopyDetails, CreateCopy, UpdateCopy},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CopiesService {
    repository: Repository,
}

fn not_found() -> AppError {
    AppError::field(StatusCode::NOT_FOUND, "Copy not found", "id", "ID not found")
}

impl CopiesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a copy of an existing book
    pub async fn create(&self, data: &CreateCopy) -> AppResult<BookCopy> {
        let isbn = normalize_isbn(&data.book_isbn);
        if !self.repository.books_exists(&isbn).await? {
            return Err(AppError::field(
                StatusCode::BAD_REQUEST,
                "No book with this ISBN",
                "book_isbn",
                "ISBN not found",
            ));
        }
        let data = CreateCopy {
            book_isbn: isbn,
            condition: data.condition.clone(),
            acquisition_year: data.acquisition_year,
            discard_year: data.discard_year,
        };
        self.repository.copies_create(&data).await
    }

    pub async fn list(&self) -> AppResult<Vec<CopyDetails>> {
        self.repository.copies_list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<CopyDetails> {
        self.repository.copies_get(id).await?.ok_or_else(not_found)
    }

    pub async fn list_by_book(&self, isbn: &str) -> AppResult<Vec<CopyDetails>> {
        self.repository.copies_list_by_book(&normalize_isbn(isbn)).await
    }

    pub async fn update(&self, id: i32, data: &UpdateCopy) -> AppResult<BookCopy> {
        self.repository.copies_update(id, data).await?.ok_or_else(not_found)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repository.copies_delete(id).await? == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
