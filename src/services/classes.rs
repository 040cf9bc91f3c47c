//! Class management service

use axum::http::StatusCode;

use crate::{
    error::{AppError, AppResult},
    models::class::{CreateClass, SchoolClass},
    repository::Repository,
};

#[derive(Clone)]
pub struct ClassesService {
    repository: Repository,
}

impl ClassesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a class unless one with the same course, grade and year exists
    pub async fn create(&self, data: &CreateClass) -> AppResult<SchoolClass> {
        if self.repository.classes_exists(data).await? {
            return Err(AppError::field(
                StatusCode::BAD_REQUEST,
                "A class with this course, grade and school year already exists",
                "course",
                "Class already registered",
            ));
        }
        self.repository.classes_create(data).await
    }

    pub async fn list(&self) -> AppResult<Vec<SchoolClass>> {
        self.repository.classes_list().await
    }
}
