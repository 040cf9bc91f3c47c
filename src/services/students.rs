//! Student management service

use axum::http::StatusCode;

use crate::{
    error::{AppError, AppResult},
    models::{
        student::{CreateStudent, Student, UpdateStudent},
        ImportRecord,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct StudentsService {
    repository: Repository,
}

fn not_found() -> AppError {
    AppError::field(
        StatusCode::NOT_FOUND,
        "Student not found",
        "registration_number",
        "Registration number not found",
    )
}

impl StudentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a student, refusing a CPF that is already registered
    pub async fn create(&self, data: &CreateStudent) -> AppResult<Student> {
        if self.repository.students_cpf_exists(&data.cpf).await? {
            return Err(AppError::field(
                StatusCode::BAD_REQUEST,
                "A student with this CPF already exists",
                "cpf",
                "CPF already registered",
            ));
        }
        let student = self.repository.students_create(data).await?;
        tracing::info!("Created student {}", student.registration_number);
        Ok(student)
    }

    pub async fn list(&self) -> AppResult<Vec<Student>> {
        self.repository.students_list().await
    }

    pub async fn get(&self, registration_number: &str) -> AppResult<Student> {
        self.repository
            .students_get(registration_number)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn update(&self, registration_number: &str, data: &UpdateStudent) -> AppResult<Student> {
        self.repository
            .students_update(registration_number, data)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete(&self, registration_number: &str) -> AppResult<()> {
        if self.repository.students_delete(registration_number).await? == 0 {
            return Err(not_found());
        }
        Ok(())
    }

    /// Rows currently held in the import staging table
    pub async fn list_staged(&self) -> AppResult<Vec<ImportRecord>> {
        Ok(self.repository.staging_list().await?)
    }
}
