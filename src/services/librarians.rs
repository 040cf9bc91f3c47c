//! Librarian management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::http::StatusCode;

use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::librarian::{Librarian, LibrarianInput},
    repository::Repository,
};

#[derive(Clone)]
pub struct LibrariansService {
    repository: Repository,
}

fn not_found() -> AppError {
    AppError::NotFound("Librarian not found".to_string())
}

fn already_registered() -> AppError {
    AppError::field(
        StatusCode::BAD_REQUEST,
        "A librarian with this CPF or e-mail already exists",
        "cpf",
        "CPF or e-mail already registered",
    )
}

impl LibrariansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    pub async fn create(&self, data: &LibrarianInput) -> AppResult<Librarian> {
        if self.repository.librarians_exists(&data.cpf, &data.email).await? {
            return Err(already_registered());
        }
        let hash = self.hash_password(&data.password)?;
        self.repository
            .librarians_create(&data.cpf, &data.name, &data.email, &hash)
            .await
    }

    pub async fn list(&self) -> AppResult<Vec<Librarian>> {
        self.repository.librarians_list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Librarian> {
        self.repository.librarians_get(id).await?.ok_or_else(not_found)
    }

    pub async fn update(&self, id: i32, data: &LibrarianInput) -> AppResult<Librarian> {
        let hash = self.hash_password(&data.password)?;
        match self
            .repository
            .librarians_update(id, &data.cpf, &data.name, &data.email, &hash)
            .await
        {
            Ok(Some(librarian)) => Ok(librarian),
            Ok(None) => Err(not_found()),
            Err(AppError::Database(e)) if is_unique_violation(&e) => Err(already_registered()),
            Err(e) => Err(e),
        }
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repository.librarians_delete(id).await? == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
