//! Librarian endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::librarian::{Librarian, LibrarianInput},
    AppState,
};

#[utoipa::path(
    get,
    path = "/librarians",
    tag = "librarians",
    responses((status = 200, description = "All librarians", body = Vec<Librarian>))
)]
pub async fn list_librarians(State(state): State<AppState>) -> AppResult<Json<Vec<Librarian>>> {
    Ok(Json(state.services.librarians.list().await?))
}

#[utoipa::path(
    get,
    path = "/librarians/{id}",
    tag = "librarians",
    params(("id" = i32, Path, description = "Librarian ID")),
    responses(
        (status = 200, description = "Librarian", body = Librarian),
        (status = 404, description = "Librarian not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_librarian(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Librarian>> {
    Ok(Json(state.services.librarians.get(id).await?))
}

/// Register a librarian; the password is stored as an Argon2 hash
#[utoipa::path(
    post,
    path = "/librarians",
    tag = "librarians",
    request_body = LibrarianInput,
    responses(
        (status = 201, description = "Librarian created", body = Librarian),
        (status = 400, description = "Invalid body or CPF/e-mail already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_librarian(
    State(state): State<AppState>,
    Json(data): Json<LibrarianInput>,
) -> AppResult<(StatusCode, Json<Librarian>)> {
    data.validate().map_err(AppError::from_validation)?;
    let librarian = state.services.librarians.create(&data).await?;
    Ok((StatusCode::CREATED, Json(librarian)))
}

#[utoipa::path(
    put,
    path = "/librarians/{id}",
    tag = "librarians",
    params(("id" = i32, Path, description = "Librarian ID")),
    request_body = LibrarianInput,
    responses(
        (status = 200, description = "Librarian updated", body = Librarian),
        (status = 404, description = "Librarian not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_librarian(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<LibrarianInput>,
) -> AppResult<Json<Librarian>> {
    data.validate().map_err(AppError::from_validation)?;
    Ok(Json(state.services.librarians.update(id, &data).await?))
}

#[utoipa::path(
    delete,
    path = "/librarians/{id}",
    tag = "librarians",
    params(("id" = i32, Path, description = "Librarian ID")),
    responses(
        (status = 204, description = "Librarian deleted"),
        (status = 404, description = "Librarian not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_librarian(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.librarians.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
