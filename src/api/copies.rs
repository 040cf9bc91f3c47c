//! Copy endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::copy::{BookCopy, CopyDetails, CreateCopy, UpdateCopy},
    AppState,
};

#[utoipa::path(
    get,
    path = "/copies",
    tag = "copies",
    responses((status = 200, description = "All copies with availability", body = Vec<CopyDetails>))
)]
pub async fn list_copies(State(state): State<AppState>) -> AppResult<Json<Vec<CopyDetails>>> {
    Ok(Json(state.services.copies.list().await?))
}

#[utoipa::path(
    get,
    path = "/copies/{id}",
    tag = "copies",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Copy", body = CopyDetails),
        (status = 404, description = "Copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_copy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CopyDetails>> {
    Ok(Json(state.services.copies.get(id).await?))
}

/// Copies of one book
#[utoipa::path(
    get,
    path = "/books/{isbn}/copies",
    tag = "copies",
    params(("isbn" = String, Path, description = "ISBN")),
    responses((status = 200, description = "Copies of the book", body = Vec<CopyDetails>))
)]
pub async fn list_book_copies(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<Vec<CopyDetails>>> {
    Ok(Json(state.services.copies.list_by_book(&isbn).await?))
}

#[utoipa::path(
    post,
    path = "/copies",
    tag = "copies",
    request_body = CreateCopy,
    responses(
        (status = 201, description = "Copy created", body = BookCopy),
        (status = 400, description = "Invalid body or unknown ISBN", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_copy(
    State(state): State<AppState>,
    Json(data): Json<CreateCopy>,
) -> AppResult<(StatusCode, Json<BookCopy>)> {
    data.validate().map_err(AppError::from_validation)?;
    let copy = state.services.copies.create(&data).await?;
    Ok((StatusCode::CREATED, Json(copy)))
}

#[utoipa::path(
    put,
    path = "/copies/{id}",
    tag = "copies",
    params(("id" = i32, Path, description = "Copy ID")),
    request_body = UpdateCopy,
    responses(
        (status = 200, description = "Copy updated", body = BookCopy),
        (status = 404, description = "Copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_copy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateCopy>,
) -> AppResult<Json<BookCopy>> {
    data.validate().map_err(AppError::from_validation)?;
    Ok(Json(state.services.copies.update(id, &data).await?))
}

#[utoipa::path(
    delete,
    path = "/copies/{id}",
    tag = "copies",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 204, description = "Copy deleted"),
        (status = 404, description = "Copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_copy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.copies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
