//! Class endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::class::{CreateClass, SchoolClass},
    AppState,
};

/// List classes
#[utoipa::path(
    get,
    path = "/classes",
    tag = "classes",
    responses((status = 200, description = "All classes", body = Vec<SchoolClass>))
)]
pub async fn list_classes(State(state): State<AppState>) -> AppResult<Json<Vec<SchoolClass>>> {
    Ok(Json(state.services.classes.list().await?))
}

/// Create a class
#[utoipa::path(
    post,
    path = "/classes",
    tag = "classes",
    request_body = CreateClass,
    responses(
        (status = 201, description = "Class created", body = SchoolClass),
        (status = 400, description = "Invalid body or duplicate class", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_class(
    State(state): State<AppState>,
    Json(data): Json<CreateClass>,
) -> AppResult<(StatusCode, Json<SchoolClass>)> {
    data.validate().map_err(AppError::from_validation)?;
    let class = state.services.classes.create(&data).await?;
    Ok((StatusCode::CREATED, Json(class)))
}
