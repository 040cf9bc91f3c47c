//! Student endpoints, including the spreadsheet import

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::{multipart::MultipartError, Multipart};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult, ImportError},
    models::{
        student::{CreateStudent, Student, UpdateStudent},
        ImportRecord, ImportSummary,
    },
    AppState,
};

/// Multipart field carrying the workbook
const FILE_FIELD: &str = "file";

/// Multipart body of the import request
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImportUpload {
    /// Workbook (xlsx, xls or ods)
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

fn upload_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::field(
            StatusCode::PAYLOAD_TOO_LARGE,
            "Uploaded file is too large",
            FILE_FIELD,
            "File exceeds max_upload_bytes",
        );
    }
    AppError::BadRequest(e.body_text())
}

/// List students
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    responses(
        (status = 200, description = "All students", body = Vec<Student>)
    )
)]
pub async fn list_students(State(state): State<AppState>) -> AppResult<Json<Vec<Student>>> {
    Ok(Json(state.services.students.list().await?))
}

/// Get a student by registration number
#[utoipa::path(
    get,
    path = "/students/{registration_number}",
    tag = "students",
    params(("registration_number" = String, Path, description = "Registration number")),
    responses(
        (status = 200, description = "Student", body = Student),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(registration_number): Path<String>,
) -> AppResult<Json<Student>> {
    Ok(Json(state.services.students.get(&registration_number).await?))
}

/// Create a student
#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    request_body = CreateStudent,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Invalid body or CPF already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    Json(data): Json<CreateStudent>,
) -> AppResult<(StatusCode, Json<Student>)> {
    data.validate().map_err(AppError::from_validation)?;
    let student = state.services.students.create(&data).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Update a student
#[utoipa::path(
    put,
    path = "/students/{registration_number}",
    tag = "students",
    params(("registration_number" = String, Path, description = "Registration number")),
    request_body = UpdateStudent,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(registration_number): Path<String>,
    Json(data): Json<UpdateStudent>,
) -> AppResult<Json<Student>> {
    data.validate().map_err(AppError::from_validation)?;
    Ok(Json(
        state
            .services
            .students
            .update(&registration_number, &data)
            .await?,
    ))
}

/// Delete a student
#[utoipa::path(
    delete,
    path = "/students/{registration_number}",
    tag = "students",
    params(("registration_number" = String, Path, description = "Registration number")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(registration_number): Path<String>,
) -> AppResult<StatusCode> {
    state.services.students.delete(&registration_number).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Import students from an uploaded spreadsheet
///
/// Reads the first sheet, keeps rows from the configured city and upserts
/// them into the staging table keyed on registration number.
#[utoipa::path(
    post,
    path = "/students/import",
    tag = "students",
    request_body(content = ImportUpload, content_type = "multipart/form-data", description = "Workbook in the `file` field"),
    responses(
        (status = 200, description = "Rows imported", body = ImportSummary),
        (status = 400, description = "No file, empty sheet or no rows for the city", body = crate::error::ErrorResponse),
        (status = 413, description = "Upload larger than the configured limit", body = crate::error::ErrorResponse),
        (status = 500, description = "Unreadable workbook or storage failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn import_students(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ImportSummary>> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(upload_error)?
    {
        if field.name() == Some(FILE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(upload_error)?;
            upload = Some(bytes);
            break;
        }
    }

    let bytes = match upload {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Err(ImportError::MissingFile.into()),
    };

    tracing::info!("Student import upload received ({} bytes)", bytes.len());
    let summary = state.services.imports.import_students(bytes.to_vec()).await?;
    Ok(Json(summary))
}

/// List rows held in the import staging table
#[utoipa::path(
    get,
    path = "/students/imports",
    tag = "students",
    responses(
        (status = 200, description = "Staged import rows", body = Vec<ImportRecord>)
    )
)]
pub async fn list_imported(State(state): State<AppState>) -> AppResult<Json<Vec<ImportRecord>>> {
    Ok(Json(state.services.students.list_staged().await?))
}
