//! Dashboard endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::dashboard::{CopyAvailability, DashboardSummary, LoansPerMonth, OverdueLoan, TopBook},
    AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopBooksQuery {
    /// Number of books to return (default: 5)
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoansPerMonthQuery {
    /// Calendar year (default: current year)
    pub year: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/dashboard/summary",
    tag = "dashboard",
    responses((status = 200, description = "Counters", body = DashboardSummary))
)]
pub async fn get_summary(State(state): State<AppState>) -> AppResult<Json<DashboardSummary>> {
    Ok(Json(state.services.dashboard.summary().await?))
}

/// Most borrowed books
#[utoipa::path(
    get,
    path = "/dashboard/top-books",
    tag = "dashboard",
    params(TopBooksQuery),
    responses((status = 200, description = "Most borrowed books", body = Vec<TopBook>))
)]
pub async fn get_top_books(
    State(state): State<AppState>,
    Query(query): Query<TopBooksQuery>,
) -> AppResult<Json<Vec<TopBook>>> {
    Ok(Json(state.services.dashboard.top_books(query.limit).await?))
}

#[utoipa::path(
    get,
    path = "/dashboard/overdue-loans",
    tag = "dashboard",
    responses((status = 200, description = "Open loans past their due date", body = Vec<OverdueLoan>))
)]
pub async fn get_overdue_loans(State(state): State<AppState>) -> AppResult<Json<Vec<OverdueLoan>>> {
    Ok(Json(state.services.dashboard.overdue_loans().await?))
}

#[utoipa::path(
    get,
    path = "/dashboard/loans-per-month",
    tag = "dashboard",
    params(LoansPerMonthQuery),
    responses((status = 200, description = "Loans grouped by month", body = LoansPerMonth))
)]
pub async fn get_loans_per_month(
    State(state): State<AppState>,
    Query(query): Query<LoansPerMonthQuery>,
) -> AppResult<Json<LoansPerMonth>> {
    Ok(Json(state.services.dashboard.loans_per_month(query.year).await?))
}

#[utoipa::path(
    get,
    path = "/dashboard/copy-availability",
    tag = "dashboard",
    responses((status = 200, description = "Copies by availability", body = CopyAvailability))
)]
pub async fn get_copy_availability(
    State(state): State<AppState>,
) -> AppResult<Json<CopyAvailability>> {
    Ok(Json(state.services.dashboard.copy_availability().await?))
}
