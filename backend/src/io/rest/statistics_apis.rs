//! # REST API for Derived Totals
//!
//! Summary, statistics and the monthly budget overview. All of them are
//! recomputed from current rows on every request.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Local;
use tracing::info;

use super::error::ApiError;
use super::extract::ApiQuery;
use super::mappers::{BudgetMapper, StatisticsMapper};
use crate::AppState;
use shared::StatisticsQuery;

/// Total balance across accounts plus all-time income and expense
pub async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /summary");

    match state.summary_service.summary().await {
        Ok(summary) => (StatusCode::OK, Json(StatisticsMapper::to_summary_dto(summary))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_statistics(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatisticsQuery>,
) -> impl IntoResponse {
    info!("GET /statistics - query: {:?}", query);

    let today = Local::now().date_naive();
    match state
        .summary_service
        .statistics(query.start_date, query.end_date, today)
        .await
    {
        Ok(stats) => (StatusCode::OK, Json(StatisticsMapper::to_statistics_dto(stats))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Budgets active this calendar month and this month's spending against them
pub async fn get_budget_overview(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /statistics/budget-overview");

    let today = Local::now().date_naive();
    match state.budget_service.budget_overview(today).await {
        Ok(overview) => (StatusCode::OK, Json(BudgetMapper::to_overview_dto(overview))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
