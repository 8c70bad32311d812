//! # REST API for Budgets

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error::ApiError;
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::mappers::BudgetMapper;
use crate::AppState;
use shared::{BudgetListQuery, BudgetRequest};

pub async fn list_budgets(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BudgetListQuery>,
) -> impl IntoResponse {
    info!("GET /budgets - query: {:?}", query);

    match state.budget_service.list_budgets(BudgetMapper::to_filter(query)).await {
        Ok(budgets) => (StatusCode::OK, Json(BudgetMapper::to_dto_list(budgets))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn create_budget(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BudgetRequest>,
) -> impl IntoResponse {
    info!("POST /budgets - request: {:?}", request);

    match state.budget_service.create_budget(BudgetMapper::to_command(request)).await {
        Ok(budget) => (StatusCode::CREATED, Json(BudgetMapper::to_dto(budget))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Spending against one budget over its own window
pub async fn get_budget_status(
    State(state): State<AppState>,
    ApiPath(budget_id): ApiPath<i64>,
) -> impl IntoResponse {
    info!("GET /budgets/{}/status", budget_id);

    match state.budget_service.budget_status(budget_id).await {
        Ok(status) => (StatusCode::OK, Json(BudgetMapper::to_status_dto(status))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_budget(
    State(state): State<AppState>,
    ApiPath(budget_id): ApiPath<i64>,
    ApiJson(request): ApiJson<BudgetRequest>,
) -> impl IntoResponse {
    info!("PUT /budgets/{} - request: {:?}", budget_id, request);

    match state
        .budget_service
        .update_budget(budget_id, BudgetMapper::to_command(request))
        .await
    {
        Ok(budget) => (StatusCode::OK, Json(BudgetMapper::to_dto(budget))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_budget(
    State(state): State<AppState>,
    ApiPath(budget_id): ApiPath<i64>,
) -> impl IntoResponse {
    info!("DELETE /budgets/{}", budget_id);

    match state.budget_service.delete_budget(budget_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
