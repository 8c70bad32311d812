//! # REST API for Accounts

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error::ApiError;
use super::extract::{ApiJson, ApiPath};
use super::mappers::AccountMapper;
use crate::AppState;
use shared::{CreateAccountRequest, UpdateAccountRequest};

/// List all accounts
pub async fn list_accounts(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /accounts");

    match state.account_service.list_accounts().await {
        Ok(accounts) => (StatusCode::OK, Json(AccountMapper::to_dto_list(accounts))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Create a new account
pub async fn create_account(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateAccountRequest>,
) -> impl IntoResponse {
    info!("POST /accounts - request: {:?}", request);

    let command = AccountMapper::to_create_command(request);
    match state.account_service.create_account(command).await {
        Ok(account) => (StatusCode::CREATED, Json(AccountMapper::to_dto(account))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Rename an account or correct its opening balance
pub async fn update_account(
    State(state): State<AppState>,
    ApiPath(account_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateAccountRequest>,
) -> impl IntoResponse {
    info!("PUT /accounts/{} - request: {:?}", account_id, request);

    let command = AccountMapper::to_update_command(request);
    match state.account_service.update_account(account_id, command).await {
        Ok(account) => (StatusCode::OK, Json(AccountMapper::to_dto(account))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_account(
    State(state): State<AppState>,
    ApiPath(account_id): ApiPath<i64>,
) -> impl IntoResponse {
    info!("DELETE /accounts/{}", account_id);

    match state.account_service.delete_account(account_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
