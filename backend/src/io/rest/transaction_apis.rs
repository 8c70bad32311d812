//! # REST API for the Transaction Ledger
//!
//! Transactions are append-only, so there is no update or delete route.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error::ApiError;
use super::extract::{ApiJson, ApiQuery};
use super::mappers::TransactionMapper;
use crate::AppState;
use shared::{CreateTransactionRequest, TransactionListQuery};

/// List transactions newest first
pub async fn list_transactions(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TransactionListQuery>,
) -> impl IntoResponse {
    info!("GET /transactions - query: {:?}", query);

    let filter = TransactionMapper::to_filter(query);
    match state.transaction_service.list_transactions(filter).await {
        Ok(transactions) => {
            (StatusCode::OK, Json(TransactionMapper::to_dto_list(transactions))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Record a transaction and update the account balance
pub async fn create_transaction(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTransactionRequest>,
) -> impl IntoResponse {
    info!("POST /transactions - request: {:?}", request);

    let command = TransactionMapper::to_create_command(request);
    match state.transaction_service.create_transaction(command).await {
        Ok(transaction) => {
            (StatusCode::CREATED, Json(TransactionMapper::to_dto(transaction))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
