//! # REST API for Categories

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error::ApiError;
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::mappers::{CategoryMapper, TransactionTypeMapper};
use crate::AppState;
use shared::{CategoryListQuery, CreateCategoryRequest, UpdateCategoryRequest};

/// List categories, optionally only one type
pub async fn list_categories(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CategoryListQuery>,
) -> impl IntoResponse {
    info!("GET /categories - query: {:?}", query);

    let category_type = query.category_type.map(TransactionTypeMapper::to_domain);
    match state.category_service.list_categories(category_type).await {
        Ok(categories) => (StatusCode::OK, Json(CategoryMapper::to_dto_list(categories))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateCategoryRequest>,
) -> impl IntoResponse {
    info!("POST /categories - request: {:?}", request);

    let command = CategoryMapper::to_create_command(request);
    match state.category_service.create_category(command).await {
        Ok(category) => (StatusCode::CREATED, Json(CategoryMapper::to_dto(category))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_category(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateCategoryRequest>,
) -> impl IntoResponse {
    info!("PUT /categories/{} - request: {:?}", category_id, request);

    let command = CategoryMapper::to_update_command(request);
    match state.category_service.update_category(category_id, command).await {
        Ok(category) => (StatusCode::OK, Json(CategoryMapper::to_dto(category))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_category(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<i64>,
) -> impl IntoResponse {
    info!("DELETE /categories/{}", category_id);

    match state.category_service.delete_category(category_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
