//! # Ledger Backend
//!
//! REST backend for personal bookkeeping: accounts, income/expense
//! categories, an append-only transaction ledger, budgets and derived totals.
//!
//! ## Layers
//!
//! - **storage**: SQLite pool, schema and one repository per table
//! - **domain**: services enforcing the ledger rules
//! - **io**: axum handlers, DTO mappers and error translation
//!
//! [`initialize_backend`] wires the services onto one connection pool and
//! [`create_router`] mounts every route on an [`AppState`].

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::domain::{AccountService, BudgetService, CategoryService, SummaryService, TransactionService};
use crate::io::rest::{
    account_apis, budget_apis, category_apis, health_apis, statistics_apis, transaction_apis,
};
use crate::storage::DbConnection;

#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub category_service: CategoryService,
    pub transaction_service: TransactionService,
    pub budget_service: BudgetService,
    pub summary_service: SummaryService,
}

pub fn initialize_backend(db: DbConnection) -> AppState {
    info!("Setting up domain services");
    AppState {
        account_service: AccountService::new(db.clone()),
        category_service: CategoryService::new(db.clone()),
        transaction_service: TransactionService::new(db.clone()),
        budget_service: BudgetService::new(db.clone()),
        summary_service: SummaryService::new(db),
    }
}

/// Build the router. With no `cors_origin` any origin may call the API.
pub fn create_router(app_state: AppState, cors_origin: Option<&str>) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    let cors = match cors_origin {
        Some(origin) => cors.allow_origin(
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", origin))?,
        ),
        None => cors.allow_origin(Any),
    };

    let router = Router::new()
        .route("/health", get(health_apis::health))
        .route(
            "/accounts",
            get(account_apis::list_accounts).post(account_apis::create_account),
        )
        .route(
            "/accounts/:id",
            put(account_apis::update_account).delete(account_apis::delete_account),
        )
        .route(
            "/categories",
            get(category_apis::list_categories).post(category_apis::create_category),
        )
        .route(
            "/categories/:id",
            put(category_apis::update_category).delete(category_apis::delete_category),
        )
        .route(
            "/transactions",
            get(transaction_apis::list_transactions).post(transaction_apis::create_transaction),
        )
        .route("/summary", get(statistics_apis::get_summary))
        .route("/statistics", get(statistics_apis::get_statistics))
        .route("/statistics/budget-overview", get(statistics_apis::get_budget_overview))
        .route(
            "/budgets",
            get(budget_apis::list_budgets).post(budget_apis::create_budget),
        )
        .route(
            "/budgets/:id",
            put(budget_apis::update_budget).delete(budget_apis::delete_budget),
        )
        .route("/budgets/:id/status", get(budget_apis::get_budget_status))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    Ok(router)
}
