//! # REST API Interface Layer
//!
//! Axum handlers for every endpoint, mounted at the root path.
//!
//! ## Conventions
//!
//! - Lists are returned as bare JSON arrays
//! - Creates answer `201 Created`, deletes answer `204 No Content`
//! - Money is always a string with two decimal places
//! - Every failure is `{"error": "<message>"}` with a status from [`error::ApiError`]
//! - Each handler logs its route at `info` before calling the domain

pub mod account_apis;
pub mod budget_apis;
pub mod category_apis;
pub mod error;
pub mod extract;
pub mod health_apis;
pub mod mappers;
pub mod statistics_apis;
pub mod transaction_apis;
