//! # Domain Module
//!
//! Business rules for the bookkeeping ledger, independent of HTTP.
//!
//! ## Module Organization
//!
//! - **account_service**: account CRUD and the opening-balance rule
//! - **category_service**: income/expense categories and their reference checks
//! - **transaction_service**: the append-only ledger and its balance effect
//! - **budget_service**: expense budgets, their status and the monthly overview
//! - **summary**: pure aggregation over accounts and transactions
//!
//! ## Invariants
//!
//! - An account balance equals its opening balance plus the signed sum of its
//!   transactions. Both change together inside one SQLite transaction.
//! - A transaction's type always equals its category's type.
//! - Referenced accounts and categories are never deleted; deletion is
//!   rejected with [`LedgerError::Conflict`] instead of cascading.

pub mod account_service;
pub mod budget_service;
pub mod category_service;
pub mod commands;
pub mod error;
pub mod models;
pub mod money;
pub mod summary;
pub mod transaction_service;
pub mod validation;

pub use account_service::AccountService;
pub use budget_service::BudgetService;
pub use category_service::CategoryService;
pub use error::{LedgerError, LedgerResult};
pub use summary::SummaryService;
pub use transaction_service::TransactionService;
