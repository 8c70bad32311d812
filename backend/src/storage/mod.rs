//! # Storage Module
//!
//! SQLite persistence for the ledger. `DbConnection` owns the pool and the
//! schema; each table has a repository that speaks in domain models.
//!
//! Money is stored as integer cents and dates as `YYYY-MM-DD` text so that
//! ordering and range filters work directly in SQL.

pub mod connection;
pub mod repositories;

use chrono::{DateTime, SecondsFormat, Utc};

pub use connection::DbConnection;
pub use repositories::{
    AccountRepository,
    AppendOutcome,
    BudgetFilter,
    BudgetRepository,
    CategoryRepository,
    TransactionRepository,
};

/// Fixed-width RFC 3339 text so stored timestamps sort lexically
pub(crate) fn timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
