//! Error taxonomy for the ledger domain.
//!
//! Every service returns [`LedgerError`]; the REST layer maps each variant to a
//! single HTTP status.

use thiserror::Error;

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Bad input shape or range (400)
    #[error("{0}")]
    Validation(String),

    /// A referenced id does not exist (404)
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// The operation would break referential integrity (409)
    #[error("{0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        LedgerError::Conflict(message.into())
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        LedgerError::NotFound { entity, id }
    }

    /// Wrap a storage failure, turning a foreign-key violation into a conflict.
    ///
    /// Repositories return `anyhow` errors; a RESTRICT violation raised by
    /// SQLite means a concurrent writer added a reference after our check.
    pub fn from_storage(error: anyhow::Error, conflict_message: &str) -> Self {
        let is_fk_violation = error
            .downcast_ref::<sqlx::Error>()
            .and_then(|e| e.as_database_error())
            .map(|db_error| db_error.is_foreign_key_violation())
            .unwrap_or(false);

        if is_fk_violation {
            LedgerError::conflict(conflict_message)
        } else {
            LedgerError::Storage(error)
        }
    }
}
