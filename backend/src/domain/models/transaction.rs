use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Direction of a money movement. Categories carry one too, and a
/// transaction's type must equal its category's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Parse the value stored in the `type` column
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(anyhow!("Unknown transaction type in storage: {}", other)),
        }
    }

    /// Balance delta caused by moving `cents` in this direction
    pub fn balance_effect(&self, cents: i64) -> i64 {
        match self {
            TransactionType::Income => cents,
            TransactionType::Expense => -cents,
        }
    }
}

/// A ledger entry. Immutable once written.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A validated entry that has not been written yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub account_id: i64,
    pub category_id: i64,
    pub amount_cents: i64,
    pub transaction_type: TransactionType,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Optional filters for listing the ledger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub account_id: Option<i64>,
    pub transaction_type: Option<TransactionType>,
    pub category_id: Option<i64>,
    /// Inclusive lower bound on `date`
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on `date`
    pub date_to: Option<NaiveDate>,
}
