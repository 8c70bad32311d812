use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire format for money: a string with exactly two decimal places ("150.00").
///
/// Deserialization accepts both JSON strings and JSON numbers.
pub mod money {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:.2}", value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer)
    }
}

/// Whether money flows into (income) or out of (expense) an account.
/// Used both for categories and for transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
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
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    #[serde(with = "money")]
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    /// Opening balance; zero when omitted
    #[serde(default)]
    pub balance: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub balance: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub category_type: Option<TransactionType>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Query parameters for GET /categories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryListQuery {
    #[serde(default, rename = "type")]
    pub category_type: Option<TransactionType>,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub category_id: i64,
    /// Always positive; the direction is carried by `transaction_type`
    #[serde(with = "money")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub account_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to today (server clock) when omitted
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Query parameters for GET /transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionListQuery {
    #[serde(default)]
    pub account_id: Option<i64>,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(with = "money")]
    pub total_balance: Decimal,
    #[serde(with = "money")]
    pub total_income: Decimal,
    #[serde(with = "money")]
    pub total_expense: Decimal,
}

/// Query parameters for GET /statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsQuery {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "money")]
    pub total_income: Decimal,
    #[serde(with = "money")]
    pub total_expense: Decimal,
    #[serde(with = "money")]
    pub net_amount: Decimal,
    pub by_category: Vec<CategoryStatistics>,
    pub by_month: Vec<MonthlyStatistics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStatistics {
    pub category_id: i64,
    pub category_name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    #[serde(with = "money")]
    pub amount: Decimal,
    /// Share of the total for this category's type, in percent
    #[serde(with = "money")]
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStatistics {
    pub year: i32,
    pub month: u32,
    #[serde(with = "money")]
    pub income: Decimal,
    #[serde(with = "money")]
    pub expense: Decimal,
    #[serde(with = "money")]
    pub net_amount: Decimal,
}

// ---------------------------------------------------------------------------
// Budgets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category_id: i64,
    #[serde(with = "money")]
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for both POST /budgets and PUT /budgets/{id}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRequest {
    pub category_id: i64,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Query parameters for GET /budgets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetListQuery {
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub budget: Budget,
    #[serde(with = "money")]
    pub actual_expense: Decimal,
    #[serde(with = "money")]
    pub remaining: Decimal,
    #[serde(with = "money")]
    pub percentage_used: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetOverview {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budgets: Vec<BudgetStatus>,
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

/// Body of every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_money_serializes_with_two_decimals() {
        let summary = Summary {
            total_balance: dec!(150),
            total_income: dec!(12.5),
            total_expense: dec!(0),
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["total_balance"], "150.00");
        assert_eq!(value["total_income"], "12.50");
        assert_eq!(value["total_expense"], "0.00");
    }

    #[test]
    fn test_amount_accepts_number_or_string() {
        let from_number: CreateAccountRequest =
            serde_json::from_value(json!({"name": "Cash", "balance": 100.25})).unwrap();
        let from_string: CreateAccountRequest =
            serde_json::from_value(json!({"name": "Cash", "balance": "100.25"})).unwrap();

        assert_eq!(from_number.balance, dec!(100.25));
        assert_eq!(from_string.balance, dec!(100.25));
    }

    #[test]
    fn test_non_numeric_amount_is_rejected() {
        let result: Result<CreateAccountRequest, _> =
            serde_json::from_value(json!({"name": "Cash", "balance": "lots"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_transaction_type_uses_lowercase_type_key() {
        let request: CreateTransactionRequest = serde_json::from_value(json!({
            "account_id": 1,
            "category_id": 2,
            "amount": "50",
            "type": "income"
        }))
        .unwrap();

        assert_eq!(request.transaction_type, TransactionType::Income);
        assert_eq!(request.description, None);
        assert_eq!(request.date, None);

        let bad: Result<CreateCategoryRequest, _> =
            serde_json::from_value(json!({"name": "Food", "type": "transfer"}));
        assert!(bad.is_err());
    }

    #[test]
    fn test_opening_balance_defaults_to_zero() {
        let request: CreateAccountRequest = serde_json::from_value(json!({"name": "Wallet"})).unwrap();
        assert_eq!(request.balance, Decimal::ZERO);
    }
}
