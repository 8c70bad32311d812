//! Domain-level command types.
//!
//! Services take these instead of the wire DTOs in `shared`; the REST layer
//! maps requests onto them.

pub mod accounts {
    use rust_decimal::Decimal;

    #[derive(Debug, Clone)]
    pub struct CreateAccountCommand {
        pub name: String,
        pub initial_balance: Decimal,
    }

    /// Partial update; `None` leaves the field untouched
    #[derive(Debug, Clone, Default)]
    pub struct UpdateAccountCommand {
        pub name: Option<String>,
        pub balance: Option<Decimal>,
    }
}

pub mod categories {
    use crate::domain::models::TransactionType;

    #[derive(Debug, Clone)]
    pub struct CreateCategoryCommand {
        pub name: String,
        pub category_type: TransactionType,
        pub icon: Option<String>,
    }

    /// Partial update; `None` leaves the field untouched and an empty icon clears it
    #[derive(Debug, Clone, Default)]
    pub struct UpdateCategoryCommand {
        pub name: Option<String>,
        pub category_type: Option<TransactionType>,
        pub icon: Option<String>,
    }
}

pub mod transactions {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::domain::models::TransactionType;

    #[derive(Debug, Clone)]
    pub struct CreateTransactionCommand {
        pub account_id: i64,
        pub category_id: i64,
        pub amount: Decimal,
        pub transaction_type: TransactionType,
        pub description: Option<String>,
        pub date: Option<NaiveDate>,
    }
}

pub mod budgets {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    /// Used for both create and full replacement
    #[derive(Debug, Clone)]
    pub struct BudgetCommand {
        pub category_id: i64,
        pub amount: Decimal,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
    }
}
