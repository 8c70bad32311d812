use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::domain::money::percentage;

/// Spending cap for one expense category over an inclusive date window
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// True if the budget window shares at least one day with `[start, end]`
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }
}

/// Spending measured against a budget over some window
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub actual_expense: Decimal,
    pub remaining: Decimal,
    pub percentage_used: Decimal,
}

impl BudgetStatus {
    pub fn new(budget: Budget, actual_expense: Decimal) -> Self {
        let remaining = budget.amount - actual_expense;
        let percentage_used = percentage(actual_expense, budget.amount);
        Self {
            budget,
            actual_expense,
            remaining,
            percentage_used,
        }
    }
}

/// Budgets active in one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetOverview {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budgets: Vec<BudgetStatus>,
}
