//! Derived totals over accounts and the ledger.
//!
//! Everything here is recomputed per request from the current rows. The pure
//! functions do not depend on the order of their inputs.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::models::{Account, Category, Transaction, TransactionFilter, TransactionType};
use crate::domain::money::percentage;
use crate::storage::{AccountRepository, CategoryRepository, DbConnection, TransactionRepository};

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_balance: Decimal,
    pub total_income: Decimal,
    pub total_expense: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category_id: i64,
    pub category_name: String,
    pub category_type: TransactionType,
    pub amount: Decimal,
    /// Share of all transactions of the same type in the window
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
    pub net_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_amount: Decimal,
    pub by_category: Vec<CategoryTotal>,
    pub by_month: Vec<MonthTotal>,
}

pub fn compute_summary(accounts: &[Account], transactions: &[Transaction]) -> Summary {
    let total_balance: Decimal = accounts.iter().map(|a| a.balance).sum();
    let (total_income, total_expense) = split_totals(transactions.iter());

    Summary {
        total_balance,
        total_income,
        total_expense,
    }
}

/// Statistics over the transactions dated within `[start, end]`.
///
/// `by_category` is sorted by amount descending (ties by category id) and
/// `by_month` runs newest month first.
pub fn compute_statistics(
    categories: &[Category],
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Statistics {
    let in_window: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.date >= start && t.date <= end)
        .collect();

    let (total_income, total_expense) = split_totals(in_window.iter().copied());

    let mut per_category: HashMap<i64, Decimal> = HashMap::new();
    let mut per_month: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for t in &in_window {
        *per_category.entry(t.category_id).or_default() += t.amount;

        let month = per_month.entry((t.date.year(), t.date.month())).or_default();
        match t.transaction_type {
            TransactionType::Income => month.0 += t.amount,
            TransactionType::Expense => month.1 += t.amount,
        }
    }

    let mut by_category: Vec<CategoryTotal> = categories
        .iter()
        .filter_map(|c| {
            let amount = *per_category.get(&c.id)?;
            let type_total = match c.category_type {
                TransactionType::Income => total_income,
                TransactionType::Expense => total_expense,
            };
            Some(CategoryTotal {
                category_id: c.id,
                category_name: c.name.clone(),
                category_type: c.category_type,
                amount,
                percentage: percentage(amount, type_total),
            })
        })
        .collect();
    by_category.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category_id.cmp(&b.category_id)));

    let by_month: Vec<MonthTotal> = per_month
        .into_iter()
        .rev()
        .map(|((year, month), (income, expense))| MonthTotal {
            year,
            month,
            income,
            expense,
            net_amount: income - expense,
        })
        .collect();

    Statistics {
        start_date: start,
        end_date: end,
        total_income,
        total_expense,
        net_amount: total_income - total_expense,
        by_category,
        by_month,
    }
}

fn split_totals<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> (Decimal, Decimal) {
    transactions.fold((Decimal::ZERO, Decimal::ZERO), |(income, expense), t| {
        match t.transaction_type {
            TransactionType::Income => (income + t.amount, expense),
            TransactionType::Expense => (income, expense + t.amount),
        }
    })
}

/// Loads current rows and runs the aggregations over them
#[derive(Clone)]
pub struct SummaryService {
    accounts: AccountRepository,
    categories: CategoryRepository,
    transactions: TransactionRepository,
}

impl SummaryService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            accounts: AccountRepository::new(db.clone()),
            categories: CategoryRepository::new(db.clone()),
            transactions: TransactionRepository::new(db),
        }
    }

    pub async fn summary(&self) -> LedgerResult<Summary> {
        let accounts = self.accounts.list_accounts().await?;
        let transactions = self
            .transactions
            .list_transactions(&TransactionFilter::default())
            .await?;

        let summary = compute_summary(&accounts, &transactions);
        info!(
            "Summary: balance={}, income={}, expense={}",
            summary.total_balance, summary.total_income, summary.total_expense
        );
        Ok(summary)
    }

    /// Statistics for `[start, end]`; a missing bound defaults to one year
    /// before `today` or to `today` itself
    pub async fn statistics(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> LedgerResult<Statistics> {
        let end = end.unwrap_or(today);
        let start = match start {
            Some(start) => start,
            None => today
                .checked_sub_months(Months::new(12))
                .ok_or_else(|| LedgerError::validation(format!("Date {} is out of range", today)))?,
        };
        if start > end {
            return Err(LedgerError::validation("start_date cannot be after end_date"));
        }

        info!("Computing statistics for {}..{}", start, end);

        let categories = self.categories.list_categories(None).await?;
        let transactions = self
            .transactions
            .list_transactions(&TransactionFilter {
                date_from: Some(start),
                date_to: Some(end),
                ..Default::default()
            })
            .await?;

        Ok(compute_statistics(&categories, &transactions, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn account(id: i64, balance: Decimal) -> Account {
        Account {
            id,
            name: format!("Account {}", id),
            balance,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn category(id: i64, name: &str, kind: TransactionType) -> Category {
        Category {
            id,
            name: name.to_string(),
            category_type: kind,
            icon: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn transaction(id: i64, category_id: i64, kind: TransactionType, amount: Decimal, date: &str) -> Transaction {
        Transaction {
            id,
            account_id: 1,
            category_id,
            amount,
            transaction_type: kind,
            description: None,
            date: date.parse().unwrap(),
            created_at: Utc::now(),
        }
    }

    fn sample_ledger() -> Vec<Transaction> {
        vec![
            transaction(1, 1, TransactionType::Income, dec!(3000), "2025-01-31"),
            transaction(2, 2, TransactionType::Expense, dec!(120.40), "2025-01-12"),
            transaction(3, 3, TransactionType::Expense, dec!(900), "2025-02-01"),
            transaction(4, 2, TransactionType::Expense, dec!(79.60), "2025-02-14"),
            transaction(5, 1, TransactionType::Income, dec!(3000), "2025-02-28"),
        ]
    }

    fn sample_categories() -> Vec<Category> {
        vec![
            category(1, "Salary", TransactionType::Income),
            category(2, "Food", TransactionType::Expense),
            category(3, "Rent", TransactionType::Expense),
            category(4, "Unused", TransactionType::Expense),
        ]
    }

    #[test]
    fn test_compute_summary() {
        let accounts = vec![account(1, dec!(100)), account(2, dec!(50.25))];
        let summary = compute_summary(&accounts, &sample_ledger());

        assert_eq!(summary.total_balance, dec!(150.25));
        assert_eq!(summary.total_income, dec!(6000));
        assert_eq!(summary.total_expense, dec!(1100));
    }

    #[test]
    fn test_compute_summary_empty() {
        let summary = compute_summary(&[], &[]);
        assert_eq!(summary.total_balance, Decimal::ZERO);
        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.total_expense, Decimal::ZERO);
    }

    #[test]
    fn test_compute_summary_is_order_independent() {
        let accounts = vec![account(1, dec!(10)), account(2, dec!(20))];
        let ledger = sample_ledger();
        let expected = compute_summary(&accounts, &ledger);

        let mut reversed = ledger.clone();
        reversed.reverse();
        let mut rotated = ledger.clone();
        rotated.rotate_left(2);
        let mut swapped_accounts = accounts.clone();
        swapped_accounts.reverse();

        assert_eq!(compute_summary(&accounts, &reversed), expected);
        assert_eq!(compute_summary(&accounts, &rotated), expected);
        assert_eq!(compute_summary(&swapped_accounts, &ledger), expected);
    }

    #[test]
    fn test_compute_statistics() {
        let stats = compute_statistics(
            &sample_categories(),
            &sample_ledger(),
            "2025-01-01".parse().unwrap(),
            "2025-12-31".parse().unwrap(),
        );

        assert_eq!(stats.total_income, dec!(6000));
        assert_eq!(stats.total_expense, dec!(1100));
        assert_eq!(stats.net_amount, dec!(4900));

        let names: Vec<&str> = stats.by_category.iter().map(|c| c.category_name.as_str()).collect();
        assert_eq!(names, vec!["Salary", "Rent", "Food"]);
        assert_eq!(stats.by_category[0].percentage, dec!(100));
        assert_eq!(stats.by_category[1].percentage, dec!(81.82));
        assert_eq!(stats.by_category[2].amount, dec!(200.00));
        assert_eq!(stats.by_category[2].percentage, dec!(18.18));

        assert_eq!(stats.by_month.len(), 2);
        let february = &stats.by_month[0];
        assert_eq!((february.year, february.month), (2025, 2));
        assert_eq!(february.income, dec!(3000));
        assert_eq!(february.expense, dec!(979.60));
        assert_eq!(february.net_amount, dec!(2020.40));
        assert_eq!((stats.by_month[1].year, stats.by_month[1].month), (2025, 1));
    }

    #[test]
    fn test_compute_statistics_respects_window() {
        let stats = compute_statistics(
            &sample_categories(),
            &sample_ledger(),
            "2025-02-01".parse().unwrap(),
            "2025-02-14".parse().unwrap(),
        );

        assert_eq!(stats.total_income, Decimal::ZERO);
        assert_eq!(stats.total_expense, dec!(979.60));
        assert_eq!(stats.by_month.len(), 1);
        assert!(stats.by_category.iter().all(|c| c.category_type == TransactionType::Expense));
    }

    #[tokio::test]
    async fn test_statistics_window_defaults_and_validation() {
        let db = DbConnection::init_in_memory().await.expect("Failed to create test database");
        let service = SummaryService::new(db);
        let today: NaiveDate = "2025-06-15".parse().unwrap();

        let stats = service.statistics(None, None, today).await.unwrap();
        assert_eq!(stats.start_date, "2024-06-15".parse().unwrap());
        assert_eq!(stats.end_date, today);
        assert!(stats.by_category.is_empty());

        let inverted = service
            .statistics(Some("2025-07-01".parse().unwrap()), Some(today), today)
            .await;
        assert!(matches!(inverted, Err(LedgerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_summary_reads_current_rows() {
        let db = DbConnection::init_in_memory().await.expect("Failed to create test database");
        let accounts = AccountRepository::new(db.clone());
        accounts.store_account("Checking", 10000, Utc::now()).await.unwrap();
        accounts.store_account("Savings", 2550, Utc::now()).await.unwrap();

        let summary = SummaryService::new(db).summary().await.unwrap();
        assert_eq!(summary.total_balance, dec!(125.50));
        assert_eq!(summary.total_income, Decimal::ZERO);
    }
}
