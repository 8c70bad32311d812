use chrono::{Datelike, Months, NaiveDate, Utc};
use tracing::{info, warn};

use crate::domain::commands::budgets::BudgetCommand;
use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::models::{Budget, BudgetOverview, BudgetStatus, Category, TransactionType};
use crate::domain::money::{from_cents, positive_cents};
use crate::storage::{BudgetFilter, BudgetRepository, CategoryRepository, DbConnection, TransactionRepository};

/// Service for expense budgets and how much of them has been spent
#[derive(Clone)]
pub struct BudgetService {
    budgets: BudgetRepository,
    categories: CategoryRepository,
    transactions: TransactionRepository,
}

impl BudgetService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            budgets: BudgetRepository::new(db.clone()),
            categories: CategoryRepository::new(db.clone()),
            transactions: TransactionRepository::new(db),
        }
    }

    pub async fn list_budgets(&self, filter: BudgetFilter) -> LedgerResult<Vec<Budget>> {
        let budgets = self.budgets.list_budgets(&filter).await?;
        info!("Found {} budgets", budgets.len());
        Ok(budgets)
    }

    pub async fn get_budget(&self, id: i64) -> LedgerResult<Budget> {
        self.budgets
            .get_budget(id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Budget", id))
    }

    pub async fn create_budget(&self, command: BudgetCommand) -> LedgerResult<Budget> {
        info!(
            "Creating budget: category_id={}, amount={}, {}..{}",
            command.category_id, command.amount, command.start_date, command.end_date
        );

        let amount_cents = self.validate(&command).await?;
        let budget = self
            .budgets
            .store_budget(
                command.category_id,
                amount_cents,
                command.start_date,
                command.end_date,
                Utc::now(),
            )
            .await
            .map_err(|e| LedgerError::from_storage(e, "Category was removed concurrently"))?;
        let budget = match budget {
            Some(budget) => budget,
            None => return Err(self.category_refused(command.category_id).await),
        };

        info!("Created budget with ID: {}", budget.id);
        Ok(budget)
    }

    /// Replace every field of an existing budget
    pub async fn update_budget(&self, id: i64, command: BudgetCommand) -> LedgerResult<Budget> {
        info!("Updating budget: {}", id);

        let mut budget = self.get_budget(id).await?;
        let amount_cents = self.validate(&command).await?;

        budget.category_id = command.category_id;
        budget.start_date = command.start_date;
        budget.end_date = command.end_date;
        budget.updated_at = Utc::now();

        let updated = self
            .budgets
            .update_budget(&budget, amount_cents)
            .await
            .map_err(|e| LedgerError::from_storage(e, "Category was removed concurrently"))?;
        if !updated {
            if self.budgets.get_budget(id).await?.is_none() {
                return Err(LedgerError::not_found("Budget", id));
            }
            return Err(self.category_refused(budget.category_id).await);
        }

        self.get_budget(id).await
    }

    pub async fn delete_budget(&self, id: i64) -> LedgerResult<()> {
        info!("Deleting budget: {}", id);

        if !self.budgets.delete_budget(id).await? {
            return Err(LedgerError::not_found("Budget", id));
        }

        info!("Deleted budget with ID: {}", id);
        Ok(())
    }

    /// Expenses in the budget's category over the budget's own window
    pub async fn budget_status(&self, id: i64) -> LedgerResult<BudgetStatus> {
        let budget = self.get_budget(id).await?;
        let spent = self
            .transactions
            .sum_expenses(budget.category_id, budget.start_date, budget.end_date)
            .await?;

        Ok(BudgetStatus::new(budget, from_cents(spent)))
    }

    /// Every budget overlapping the month containing `today`, measured against
    /// that month's expenses only
    pub async fn budget_overview(&self, today: NaiveDate) -> LedgerResult<BudgetOverview> {
        let (month_start, month_end) = month_bounds(today)?;
        info!("Building budget overview for {}..{}", month_start, month_end);

        let budgets = self.budgets.list_budgets(&BudgetFilter::default()).await?;
        let mut statuses = Vec::new();
        for budget in budgets.into_iter().filter(|b| b.overlaps(month_start, month_end)) {
            let spent = self
                .transactions
                .sum_expenses(budget.category_id, month_start, month_end)
                .await?;
            statuses.push(BudgetStatus::new(budget, from_cents(spent)));
        }

        Ok(BudgetOverview {
            start_date: month_start,
            end_date: month_end,
            budgets: statuses,
        })
    }

    async fn validate(&self, command: &BudgetCommand) -> LedgerResult<i64> {
        let category = self
            .categories
            .get_category(command.category_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Category", command.category_id))?;

        if category.category_type != TransactionType::Expense {
            return Err(income_category(&category));
        }

        let amount_cents = positive_cents(command.amount)?;

        if command.end_date < command.start_date {
            return Err(LedgerError::validation("End date cannot be before start date"));
        }

        Ok(amount_cents)
    }

    /// Error for a budget write the store refused after validation passed:
    /// the category was deleted or turned into an income category meanwhile.
    async fn category_refused(&self, category_id: i64) -> LedgerError {
        match self.categories.get_category(category_id).await {
            Ok(Some(category)) => income_category(&category),
            Ok(None) => LedgerError::not_found("Category", category_id),
            Err(e) => e.into(),
        }
    }
}

fn income_category(category: &Category) -> LedgerError {
    warn!("Rejected budget on income category {}", category.id);
    LedgerError::validation(format!(
        "Budgets can only be set on expense categories; '{}' is an income category",
        category.name
    ))
}

/// First and last day of the month containing `date`
fn month_bounds(date: NaiveDate) -> LedgerResult<(NaiveDate, NaiveDate)> {
    let start = date
        .with_day(1)
        .ok_or_else(|| LedgerError::validation(format!("No first day for {}", date)))?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| LedgerError::validation(format!("Month of {} is out of range", date)))?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::transactions::CreateTransactionCommand;
    use crate::domain::TransactionService;
    use crate::storage::AccountRepository;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    struct Fixture {
        service: BudgetService,
        ledger: TransactionService,
        account_id: i64,
        food_id: i64,
        rent_id: i64,
        salary_id: i64,
    }

    async fn setup_test() -> Fixture {
        let db = DbConnection::init_in_memory().await.expect("Failed to create test database");
        let categories = CategoryRepository::new(db.clone());
        let account = AccountRepository::new(db.clone())
            .store_account("Checking", 100000, Utc::now())
            .await
            .unwrap();
        let food = categories
            .store_category("Food", TransactionType::Expense, None, Utc::now())
            .await
            .unwrap();
        let rent = categories
            .store_category("Rent", TransactionType::Expense, None, Utc::now())
            .await
            .unwrap();
        let salary = categories
            .store_category("Salary", TransactionType::Income, None, Utc::now())
            .await
            .unwrap();

        Fixture {
            service: BudgetService::new(db.clone()),
            ledger: TransactionService::new(db),
            account_id: account.id,
            food_id: food.id,
            rent_id: rent.id,
            salary_id: salary.id,
        }
    }

    fn date(value: &str) -> NaiveDate {
        value.parse().unwrap()
    }

    fn budget(category_id: i64, amount: Decimal, start: &str, end: &str) -> BudgetCommand {
        BudgetCommand {
            category_id,
            amount,
            start_date: date(start),
            end_date: date(end),
        }
    }

    async fn record(f: &Fixture, category_id: i64, kind: TransactionType, amount: Decimal, on: &str) {
        f.ledger
            .create_transaction(CreateTransactionCommand {
                account_id: f.account_id,
                category_id,
                amount,
                transaction_type: kind,
                description: None,
                date: Some(date(on)),
            })
            .await
            .unwrap();
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(date("2024-02-14")).unwrap(),
            (date("2024-02-01"), date("2024-02-29"))
        );
        assert_eq!(
            month_bounds(date("2025-12-31")).unwrap(),
            (date("2025-12-01"), date("2025-12-31"))
        );
    }

    #[tokio::test]
    async fn test_create_budget_validation() {
        let f = setup_test().await;

        let income = f
            .service
            .create_budget(budget(f.salary_id, dec!(100), "2025-01-01", "2025-01-31"))
            .await;
        assert!(matches!(income, Err(LedgerError::Validation(_))));

        let zero = f
            .service
            .create_budget(budget(f.food_id, dec!(0), "2025-01-01", "2025-01-31"))
            .await;
        assert!(matches!(zero, Err(LedgerError::Validation(_))));

        let backwards = f
            .service
            .create_budget(budget(f.food_id, dec!(10), "2025-02-01", "2025-01-31"))
            .await;
        assert!(matches!(backwards, Err(LedgerError::Validation(_))));

        let missing = f
            .service
            .create_budget(budget(999, dec!(10), "2025-01-01", "2025-01-31"))
            .await;
        assert!(matches!(missing, Err(LedgerError::NotFound { .. })));

        let single_day = f
            .service
            .create_budget(budget(f.food_id, dec!(10), "2025-01-01", "2025-01-01"))
            .await
            .unwrap();
        assert_eq!(single_day.amount, dec!(10.00));
    }

    #[tokio::test]
    async fn test_status_counts_only_matching_expenses() {
        let f = setup_test().await;
        let groceries = f
            .service
            .create_budget(budget(f.food_id, dec!(400), "2025-01-01", "2025-01-31"))
            .await
            .unwrap();

        record(&f, f.food_id, TransactionType::Expense, dec!(120.50), "2025-01-05").await;
        record(&f, f.food_id, TransactionType::Expense, dec!(79.50), "2025-01-31").await;
        // Outside the window
        record(&f, f.food_id, TransactionType::Expense, dec!(500), "2025-02-01").await;
        // Other category
        record(&f, f.rent_id, TransactionType::Expense, dec!(900), "2025-01-10").await;
        // Income never counts
        record(&f, f.salary_id, TransactionType::Income, dec!(3000), "2025-01-15").await;

        let status = f.service.budget_status(groceries.id).await.unwrap();
        assert_eq!(status.actual_expense, dec!(200.00));
        assert_eq!(status.remaining, dec!(200.00));
        assert_eq!(status.percentage_used, dec!(50.00));
        assert_eq!(status.budget, groceries);
    }

    #[tokio::test]
    async fn test_update_and_delete_budget() {
        let f = setup_test().await;
        let created = f
            .service
            .create_budget(budget(f.food_id, dec!(100), "2025-01-01", "2025-01-31"))
            .await
            .unwrap();

        let updated = f
            .service
            .update_budget(created.id, budget(f.rent_id, dec!(1500), "2025-01-01", "2025-06-30"))
            .await
            .unwrap();
        assert_eq!(updated.category_id, f.rent_id);
        assert_eq!(updated.amount, dec!(1500.00));
        assert_eq!(updated.end_date, date("2025-06-30"));
        assert_eq!(updated.created_at, created.created_at);

        let invalid = f
            .service
            .update_budget(created.id, budget(f.salary_id, dec!(1), "2025-01-01", "2025-01-31"))
            .await;
        assert!(matches!(invalid, Err(LedgerError::Validation(_))));

        f.service.delete_budget(created.id).await.unwrap();
        assert!(matches!(
            f.service.budget_status(created.id).await,
            Err(LedgerError::NotFound { .. })
        ));
        assert!(matches!(
            f.service.delete_budget(created.id).await,
            Err(LedgerError::NotFound { .. })
        ));
        assert!(matches!(
            f.service
                .update_budget(created.id, budget(f.food_id, dec!(1), "2025-01-01", "2025-01-31"))
                .await,
            Err(LedgerError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_budgets_filtered() {
        let f = setup_test().await;
        f.service
            .create_budget(budget(f.food_id, dec!(100), "2025-01-01", "2025-01-31"))
            .await
            .unwrap();
        f.service
            .create_budget(budget(f.rent_id, dec!(900), "2025-01-01", "2025-12-31"))
            .await
            .unwrap();

        let food = f
            .service
            .list_budgets(BudgetFilter {
                category_id: Some(f.food_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(food.len(), 1);

        let all = f.service.list_budgets(BudgetFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].id < all[1].id);
    }

    #[tokio::test]
    async fn test_overview_uses_current_month() {
        let f = setup_test().await;
        f.service
            .create_budget(budget(f.food_id, dec!(300), "2025-01-01", "2025-12-31"))
            .await
            .unwrap();
        // Ends before March
        f.service
            .create_budget(budget(f.rent_id, dec!(900), "2025-01-01", "2025-02-28"))
            .await
            .unwrap();

        record(&f, f.food_id, TransactionType::Expense, dec!(50), "2025-02-20").await;
        record(&f, f.food_id, TransactionType::Expense, dec!(75), "2025-03-02").await;

        let overview = f.service.budget_overview(date("2025-03-15")).await.unwrap();
        assert_eq!(overview.start_date, date("2025-03-01"));
        assert_eq!(overview.end_date, date("2025-03-31"));
        assert_eq!(overview.budgets.len(), 1);

        let food = &overview.budgets[0];
        assert_eq!(food.budget.category_id, f.food_id);
        assert_eq!(food.actual_expense, dec!(75.00));
        assert_eq!(food.remaining, dec!(225.00));
        assert_eq!(food.percentage_used, dec!(25.00));
    }
}
