use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::domain::models::Budget;
use crate::domain::money::from_cents;
use crate::storage::connection::DbConnection;
use crate::storage::timestamp;

const SELECT_BUDGETS: &str = r#"
    SELECT id, category_id, amount_cents, start_date, end_date, created_at, updated_at
    FROM budgets
"#;

/// Filters for listing budgets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetFilter {
    pub category_id: Option<i64>,
    /// Keep budgets starting on or after this date
    pub start_date: Option<NaiveDate>,
    /// Keep budgets ending on or before this date
    pub end_date: Option<NaiveDate>,
}

/// Repository for budget operations
#[derive(Clone)]
pub struct BudgetRepository {
    db: DbConnection,
}

impl BudgetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a budget if its category exists and is an expense category.
    /// Returns `None` (and writes nothing) otherwise.
    pub async fn store_budget(
        &self,
        category_id: i64,
        amount_cents: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Option<Budget>> {
        let stamp = timestamp(&now);
        let result = sqlx::query(
            r#"
            INSERT INTO budgets (category_id, amount_cents, start_date, end_date, created_at, updated_at)
            SELECT ?, ?, ?, ?, ?, ?
            WHERE EXISTS (SELECT 1 FROM categories WHERE id = ? AND type = 'expense')
            "#,
        )
        .bind(category_id)
        .bind(amount_cents)
        .bind(start_date)
        .bind(end_date)
        .bind(&stamp)
        .bind(&stamp)
        .bind(category_id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let id = result.last_insert_rowid();
        self.get_budget(id)
            .await?
            .map(Some)
            .ok_or_else(|| anyhow!("Budget {} vanished after insert", id))
    }

    pub async fn get_budget(&self, id: i64) -> Result<Option<Budget>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_BUDGETS))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_budget).transpose()
    }

    pub async fn list_budgets(&self, filter: &BudgetFilter) -> Result<Vec<Budget>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_BUDGETS);
        query.push(" WHERE 1 = 1");

        if let Some(category_id) = filter.category_id {
            query.push(" AND category_id = ").push_bind(category_id);
        }
        if let Some(start) = filter.start_date {
            query.push(" AND start_date >= ").push_bind(start);
        }
        if let Some(end) = filter.end_date {
            query.push(" AND end_date <= ").push_bind(end);
        }
        query.push(" ORDER BY id ASC");

        let rows = query.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(row_to_budget).collect()
    }

    /// Replace every mutable field of an existing budget. Like
    /// [`Self::store_budget`], the target category must be an expense category;
    /// returns `false` if it is not or the budget is missing.
    pub async fn update_budget(&self, budget: &Budget, amount_cents: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE budgets
            SET category_id = ?, amount_cents = ?, start_date = ?, end_date = ?, updated_at = ?
            WHERE id = ?
              AND EXISTS (SELECT 1 FROM categories WHERE id = ? AND type = 'expense')
            "#,
        )
        .bind(budget.category_id)
        .bind(amount_cents)
        .bind(budget.start_date)
        .bind(budget.end_date)
        .bind(timestamp(&budget.updated_at))
        .bind(budget.id)
        .bind(budget.category_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_budget(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_for_category(&self, category_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM budgets WHERE category_id = ?")
            .bind(category_id)
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}

fn row_to_budget(row: &SqliteRow) -> Result<Budget> {
    Ok(Budget {
        id: row.try_get("id")?,
        category_id: row.try_get("category_id")?,
        amount: from_cents(row.try_get("amount_cents")?),
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
