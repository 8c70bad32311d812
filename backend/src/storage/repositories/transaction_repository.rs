use anyhow::Result;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::domain::models::{NewTransaction, Transaction, TransactionFilter, TransactionType};
use crate::domain::money::from_cents;
use crate::storage::connection::DbConnection;
use crate::storage::timestamp;

const SELECT_TRANSACTIONS: &str = r#"
    SELECT id, account_id, category_id, amount_cents, type, description, date, created_at
    FROM transactions
"#;

/// Result of [`TransactionRepository::append_transaction`]. Only `Appended`
/// writes anything.
#[derive(Debug, Clone, PartialEq)]
pub enum AppendOutcome {
    Appended(Transaction),
    MissingAccount,
    /// The category is gone or no longer has the entry's type
    CategoryMismatch,
}

/// Repository for the append-only ledger
#[derive(Clone)]
pub struct TransactionRepository {
    db: DbConnection,
}

impl TransactionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Append a ledger entry and apply its balance effect in one transaction.
    ///
    /// The balance update is the first statement, so the write lock is taken
    /// before anything is read and concurrent appends serialize on it. The
    /// insert only happens while the category still has the entry's type; a
    /// concurrent type change therefore either lands before (and the append is
    /// rolled back) or after (and sees the new transaction).
    pub async fn append_transaction(&self, new: &NewTransaction) -> Result<AppendOutcome> {
        let mut tx = self.db.pool().begin().await?;

        let delta = new.transaction_type.balance_effect(new.amount_cents);
        let updated = sqlx::query(
            r#"
            UPDATE accounts
            SET balance_cents = balance_cents + ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(delta)
        .bind(timestamp(&new.created_at))
        .bind(new.account_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(AppendOutcome::MissingAccount);
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO transactions (account_id, category_id, amount_cents, type, description, date, created_at)
            SELECT ?, ?, ?, ?, ?, ?, ?
            WHERE EXISTS (SELECT 1 FROM categories WHERE id = ? AND type = ?)
            "#,
        )
        .bind(new.account_id)
        .bind(new.category_id)
        .bind(new.amount_cents)
        .bind(new.transaction_type.as_str())
        .bind(&new.description)
        .bind(new.date)
        .bind(timestamp(&new.created_at))
        .bind(new.category_id)
        .bind(new.transaction_type.as_str())
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(AppendOutcome::CategoryMismatch);
        }

        let id = inserted.last_insert_rowid();
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_TRANSACTIONS))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        let transaction = row_to_transaction(&row)?;

        tx.commit().await?;
        Ok(AppendOutcome::Appended(transaction))
    }

    /// List entries newest first (date, then creation time, then id)
    pub async fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_TRANSACTIONS);
        query.push(" WHERE 1 = 1");

        if let Some(account_id) = filter.account_id {
            query.push(" AND account_id = ").push_bind(account_id);
        }
        if let Some(kind) = filter.transaction_type {
            query.push(" AND type = ").push_bind(kind.as_str());
        }
        if let Some(category_id) = filter.category_id {
            query.push(" AND category_id = ").push_bind(category_id);
        }
        if let Some(from) = filter.date_from {
            query.push(" AND date >= ").push_bind(from);
        }
        if let Some(to) = filter.date_to {
            query.push(" AND date <= ").push_bind(to);
        }
        query.push(" ORDER BY date DESC, created_at DESC, id DESC");

        let rows = query.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(row_to_transaction).collect()
    }

    pub async fn count_for_account(&self, account_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE account_id = ?")
            .bind(account_id)
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }

    pub async fn count_for_category(&self, category_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE category_id = ?")
            .bind(category_id)
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }

    /// Sum of expense cents in a category dated within `[start, end]`
    pub async fn sum_expenses(&self, category_id: i64, start: NaiveDate, end: NaiveDate) -> Result<i64> {
        let total = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount_cents), 0)
            FROM transactions
            WHERE category_id = ? AND type = 'expense' AND date BETWEEN ? AND ?
            "#,
        )
        .bind(category_id)
        .bind(start)
        .bind(end)
        .fetch_one(self.db.pool())
        .await?;
        Ok(total)
    }
}

fn row_to_transaction(row: &SqliteRow) -> Result<Transaction> {
    let kind: String = row.try_get("type")?;
    Ok(Transaction {
        id: row.try_get("id")?,
        account_id: row.try_get("account_id")?,
        category_id: row.try_get("category_id")?,
        amount: from_cents(row.try_get("amount_cents")?),
        transaction_type: TransactionType::parse(&kind)?,
        description: row.try_get("description")?,
        date: row.try_get("date")?,
        created_at: row.try_get("created_at")?,
    })
}
