use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::Account;
use crate::domain::money::from_cents;
use crate::storage::connection::DbConnection;
use crate::storage::timestamp;

/// Repository for account operations
#[derive(Clone)]
pub struct AccountRepository {
    db: DbConnection,
}

impl AccountRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a new account and return it as stored
    pub async fn store_account(&self, name: &str, balance_cents: i64, now: DateTime<Utc>) -> Result<Account> {
        let stamp = timestamp(&now);
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (name, balance_cents, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(balance_cents)
        .bind(&stamp)
        .bind(&stamp)
        .execute(self.db.pool())
        .await?;

        let id = result.last_insert_rowid();
        self.get_account(id)
            .await?
            .ok_or_else(|| anyhow!("Account {} vanished after insert", id))
    }

    pub async fn get_account(&self, id: i64) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, balance_cents, created_at, updated_at
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(row_to_account).transpose()
    }

    /// List all accounts ordered by id
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, balance_cents, created_at, updated_at
            FROM accounts
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(row_to_account).collect()
    }

    /// Rename an account. Returns false if the account does not exist.
    pub async fn update_name(&self, id: i64, name: &str, now: DateTime<Utc>) -> Result<bool> {
        let result = sqlx::query("UPDATE accounts SET name = ?, updated_at = ? WHERE id = ?")
            .bind(name)
            .bind(timestamp(&now))
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Overwrite name and balance, but only while no ledger entry references
    /// the account. Returns false if the account is missing or has entries.
    pub async fn update_opening_balance(
        &self,
        id: i64,
        name: &str,
        balance_cents: i64,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET name = ?, balance_cents = ?, updated_at = ?
            WHERE id = ?
              AND NOT EXISTS (SELECT 1 FROM transactions WHERE account_id = ?)
            "#,
        )
        .bind(name)
        .bind(balance_cents)
        .bind(timestamp(&now))
        .bind(id)
        .bind(id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an account. Returns false if it did not exist.
    pub async fn delete_account(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_account(row: &SqliteRow) -> Result<Account> {
    Ok(Account {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        balance: from_cents(row.try_get("balance_cents")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
