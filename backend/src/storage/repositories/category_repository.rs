use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::domain::models::{Category, TransactionType};
use crate::storage::connection::DbConnection;
use crate::storage::timestamp;

/// Repository for category operations
#[derive(Clone)]
pub struct CategoryRepository {
    db: DbConnection,
}

impl CategoryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn store_category(
        &self,
        name: &str,
        category_type: TransactionType,
        icon: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Category> {
        let stamp = timestamp(&now);
        let result = sqlx::query(
            r#"
            INSERT INTO categories (name, type, icon, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(category_type.as_str())
        .bind(icon)
        .bind(&stamp)
        .bind(&stamp)
        .execute(self.db.pool())
        .await?;

        let id = result.last_insert_rowid();
        self.get_category(id)
            .await?
            .ok_or_else(|| anyhow!("Category {} vanished after insert", id))
    }

    pub async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, type, icon, created_at, updated_at
            FROM categories
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(row_to_category).transpose()
    }

    /// List categories ordered by id, optionally only one type
    pub async fn list_categories(&self, category_type: Option<TransactionType>) -> Result<Vec<Category>> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id, name, type, icon, created_at, updated_at FROM categories");
        if let Some(kind) = category_type {
            query.push(" WHERE type = ").push_bind(kind.as_str());
        }
        query.push(" ORDER BY id ASC");

        let rows = query.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(row_to_category).collect()
    }

    /// Persist name, type and icon of an existing category.
    ///
    /// A type change is only written while no transaction references the
    /// category, and a change to income only while no budget does. Returns
    /// `false` if the category is missing or the change was refused.
    pub async fn update_category(&self, category: &Category) -> Result<bool> {
        let kind = category.category_type.as_str();
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = ?, type = ?, icon = ?, updated_at = ?
            WHERE id = ?
              AND (
                type = ?
                OR (
                  NOT EXISTS (SELECT 1 FROM transactions WHERE category_id = ?)
                  AND (? = 'expense' OR NOT EXISTS (SELECT 1 FROM budgets WHERE category_id = ?))
                )
              )
            "#,
        )
        .bind(&category.name)
        .bind(kind)
        .bind(&category.icon)
        .bind(timestamp(&category.updated_at))
        .bind(category.id)
        .bind(kind)
        .bind(category.id)
        .bind(kind)
        .bind(category.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_category(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_category(row: &SqliteRow) -> Result<Category> {
    let kind: String = row.try_get("type")?;
    Ok(Category {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        category_type: TransactionType::parse(&kind)?,
        icon: row.try_get("icon")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
