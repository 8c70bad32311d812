use chrono::Utc;
use tracing::{info, warn};

use crate::domain::commands::categories::{CreateCategoryCommand, UpdateCategoryCommand};
use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::models::{Category, TransactionType};
use crate::domain::validation::validate_name;
use crate::storage::{BudgetRepository, CategoryRepository, DbConnection, TransactionRepository};

/// Service for managing income and expense categories
#[derive(Clone)]
pub struct CategoryService {
    categories: CategoryRepository,
    transactions: TransactionRepository,
    budgets: BudgetRepository,
}

impl CategoryService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            categories: CategoryRepository::new(db.clone()),
            transactions: TransactionRepository::new(db.clone()),
            budgets: BudgetRepository::new(db),
        }
    }

    pub async fn list_categories(&self, category_type: Option<TransactionType>) -> LedgerResult<Vec<Category>> {
        let categories = self.categories.list_categories(category_type).await?;
        info!("Found {} categories", categories.len());
        Ok(categories)
    }

    pub async fn get_category(&self, id: i64) -> LedgerResult<Category> {
        self.categories
            .get_category(id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Category", id))
    }

    pub async fn create_category(&self, command: CreateCategoryCommand) -> LedgerResult<Category> {
        info!(
            "Creating category: name={}, type={}",
            command.name,
            command.category_type.as_str()
        );

        let name = validate_name(&command.name, "Category")?;
        let icon = normalize_icon(command.icon);

        let category = self
            .categories
            .store_category(&name, command.category_type, icon.as_deref(), Utc::now())
            .await?;

        info!("Created category {} with ID: {}", category.name, category.id);
        Ok(category)
    }

    /// Partially update a category.
    ///
    /// A type change must not strand existing transactions with a mismatched
    /// category, nor leave a budget pointing at an income category.
    pub async fn update_category(&self, id: i64, command: UpdateCategoryCommand) -> LedgerResult<Category> {
        info!("Updating category: {}", id);

        let mut category = self.get_category(id).await?;

        if let Some(ref name) = command.name {
            category.name = validate_name(name, "Category")?;
        }

        if let Some(new_type) = command.category_type {
            if new_type != category.category_type {
                self.check_type_change(id, new_type).await?;
                category.category_type = new_type;
            }
        }

        if command.icon.is_some() {
            category.icon = normalize_icon(command.icon);
        }

        category.updated_at = Utc::now();
        if !self.categories.update_category(&category).await? {
            // Either deleted, or a transaction or budget arrived after the check
            if self.categories.get_category(id).await?.is_none() {
                return Err(LedgerError::not_found("Category", id));
            }
            self.check_type_change(id, category.category_type).await?;
            return Err(LedgerError::conflict(format!(
                "Category {} changed concurrently; retry the update",
                id
            )));
        }

        info!("Updated category {} with ID: {}", category.name, category.id);
        self.get_category(id).await
    }

    async fn check_type_change(&self, id: i64, new_type: TransactionType) -> LedgerResult<()> {
        let transactions = self.transactions.count_for_category(id).await?;
        if transactions > 0 {
            warn!("Refusing type change on category {} with {} transactions", id, transactions);
            return Err(LedgerError::conflict(format!(
                "Category {} is used by {} transactions; its type cannot change",
                id, transactions
            )));
        }

        if new_type == TransactionType::Income {
            let budgets = self.budgets.count_for_category(id).await?;
            if budgets > 0 {
                warn!("Refusing to make budgeted category {} an income category", id);
                return Err(LedgerError::conflict(format!(
                    "Category {} has {} budgets; only expense categories can be budgeted",
                    id, budgets
                )));
            }
        }

        Ok(())
    }

    /// Delete a category that no transaction or budget references
    pub async fn delete_category(&self, id: i64) -> LedgerResult<()> {
        info!("Deleting category: {}", id);

        let category = self.get_category(id).await?;

        let transactions = self.transactions.count_for_category(id).await?;
        if transactions > 0 {
            warn!("Refusing to delete category {} with {} transactions", id, transactions);
            return Err(LedgerError::conflict(format!(
                "Category {} is referenced by {} transactions",
                id, transactions
            )));
        }

        let budgets = self.budgets.count_for_category(id).await?;
        if budgets > 0 {
            warn!("Refusing to delete category {} with {} budgets", id, budgets);
            return Err(LedgerError::conflict(format!(
                "Category {} is referenced by {} budgets",
                id, budgets
            )));
        }

        let deleted = self
            .categories
            .delete_category(id)
            .await
            .map_err(|e| LedgerError::from_storage(e, "Category is still referenced"))?;
        if !deleted {
            return Err(LedgerError::not_found("Category", id));
        }

        info!("Deleted category {} with ID: {}", category.name, category.id);
        Ok(())
    }
}

/// Blank icons are stored as absent
fn normalize_icon(icon: Option<String>) -> Option<String> {
    icon.map(|i| i.trim().to_string()).filter(|i| !i.is_empty())
}
