use chrono::{Local, Utc};
use tracing::{info, warn};

use crate::domain::commands::transactions::CreateTransactionCommand;
use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::models::{Category, NewTransaction, Transaction, TransactionFilter, TransactionType};
use crate::domain::money::positive_cents;
use crate::domain::validation::normalize_description;
use crate::storage::{AccountRepository, AppendOutcome, CategoryRepository, DbConnection, TransactionRepository};

/// Service for the append-only transaction ledger
#[derive(Clone)]
pub struct TransactionService {
    transactions: TransactionRepository,
    accounts: AccountRepository,
    categories: CategoryRepository,
}

impl TransactionService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            transactions: TransactionRepository::new(db.clone()),
            accounts: AccountRepository::new(db.clone()),
            categories: CategoryRepository::new(db),
        }
    }

    pub async fn list_transactions(&self, filter: TransactionFilter) -> LedgerResult<Vec<Transaction>> {
        info!("Listing transactions: {:?}", filter);
        let transactions = self.transactions.list_transactions(&filter).await?;
        info!("Found {} transactions", transactions.len());
        Ok(transactions)
    }

    /// Record a transaction and apply it to its account balance.
    ///
    /// Checks run in order: account, category, amount, type match,
    /// description. Nothing is written unless all of them pass.
    pub async fn create_transaction(&self, command: CreateTransactionCommand) -> LedgerResult<Transaction> {
        info!(
            "Creating transaction: account_id={}, category_id={}, amount={}, type={}",
            command.account_id,
            command.category_id,
            command.amount,
            command.transaction_type.as_str()
        );

        if self.accounts.get_account(command.account_id).await?.is_none() {
            return Err(LedgerError::not_found("Account", command.account_id));
        }

        let category = self
            .categories
            .get_category(command.category_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Category", command.category_id))?;

        let amount_cents = positive_cents(command.amount)?;

        if category.category_type != command.transaction_type {
            return Err(type_mismatch(command.transaction_type, &category));
        }

        let description = normalize_description(command.description)?;

        let new = NewTransaction {
            account_id: command.account_id,
            category_id: command.category_id,
            amount_cents,
            transaction_type: command.transaction_type,
            description,
            date: command.date.unwrap_or_else(|| Local::now().date_naive()),
            created_at: Utc::now(),
        };

        let outcome = self
            .transactions
            .append_transaction(&new)
            .await
            .map_err(|e| LedgerError::from_storage(e, "Account or category was removed concurrently"))?;

        let transaction = match outcome {
            AppendOutcome::Appended(transaction) => transaction,
            AppendOutcome::MissingAccount => return Err(LedgerError::not_found("Account", new.account_id)),
            // The category changed between validation and the write
            AppendOutcome::CategoryMismatch => {
                return Err(match self.categories.get_category(new.category_id).await? {
                    Some(category) => type_mismatch(new.transaction_type, &category),
                    None => LedgerError::not_found("Category", new.category_id),
                });
            }
        };

        info!(
            "Created transaction {} on account {} ({} {})",
            transaction.id,
            transaction.account_id,
            transaction.transaction_type.as_str(),
            transaction.amount
        );
        Ok(transaction)
    }
}

fn type_mismatch(transaction_type: TransactionType, category: &Category) -> LedgerError {
    warn!(
        "Type mismatch: {} transaction against {} category {}",
        transaction_type.as_str(),
        category.category_type.as_str(),
        category.id
    );
    LedgerError::validation(format!(
        "Transaction type '{}' does not match category type '{}'",
        transaction_type.as_str(),
        category.category_type.as_str()
    ))
}
