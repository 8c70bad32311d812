use chrono::Utc;
use tracing::{info, warn};

use crate::domain::commands::accounts::{CreateAccountCommand, UpdateAccountCommand};
use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::models::Account;
use crate::domain::money::{non_negative_cents, to_cents};
use crate::domain::validation::validate_name;
use crate::storage::{AccountRepository, DbConnection, TransactionRepository};

/// Service for managing accounts
#[derive(Clone)]
pub struct AccountService {
    accounts: AccountRepository,
    transactions: TransactionRepository,
}

impl AccountService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            accounts: AccountRepository::new(db.clone()),
            transactions: TransactionRepository::new(db),
        }
    }

    /// List all accounts, oldest first
    pub async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        let accounts = self.accounts.list_accounts().await?;
        info!("Found {} accounts", accounts.len());
        Ok(accounts)
    }

    pub async fn get_account(&self, id: i64) -> LedgerResult<Account> {
        self.accounts
            .get_account(id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Account", id))
    }

    /// Create an account with a non-negative opening balance
    pub async fn create_account(&self, command: CreateAccountCommand) -> LedgerResult<Account> {
        info!("Creating account: name={}", command.name);

        let name = validate_name(&command.name, "Account")?;
        let balance_cents = non_negative_cents(command.initial_balance)?;

        let account = self.accounts.store_account(&name, balance_cents, Utc::now()).await?;

        info!("Created account {} with ID: {}", account.name, account.id);
        Ok(account)
    }

    /// Partially update an account.
    ///
    /// The balance may only be overwritten while the account has no ledger
    /// entries; afterwards it moves only through transactions.
    pub async fn update_account(&self, id: i64, command: UpdateAccountCommand) -> LedgerResult<Account> {
        info!("Updating account: {}", id);

        let existing = self.get_account(id).await?;

        let name = match command.name {
            Some(ref name) => validate_name(name, "Account")?,
            None => existing.name.clone(),
        };
        let new_balance = command.balance.map(non_negative_cents).transpose()?;
        let current_cents = to_cents(existing.balance)?;
        let now = Utc::now();

        match new_balance {
            Some(cents) if cents != current_cents => {
                let updated = self
                    .accounts
                    .update_opening_balance(id, &name, cents, now)
                    .await?;
                if !updated {
                    // Either it vanished or it has ledger entries
                    if self.accounts.get_account(id).await?.is_none() {
                        return Err(LedgerError::not_found("Account", id));
                    }
                    warn!("Rejected balance overwrite on account {} with ledger entries", id);
                    return Err(LedgerError::conflict(format!(
                        "Account {} has transactions; its balance can only change through new transactions",
                        id
                    )));
                }
            }
            _ => {
                if !self.accounts.update_name(id, &name, now).await? {
                    return Err(LedgerError::not_found("Account", id));
                }
            }
        }

        let account = self.get_account(id).await?;
        info!("Updated account {} with ID: {}", account.name, account.id);
        Ok(account)
    }

    /// Delete an account that no transaction references
    pub async fn delete_account(&self, id: i64) -> LedgerResult<()> {
        info!("Deleting account: {}", id);

        let account = self.get_account(id).await?;

        let references = self.transactions.count_for_account(id).await?;
        if references > 0 {
            warn!("Refusing to delete account {} with {} transactions", id, references);
            return Err(LedgerError::conflict(format!(
                "Account {} is referenced by {} transactions",
                id, references
            )));
        }

        let deleted = self
            .accounts
            .delete_account(id)
            .await
            .map_err(|e| LedgerError::from_storage(e, "Account is referenced by transactions"))?;
        if !deleted {
            return Err(LedgerError::not_found("Account", id));
        }

        info!("Deleted account {} with ID: {}", account.name, account.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::transactions::CreateTransactionCommand;
    use crate::domain::models::TransactionType;
    use crate::domain::TransactionService;
    use crate::storage::CategoryRepository;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    async fn setup_test() -> (AccountService, DbConnection) {
        let db = DbConnection::init_in_memory().await.expect("Failed to create test database");
        (AccountService::new(db.clone()), db)
    }

    fn create(name: &str, balance: Decimal) -> CreateAccountCommand {
        CreateAccountCommand {
            name: name.to_string(),
            initial_balance: balance,
        }
    }

    async fn record_income(db: &DbConnection, account_id: i64) {
        let category = CategoryRepository::new(db.clone())
            .store_category("Salary", TransactionType::Income, None, Utc::now())
            .await
            .unwrap();
        TransactionService::new(db.clone())
            .create_transaction(CreateTransactionCommand {
                account_id,
                category_id: category.id,
                amount: dec!(10),
                transaction_type: TransactionType::Income,
                description: None,
                date: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_account() {
        let (service, _) = setup_test().await;

        let account = service.create_account(create("  Checking ", dec!(100))).await.unwrap();

        assert_eq!(account.name, "Checking");
        assert_eq!(account.balance, dec!(100));
        assert_eq!(account.created_at, account.updated_at);
    }

    #[tokio::test]
    async fn test_create_account_validation() {
        let (service, _) = setup_test().await;

        let empty = service.create_account(create("", dec!(0))).await;
        assert!(matches!(empty, Err(LedgerError::Validation(_))));

        let negative = service.create_account(create("Cash", dec!(-5))).await;
        assert!(matches!(negative, Err(LedgerError::Validation(_))));

        let sub_cent = service.create_account(create("Cash", dec!(1.001))).await;
        assert!(matches!(sub_cent, Err(LedgerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_created_account_listed_exactly_once() {
        let (service, _) = setup_test().await;
        service.create_account(create("Savings", dec!(0))).await.unwrap();
        let created = service.create_account(create("Wallet", dec!(20))).await.unwrap();

        let accounts = service.list_accounts().await.unwrap();
        assert_eq!(accounts.iter().filter(|a| a.id == created.id).count(), 1);
        assert_eq!(accounts.len(), 2);
    }

    #[tokio::test]
    async fn test_update_account_partial() {
        let (service, _) = setup_test().await;
        let account = service.create_account(create("Old", dec!(10))).await.unwrap();

        let renamed = service
            .update_account(
                account.id,
                UpdateAccountCommand {
                    name: Some("New".to_string()),
                    balance: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "New");
        assert_eq!(renamed.balance, dec!(10));
        assert_eq!(renamed.created_at, account.created_at);

        let rebalanced = service
            .update_account(
                account.id,
                UpdateAccountCommand {
                    name: None,
                    balance: Some(dec!(25.50)),
                },
            )
            .await
            .unwrap();
        assert_eq!(rebalanced.name, "New");
        assert_eq!(rebalanced.balance, dec!(25.50));
    }

    #[tokio::test]
    async fn test_update_nonexistent_account() {
        let (service, _) = setup_test().await;

        let result = service.update_account(999, UpdateAccountCommand::default()).await;
        assert!(matches!(result, Err(LedgerError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_balance_overwrite_rejected_after_transactions() {
        let (service, db) = setup_test().await;
        let account = service.create_account(create("Checking", dec!(100))).await.unwrap();
        record_income(&db, account.id).await;

        let result = service
            .update_account(
                account.id,
                UpdateAccountCommand {
                    name: None,
                    balance: Some(dec!(0)),
                },
            )
            .await;
        assert!(matches!(result, Err(LedgerError::Conflict(_))));

        // Renaming is still fine, and restating the current balance is a no-op
        let renamed = service
            .update_account(
                account.id,
                UpdateAccountCommand {
                    name: Some("Main".to_string()),
                    balance: Some(dec!(110)),
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Main");
        assert_eq!(renamed.balance, dec!(110));
    }

    #[tokio::test]
    async fn test_delete_account() {
        let (service, _) = setup_test().await;
        let account = service.create_account(create("Temp", dec!(0))).await.unwrap();

        service.delete_account(account.id).await.unwrap();

        assert!(matches!(
            service.get_account(account.id).await,
            Err(LedgerError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete_account(account.id).await,
            Err(LedgerError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_referenced_account_conflicts() {
        let (service, db) = setup_test().await;
        let account = service.create_account(create("Checking", dec!(0))).await.unwrap();
        record_income(&db, account.id).await;

        let result = service.delete_account(account.id).await;
        assert!(matches!(result, Err(LedgerError::Conflict(_))));
        assert!(service.get_account(account.id).await.is_ok());
    }
}
