// Repository modules
pub mod account_repository;
pub mod budget_repository;
pub mod category_repository;
pub mod transaction_repository;

// Re-export repository types
pub use account_repository::AccountRepository;
pub use budget_repository::{BudgetFilter, BudgetRepository};
pub use category_repository::CategoryRepository;
pub use transaction_repository::{AppendOutcome, TransactionRepository};
