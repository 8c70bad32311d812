pub mod account;
pub mod budget;
pub mod category;
pub mod transaction;

pub use account::Account;
pub use budget::{Budget, BudgetOverview, BudgetStatus};
pub use category::Category;
pub use transaction::{NewTransaction, Transaction, TransactionFilter, TransactionType};
