pub mod account_mapper;
pub mod budget_mapper;
pub mod category_mapper;
pub mod statistics_mapper;
pub mod transaction_mapper;

pub use account_mapper::AccountMapper;
pub use budget_mapper::BudgetMapper;
pub use category_mapper::CategoryMapper;
pub use statistics_mapper::StatisticsMapper;
pub use transaction_mapper::{TransactionMapper, TransactionTypeMapper};
