use crate::domain::commands::transactions::CreateTransactionCommand;
use crate::domain::models::{
    Transaction as DomainTransaction, TransactionFilter, TransactionType as DomainTransactionType,
};
use shared::{
    CreateTransactionRequest, Transaction as SharedTransaction, TransactionListQuery,
    TransactionType as SharedTransactionType,
};

/// Maps the income/expense discriminator across the wire boundary
pub struct TransactionTypeMapper;

impl TransactionTypeMapper {
    pub fn to_domain(dto: SharedTransactionType) -> DomainTransactionType {
        match dto {
            SharedTransactionType::Income => DomainTransactionType::Income,
            SharedTransactionType::Expense => DomainTransactionType::Expense,
        }
    }

    pub fn to_dto(domain: DomainTransactionType) -> SharedTransactionType {
        match domain {
            DomainTransactionType::Income => SharedTransactionType::Income,
            DomainTransactionType::Expense => SharedTransactionType::Expense,
        }
    }
}

/// Converts between ledger DTOs and domain models
pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_dto(domain: DomainTransaction) -> SharedTransaction {
        SharedTransaction {
            id: domain.id,
            account_id: domain.account_id,
            category_id: domain.category_id,
            amount: domain.amount,
            transaction_type: TransactionTypeMapper::to_dto(domain.transaction_type),
            description: domain.description,
            date: domain.date,
            created_at: domain.created_at,
        }
    }

    pub fn to_dto_list(domain: Vec<DomainTransaction>) -> Vec<SharedTransaction> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreateTransactionRequest) -> CreateTransactionCommand {
        CreateTransactionCommand {
            account_id: request.account_id,
            category_id: request.category_id,
            amount: request.amount,
            transaction_type: TransactionTypeMapper::to_domain(request.transaction_type),
            description: request.description,
            date: request.date,
        }
    }

    pub fn to_filter(query: TransactionListQuery) -> TransactionFilter {
        TransactionFilter {
            account_id: query.account_id,
            transaction_type: query.transaction_type.map(TransactionTypeMapper::to_domain),
            category_id: query.category_id,
            ..Default::default()
        }
    }
}
