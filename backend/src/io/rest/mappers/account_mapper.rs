use crate::domain::commands::accounts::{CreateAccountCommand, UpdateAccountCommand};
use crate::domain::models::Account as DomainAccount;
use shared::{Account as SharedAccount, CreateAccountRequest, UpdateAccountRequest};

/// Converts between account DTOs and domain models
pub struct AccountMapper;

impl AccountMapper {
    pub fn to_dto(domain: DomainAccount) -> SharedAccount {
        SharedAccount {
            id: domain.id,
            name: domain.name,
            balance: domain.balance,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    pub fn to_dto_list(domain: Vec<DomainAccount>) -> Vec<SharedAccount> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreateAccountRequest) -> CreateAccountCommand {
        CreateAccountCommand {
            name: request.name,
            initial_balance: request.balance,
        }
    }

    pub fn to_update_command(request: UpdateAccountRequest) -> UpdateAccountCommand {
        UpdateAccountCommand {
            name: request.name,
            balance: request.balance,
        }
    }
}
