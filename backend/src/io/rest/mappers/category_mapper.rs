use crate::domain::commands::categories::{CreateCategoryCommand, UpdateCategoryCommand};
use crate::domain::models::Category as DomainCategory;
use shared::{Category as SharedCategory, CreateCategoryRequest, UpdateCategoryRequest};

use super::TransactionTypeMapper;

pub struct CategoryMapper;

impl CategoryMapper {
    pub fn to_dto(domain: DomainCategory) -> SharedCategory {
        SharedCategory {
            id: domain.id,
            name: domain.name,
            category_type: TransactionTypeMapper::to_dto(domain.category_type),
            icon: domain.icon,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    pub fn to_dto_list(domain: Vec<DomainCategory>) -> Vec<SharedCategory> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreateCategoryRequest) -> CreateCategoryCommand {
        CreateCategoryCommand {
            name: request.name,
            category_type: TransactionTypeMapper::to_domain(request.category_type),
            icon: request.icon,
        }
    }

    pub fn to_update_command(request: UpdateCategoryRequest) -> UpdateCategoryCommand {
        UpdateCategoryCommand {
            name: request.name,
            category_type: request.category_type.map(TransactionTypeMapper::to_domain),
            icon: request.icon,
        }
    }
}
