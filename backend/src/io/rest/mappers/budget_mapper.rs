use crate::domain::commands::budgets::BudgetCommand;
use crate::domain::models::{
    Budget as DomainBudget, BudgetOverview as DomainBudgetOverview, BudgetStatus as DomainBudgetStatus,
};
use crate::storage::BudgetFilter;
use shared::{
    Budget as SharedBudget, BudgetListQuery, BudgetOverview as SharedBudgetOverview, BudgetRequest,
    BudgetStatus as SharedBudgetStatus,
};

pub struct BudgetMapper;

impl BudgetMapper {
    pub fn to_dto(domain: DomainBudget) -> SharedBudget {
        SharedBudget {
            id: domain.id,
            category_id: domain.category_id,
            amount: domain.amount,
            start_date: domain.start_date,
            end_date: domain.end_date,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    pub fn to_dto_list(domain: Vec<DomainBudget>) -> Vec<SharedBudget> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_status_dto(domain: DomainBudgetStatus) -> SharedBudgetStatus {
        SharedBudgetStatus {
            budget: Self::to_dto(domain.budget),
            actual_expense: domain.actual_expense,
            remaining: domain.remaining,
            percentage_used: domain.percentage_used,
        }
    }

    pub fn to_overview_dto(domain: DomainBudgetOverview) -> SharedBudgetOverview {
        SharedBudgetOverview {
            start_date: domain.start_date,
            end_date: domain.end_date,
            budgets: domain.budgets.into_iter().map(Self::to_status_dto).collect(),
        }
    }

    pub fn to_command(request: BudgetRequest) -> BudgetCommand {
        BudgetCommand {
            category_id: request.category_id,
            amount: request.amount,
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }

    pub fn to_filter(query: BudgetListQuery) -> BudgetFilter {
        BudgetFilter {
            category_id: query.category_id,
            start_date: query.start_date,
            end_date: query.end_date,
        }
    }
}
