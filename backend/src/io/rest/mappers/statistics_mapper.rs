use crate::domain::summary::{
    CategoryTotal, MonthTotal, Statistics as DomainStatistics, Summary as DomainSummary,
};
use shared::{CategoryStatistics, MonthlyStatistics, Statistics as SharedStatistics, Summary as SharedSummary};

use super::TransactionTypeMapper;

/// Converts aggregation results to their wire shape
pub struct StatisticsMapper;

impl StatisticsMapper {
    pub fn to_summary_dto(domain: DomainSummary) -> SharedSummary {
        SharedSummary {
            total_balance: domain.total_balance,
            total_income: domain.total_income,
            total_expense: domain.total_expense,
        }
    }

    pub fn to_statistics_dto(domain: DomainStatistics) -> SharedStatistics {
        SharedStatistics {
            start_date: domain.start_date,
            end_date: domain.end_date,
            total_income: domain.total_income,
            total_expense: domain.total_expense,
            net_amount: domain.net_amount,
            by_category: domain.by_category.into_iter().map(Self::category_to_dto).collect(),
            by_month: domain.by_month.into_iter().map(Self::month_to_dto).collect(),
        }
    }

    fn category_to_dto(total: CategoryTotal) -> CategoryStatistics {
        CategoryStatistics {
            category_id: total.category_id,
            category_name: total.category_name,
            category_type: TransactionTypeMapper::to_dto(total.category_type),
            amount: total.amount,
            percentage: total.percentage,
        }
    }

    fn month_to_dto(total: MonthTotal) -> MonthlyStatistics {
        MonthlyStatistics {
            year: total.year,
            month: total.month,
            income: total.income,
            expense: total.expense,
            net_amount: total.net_amount,
        }
    }
}
