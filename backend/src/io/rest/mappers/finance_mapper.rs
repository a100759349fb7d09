use shared::{FinanceRequest, RecordListQuery};

use crate::domain::commands::finances::{FinanceCommand, FinanceListQuery};
use crate::domain::errors::ReportResult;
use crate::domain::models::{Finance, Period};

pub struct FinanceMapper;

impl FinanceMapper {
    pub fn to_command(request: FinanceRequest) -> FinanceCommand {
        FinanceCommand {
            date: request.date,
            category: request.category,
            income: request.income,
            expense: request.expense,
            notes: request.notes,
        }
    }

    pub fn to_list_query(query: RecordListQuery) -> ReportResult<FinanceListQuery> {
        Ok(FinanceListQuery {
            period: Period::new(query.month, query.year)?,
            search: query.search,
        })
    }

    /// Net is derived here, never stored
    pub fn to_dto(domain: Finance) -> shared::Finance {
        let net = domain.net();
        shared::Finance {
            id: domain.id,
            date: domain.date,
            category: domain.category,
            income: domain.income,
            expense: domain.expense,
            net,
            notes: domain.notes,
        }
    }

    pub fn to_dto_list(domain_finances: Vec<Finance>) -> Vec<shared::Finance> {
        domain_finances.into_iter().map(Self::to_dto).collect()
    }
}
