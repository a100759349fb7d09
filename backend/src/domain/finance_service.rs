//! Finance entry service domain logic for the monthly report.
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::finances::{FinanceCommand, FinanceListQuery};
use crate::domain::commands::Mutation;
use crate::domain::errors::{ReportError, ReportResult};
use crate::domain::models::{Finance, Period};
use crate::domain::search;
use crate::storage::{Connection, FinanceStorage};

const MAX_CATEGORY_LENGTH: usize = 256;
const MAX_NOTES_LENGTH: usize = 10_000;
/// Keeps any realistic number of entries summable without overflow
// 1_000_000_000_000_000 (10^15) expressed via the const constructor
const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

#[derive(Clone)]
pub struct FinanceService<C: Connection> {
    finance_repository: C::FinanceRepository,
}

impl<C: Connection> FinanceService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            finance_repository: connection.create_finance_repository(),
        }
    }

    pub async fn create_finance(&self, command: FinanceCommand) -> ReportResult<Mutation<Finance>> {
        let finance = Self::build_finance(Finance::generate_id(), command)?;
        let period = Period::containing(finance.date)?;

        self.finance_repository
            .store_finance(&finance)
            .await
            .map_err(ReportError::DataUnavailable)?;

        info!("Created finance entry {} on {} (net {})", finance.id, finance.date, finance.net());
        Ok(Mutation::new(finance, [period]))
    }

    pub async fn update_finance(&self, finance_id: &str, command: FinanceCommand) -> ReportResult<Mutation<Finance>> {
        let existing = self
            .finance_repository
            .get_finance(finance_id)
            .await
            .map_err(ReportError::DataUnavailable)?
            .ok_or_else(|| ReportError::not_found("Finance entry", finance_id))?;

        let finance = Self::build_finance(existing.id.clone(), command)?;

        let updated = self
            .finance_repository
            .update_finance(&finance)
            .await
            .map_err(ReportError::DataUnavailable)?;
        if !updated {
            return Err(ReportError::not_found("Finance entry", finance_id));
        }

        info!("Updated finance entry {}", finance.id);
        let periods = [Period::containing(existing.date)?, Period::containing(finance.date)?];
        Ok(Mutation::new(finance, periods))
    }

    pub async fn delete_finance(&self, finance_id: &str) -> ReportResult<Mutation<Finance>> {
        let existing = self
            .finance_repository
            .get_finance(finance_id)
            .await
            .map_err(ReportError::DataUnavailable)?
            .ok_or_else(|| ReportError::not_found("Finance entry", finance_id))?;

        let deleted = self
            .finance_repository
            .delete_finance(finance_id)
            .await
            .map_err(ReportError::DataUnavailable)?;
        if !deleted {
            return Err(ReportError::not_found("Finance entry", finance_id));
        }

        info!("Deleted finance entry {}", finance_id);
        let period = Period::containing(existing.date)?;
        Ok(Mutation::new(existing, [period]))
    }

    pub async fn list_finances(&self, query: FinanceListQuery) -> ReportResult<Vec<Finance>> {
        let finances = self
            .finance_repository
            .list_finances_between(query.period.first_day(), query.period.last_day())
            .await
            .map_err(ReportError::DataUnavailable)?;

        Ok(search::filter_records(finances, query.search.as_deref(), Finance::display_values))
    }

    fn build_finance(id: String, command: FinanceCommand) -> ReportResult<Finance> {
        if command.income < Decimal::ZERO || command.expense < Decimal::ZERO {
            return Err(ReportError::validation("Income and expense must not be negative"));
        }
        if command.income > MAX_AMOUNT || command.expense > MAX_AMOUNT {
            return Err(ReportError::validation(format!(
                "Income and expense are limited to {}",
                MAX_AMOUNT
            )));
        }

        let category = command.category.trim().to_string();
        if category.chars().count() > MAX_CATEGORY_LENGTH {
            return Err(ReportError::validation(format!(
                "Finance category is limited to {} characters",
                MAX_CATEGORY_LENGTH
            )));
        }
        if command.notes.chars().count() > MAX_NOTES_LENGTH {
            return Err(ReportError::validation(format!(
                "Notes are limited to {} characters",
                MAX_NOTES_LENGTH
            )));
        }

        Period::containing(command.date)?;

        Ok(Finance {
            id,
            date: command.date,
            category,
            income: command.income,
            expense: command.expense,
            notes: command.notes,
        })
    }
}
