//! Monthly recap aggregation.
//!
//! Reads the activities and finance entries of one period, derives counts,
//! sums and the category histogram, then asks the summarizer for the text.
//! Nothing is written and nothing is cached between calls.

use anyhow::anyhow;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info};

use crate::domain::errors::{ReportError, ReportResult};
use crate::domain::models::{Activity, Finance, MonthlyRecap, Period, RecapTotals};
use crate::domain::summary::{Summarizer, SummaryInput};
use crate::storage::{ActivityStorage, Connection, FinanceStorage};

/// Pure aggregation over arbitrary record slices.
/// Records dated outside `period` are ignored. Money sums that leave the
/// decimal range are reported instead of wrapping or panicking.
pub fn aggregate(period: &Period, activities: &[Activity], finances: &[Finance]) -> ReportResult<RecapTotals> {
    let mut totals = RecapTotals::default();

    for activity in activities.iter().filter(|a| period.contains(a.date)) {
        totals.total_activities += 1;
        totals.total_hours += activity.duration_hours;
        *totals.activities_by_category.entry(activity.category).or_insert(0) += 1;
    }

    for finance in finances.iter().filter(|f| period.contains(f.date)) {
        totals.finance_entries += 1;
        totals.total_income = checked_sum(period, totals.total_income, finance.income)?;
        totals.total_expense = checked_sum(period, totals.total_expense, finance.expense)?;
    }

    Ok(totals)
}

fn checked_sum(period: &Period, total: Decimal, amount: Decimal) -> ReportResult<Decimal> {
    total.checked_add(amount).ok_or_else(|| {
        error!("Finance totals for {} overflowed", period);
        ReportError::DataUnavailable(anyhow!("Finance totals for {} exceed the supported range", period))
    })
}

#[derive(Clone)]
pub struct RecapService<C: Connection> {
    activity_repository: C::ActivityRepository,
    finance_repository: C::FinanceRepository,
    summarizer: Arc<dyn Summarizer>,
}

impl<C: Connection> RecapService<C> {
    pub fn new(connection: Arc<C>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            activity_repository: connection.create_activity_repository(),
            finance_repository: connection.create_finance_repository(),
            summarizer,
        }
    }

    /// Both record sets for a period, read concurrently
    pub async fn load_period(&self, period: &Period) -> ReportResult<(Vec<Activity>, Vec<Finance>)> {
        let (start, end) = (period.first_day(), period.last_day());

        tokio::try_join!(
            self.activity_repository.list_activities_between(start, end),
            self.finance_repository.list_finances_between(start, end),
        )
        .map_err(|e| {
            error!("Failed to read records for {}: {:#}", period, e);
            ReportError::DataUnavailable(e)
        })
    }

    pub async fn recap(&self, period: Period) -> ReportResult<MonthlyRecap> {
        let (activities, finances) = self.load_period(&period).await?;
        self.recap_from_records(period, &activities, &finances).await
    }

    /// Recap over records the caller already loaded
    pub async fn recap_from_records(
        &self,
        period: Period,
        activities: &[Activity],
        finances: &[Finance],
    ) -> ReportResult<MonthlyRecap> {
        let totals = aggregate(&period, activities, finances)?;

        let input = SummaryInput::new(&period, &totals);
        let summary = self
            .summarizer
            .summarize(&input)
            .await
            .map_err(ReportError::SummaryUnavailable)?;

        info!(
            "Recap for {}: {} activities, income {}, expense {}",
            period, totals.total_activities, totals.total_income, totals.total_expense
        );

        Ok(MonthlyRecap { period, totals, summary })
    }
}
