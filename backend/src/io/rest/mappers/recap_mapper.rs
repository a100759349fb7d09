use shared::{PeriodQuery, Recap};

use crate::domain::errors::ReportResult;
use crate::domain::models::{MonthlyRecap, Period};

pub struct RecapMapper;

impl RecapMapper {
    pub fn to_period(query: PeriodQuery) -> ReportResult<Period> {
        Period::new(query.month, query.year)
    }

    /// Histogram keys become the categories' wire names
    pub fn to_dto(domain: MonthlyRecap) -> Recap {
        Recap {
            total_activities: domain.totals.total_activities,
            total_income: domain.totals.total_income,
            total_expense: domain.totals.total_expense,
            activities_by_category: domain
                .totals
                .activities_by_category
                .into_iter()
                .map(|(category, count)| (category.to_string(), count))
                .collect(),
            summary: domain.summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RecapTotals;
    use rust_decimal::Decimal;
    use shared::ActivityCategory;
    use std::collections::BTreeMap;

    #[test]
    fn test_recap_serializes_money_as_numbers() {
        let recap = MonthlyRecap {
            period: Period::new(3, 2024).unwrap(),
            totals: RecapTotals {
                total_activities: 1,
                total_hours: 2.0,
                finance_entries: 1,
                total_income: Decimal::from(100),
                total_expense: Decimal::from(40),
                activities_by_category: BTreeMap::from([(ActivityCategory::CommunityService, 1)]),
            },
            summary: "ok".to_string(),
        };

        let json = serde_json::to_value(RecapMapper::to_dto(recap)).unwrap();
        assert_eq!(json["total_activities"], 1);
        assert_eq!(json["total_income"].as_f64(), Some(100.0));
        assert_eq!(json["total_expense"].as_f64(), Some(40.0));
        assert_eq!(json["activities_by_category"]["community service"], 1);
        assert_eq!(json["summary"], "ok");
    }
}
