//! Derived monthly aggregate. Never persisted.
use rust_decimal::Decimal;
use shared::ActivityCategory;
use std::collections::BTreeMap;

use super::period::Period;

/// Numeric part of a recap, computed from the in-range records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecapTotals {
    pub total_activities: u32,
    pub total_hours: f64,
    pub finance_entries: u32,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// Holds only categories with at least one activity
    pub activities_by_category: BTreeMap<ActivityCategory, u32>,
}

impl RecapTotals {
    /// Saturates at the decimal bounds
    pub fn net(&self) -> Decimal {
        self.total_income.saturating_sub(self.total_expense)
    }

    /// Category with the most activities; ties go to the category listed first
    pub fn top_category(&self) -> Option<(ActivityCategory, u32)> {
        let mut best: Option<(ActivityCategory, u32)> = None;
        for (category, count) in &self.activities_by_category {
            match best {
                Some((_, best_count)) if *count <= best_count => {}
                _ => best = Some((*category, *count)),
            }
        }
        best
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRecap {
    pub period: Period,
    pub totals: RecapTotals,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_category_tie_goes_to_first_listed() {
        let totals = RecapTotals {
            activities_by_category: BTreeMap::from([
                (ActivityCategory::Social, 2),
                (ActivityCategory::Academics, 2),
                (ActivityCategory::Documentation, 1),
            ]),
            ..Default::default()
        };
        assert_eq!(totals.top_category(), Some((ActivityCategory::Academics, 2)));
    }

    #[test]
    fn test_top_category_empty() {
        assert_eq!(RecapTotals::default().top_category(), None);
    }
}
