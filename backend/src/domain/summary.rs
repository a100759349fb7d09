//! Summary paragraph generation for the monthly recap.
//!
//! The recap service only assembles a [`SummaryInput`] and passes whatever
//! text the [`Summarizer`] returns through unchanged.

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::models::{Period, RecapTotals};

/// Payload handed to a summarizer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryInput {
    pub month: u32,
    pub year: i32,
    pub period_name: String,
    pub total_activities: u32,
    pub total_hours: f64,
    pub finance_entries: u32,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,
    pub activities_by_category: BTreeMap<String, u32>,
    pub top_category: Option<String>,
}

impl SummaryInput {
    pub fn new(period: &Period, totals: &RecapTotals) -> Self {
        Self {
            month: period.month(),
            year: period.year(),
            period_name: period.display_name(),
            total_activities: totals.total_activities,
            total_hours: totals.total_hours,
            finance_entries: totals.finance_entries,
            total_income: totals.total_income,
            total_expense: totals.total_expense,
            net: totals.net(),
            activities_by_category: totals
                .activities_by_category
                .iter()
                .map(|(category, count)| (category.to_string(), *count))
                .collect(),
            top_category: totals.top_category().map(|(category, _)| category.to_string()),
        }
    }
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, input: &SummaryInput) -> Result<String>;
}

/// Deterministic English summary built from the numbers alone
#[derive(Debug, Clone, Default)]
pub struct TemplateSummarizer;

impl TemplateSummarizer {
    pub fn new() -> Self {
        Self
    }

    fn render(input: &SummaryInput) -> String {
        let mut text = match input.total_activities {
            0 => format!("{}: no activities were logged.", input.period_name),
            1 => format!(
                "{}: 1 activity was logged, totalling {:.1} hours.",
                input.period_name, input.total_hours
            ),
            n => format!(
                "{}: {} activities were logged, totalling {:.1} hours.",
                input.period_name, n, input.total_hours
            ),
        };

        if let Some(top) = &input.top_category {
            let count = input.activities_by_category.get(top).copied().unwrap_or(0);
            if input.activities_by_category.len() > 1 {
                text.push_str(&format!(" Most activities were in {} ({}).", top, count));
            } else {
                text.push_str(&format!(" All activities were in {}.", top));
            }
        }

        match input.finance_entries {
            0 => text.push_str(" No finance entries were recorded."),
            entries => {
                let noun = if entries == 1 { "entry" } else { "entries" };
                text.push_str(&format!(
                    " Finance: {} {}, income {:.2}, expense {:.2}, net {:.2}.",
                    entries, noun, input.total_income, input.total_expense, input.net
                ));
            }
        }

        text
    }
}

#[async_trait]
impl Summarizer for TemplateSummarizer {
    async fn summarize(&self, input: &SummaryInput) -> Result<String> {
        Ok(Self::render(input))
    }
}
