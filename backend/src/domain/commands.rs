//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the DTOs defined in the
//! `shared` crate to these internal types.

use super::models::Period;

pub mod activities {
    use chrono::NaiveDate;

    use super::Period;

    /// Every mutable field of an activity, used for both create and full replace.
    /// The category stays raw text until the service validates it.
    #[derive(Debug, Clone)]
    pub struct ActivityCommand {
        pub date: NaiveDate,
        pub name: String,
        pub category: String,
        pub duration_hours: f64,
        pub output: String,
        pub notes: String,
        pub file_ids: Vec<String>,
    }

    /// Query parameters for listing activities.
    #[derive(Debug, Clone)]
    pub struct ActivityListQuery {
        pub period: Period,
        pub search: Option<String>,
    }
}

pub mod finances {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::Period;

    #[derive(Debug, Clone)]
    pub struct FinanceCommand {
        pub date: NaiveDate,
        pub category: String,
        pub income: Decimal,
        pub expense: Decimal,
        pub notes: String,
    }

    #[derive(Debug, Clone)]
    pub struct FinanceListQuery {
        pub period: Period,
        pub search: Option<String>,
    }
}

/// Result of any create/update/delete: the affected value plus the periods
/// whose activity, finance and recap views are now stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<T> {
    pub value: T,
    pub invalidated: Vec<Period>,
}

impl<T> Mutation<T> {
    /// Collects the distinct periods touched by a change
    pub fn new(value: T, periods: impl IntoIterator<Item = Period>) -> Self {
        let mut invalidated: Vec<Period> = Vec::new();
        for period in periods {
            if !invalidated.contains(&period) {
                invalidated.push(period);
            }
        }
        invalidated.sort();
        Self { value, invalidated }
    }
}
