//! Domain model for an income/expense ledger line.
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Finance {
    pub id: String,
    pub date: NaiveDate,
    pub category: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub notes: String,
}

impl Finance {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    pub fn net(&self) -> Decimal {
        self.income.saturating_sub(self.expense)
    }

    /// Field values as the finance table displays them, used by search
    pub fn display_values(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.category.clone(),
            self.income.to_string(),
            self.expense.to_string(),
            self.notes.clone(),
        ]
    }
}
