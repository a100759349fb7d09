//! Error taxonomy shared by every domain service.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Month outside 1-12 or year outside 1-9999
    #[error("Invalid period: month {month}, year {year}")]
    InvalidPeriod { month: u32, year: i32 },

    #[error("{0}")]
    Validation(String),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// The record store or blob store could not be queried
    #[error("Data unavailable: {0}")]
    DataUnavailable(anyhow::Error),

    #[error("Summary unavailable: {0}")]
    SummaryUnavailable(anyhow::Error),

    #[error("Report rendering failed: {0}")]
    Render(anyhow::Error),
}

impl ReportError {
    pub fn validation(message: impl Into<String>) -> Self {
        ReportError::Validation(message.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ReportError::NotFound { kind, id: id.into() }
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
