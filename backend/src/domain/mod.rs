//! # Domain Module
//!
//! Business logic for the monthly report service.
//!
//! ## Module Organization
//!
//! - **activity_service / finance_service**: validated CRUD over the record store
//! - **recap_service**: the monthly aggregate (counts, sums, category histogram)
//! - **summary**: the summarizer seam that turns a recap into prose
//! - **report**: PDF and spreadsheet rendering of one period
//! - **file_service**: evidence uploads in the blob store
//! - **search**: the case-insensitive table filter shared by both list operations
//!
//! ## Business Rules
//!
//! - A period is one calendar month; month is 1-12 and year 1-9999
//! - A record belongs to a period when its date falls on or between the first
//!   and last day of that month
//! - Money is exact decimal; net is always income minus expense
//! - Every mutation reports the periods whose views became stale
//!
//! Services are generic over [`crate::storage::Connection`] so tests can swap
//! the SQLite backend for a fake.

pub mod activity_service;
pub mod commands;
pub mod errors;
pub mod file_service;
pub mod finance_service;
pub mod models;
pub mod recap_service;
pub mod report;
pub mod search;
pub mod summary;

pub use activity_service::ActivityService;
pub use errors::{ReportError, ReportResult};
pub use file_service::FileService;
pub use finance_service::FinanceService;
pub use recap_service::RecapService;
pub use report::{ExportService, RenderedReport};
pub use summary::{Summarizer, TemplateSummarizer};
