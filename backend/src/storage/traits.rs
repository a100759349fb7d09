//! # Storage Traits
//!
//! Storage abstractions the domain layer depends on. The SQLite repositories
//! implement them for production; tests can substitute their own.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::models::activity::Activity;
use crate::domain::models::finance::Finance;

/// Trait defining the interface for activity storage operations
#[async_trait]
pub trait ActivityStorage: Send + Sync {
    /// Store a new activity
    async fn store_activity(&self, activity: &Activity) -> Result<()>;

    /// Retrieve a specific activity by ID
    async fn get_activity(&self, activity_id: &str) -> Result<Option<Activity>>;

    /// Replace every mutable field of an existing activity
    /// Returns false when no activity has that ID
    async fn update_activity(&self, activity: &Activity) -> Result<bool>;

    /// Delete a single activity
    /// Returns true if the activity was found and deleted, false otherwise
    async fn delete_activity(&self, activity_id: &str) -> Result<bool>;

    /// List activities dated within `[start, end]` (inclusive)
    /// Ordered by date, then insertion order
    async fn list_activities_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Activity>>;
}

/// Trait defining the interface for finance entry storage operations
#[async_trait]
pub trait FinanceStorage: Send + Sync {
    async fn store_finance(&self, finance: &Finance) -> Result<()>;

    async fn get_finance(&self, finance_id: &str) -> Result<Option<Finance>>;

    /// Returns false when no finance entry has that ID
    async fn update_finance(&self, finance: &Finance) -> Result<bool>;

    /// Returns true if the entry was found and deleted
    async fn delete_finance(&self, finance_id: &str) -> Result<bool>;

    /// List finance entries dated within `[start, end]` (inclusive)
    async fn list_finances_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Finance>>;
}

/// Trait defining the interface for storage connections
///
/// Provides factory methods for the repositories so services can be built
/// against any backend without knowing the concrete types.
pub trait Connection: Send + Sync + Clone + 'static {
    type ActivityRepository: ActivityStorage + Clone + 'static;
    type FinanceRepository: FinanceStorage + Clone + 'static;

    fn create_activity_repository(&self) -> Self::ActivityRepository;

    fn create_finance_repository(&self) -> Self::FinanceRepository;
}
