//! Activity service domain logic for the monthly report.
use shared::ActivityCategory;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::activities::{ActivityCommand, ActivityListQuery};
use crate::domain::commands::Mutation;
use crate::domain::errors::{ReportError, ReportResult};
use crate::domain::models::{Activity, Period};
use crate::domain::search;
use crate::storage::{ActivityStorage, BlobStore, Connection};

pub const MAX_NAME_LENGTH: usize = 256;
pub const MAX_TEXT_LENGTH: usize = 10_000;

#[derive(Clone)]
pub struct ActivityService<C: Connection> {
    activity_repository: C::ActivityRepository,
    blob_store: Arc<dyn BlobStore>,
}

impl<C: Connection> ActivityService<C> {
    pub fn new(connection: Arc<C>, blob_store: Arc<dyn BlobStore>) -> Self {
        Self {
            activity_repository: connection.create_activity_repository(),
            blob_store,
        }
    }

    pub async fn create_activity(&self, command: ActivityCommand) -> ReportResult<Mutation<Activity>> {
        let activity = self.build_activity(Activity::generate_id(), command).await?;
        let period = Period::containing(activity.date)?;

        self.activity_repository
            .store_activity(&activity)
            .await
            .map_err(ReportError::DataUnavailable)?;

        info!("Created activity {} on {}", activity.id, activity.date);
        Ok(Mutation::new(activity, [period]))
    }

    /// Full replace of every mutable field
    pub async fn update_activity(&self, activity_id: &str, command: ActivityCommand) -> ReportResult<Mutation<Activity>> {
        let existing = self
            .activity_repository
            .get_activity(activity_id)
            .await
            .map_err(ReportError::DataUnavailable)?
            .ok_or_else(|| ReportError::not_found("Activity", activity_id))?;

        let activity = self.build_activity(existing.id.clone(), command).await?;

        let updated = self
            .activity_repository
            .update_activity(&activity)
            .await
            .map_err(ReportError::DataUnavailable)?;
        if !updated {
            // Deleted between the read and the write
            return Err(ReportError::not_found("Activity", activity_id));
        }

        info!("Updated activity {}", activity.id);
        let periods = [Period::containing(existing.date)?, Period::containing(activity.date)?];
        Ok(Mutation::new(activity, periods))
    }

    /// Deletes an activity and returns the removed record.
    /// Attached blobs are left in the blob store.
    pub async fn delete_activity(&self, activity_id: &str) -> ReportResult<Mutation<Activity>> {
        let existing = self
            .activity_repository
            .get_activity(activity_id)
            .await
            .map_err(ReportError::DataUnavailable)?
            .ok_or_else(|| ReportError::not_found("Activity", activity_id))?;

        let deleted = self
            .activity_repository
            .delete_activity(activity_id)
            .await
            .map_err(ReportError::DataUnavailable)?;
        if !deleted {
            return Err(ReportError::not_found("Activity", activity_id));
        }

        info!("Deleted activity {}", activity_id);
        let period = Period::containing(existing.date)?;
        Ok(Mutation::new(existing, [period]))
    }

    /// Activities dated within the period, optionally narrowed by a search term
    pub async fn list_activities(&self, query: ActivityListQuery) -> ReportResult<Vec<Activity>> {
        let activities = self
            .activity_repository
            .list_activities_between(query.period.first_day(), query.period.last_day())
            .await
            .map_err(ReportError::DataUnavailable)?;

        Ok(search::filter_records(activities, query.search.as_deref(), Activity::display_values))
    }

    async fn build_activity(&self, id: String, command: ActivityCommand) -> ReportResult<Activity> {
        let name = command.name.trim().to_string();
        if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH {
            return Err(ReportError::validation(format!(
                "Activity name must be between 1 and {} characters",
                MAX_NAME_LENGTH
            )));
        }

        let category = command
            .category
            .parse::<ActivityCategory>()
            .map_err(|e| ReportError::validation(e.to_string()))?;

        if !command.duration_hours.is_finite() || command.duration_hours < 0.0 {
            return Err(ReportError::validation("Duration must be a non-negative number of hours"));
        }

        if command.output.chars().count() > MAX_TEXT_LENGTH || command.notes.chars().count() > MAX_TEXT_LENGTH {
            return Err(ReportError::validation(format!(
                "Output and notes are limited to {} characters",
                MAX_TEXT_LENGTH
            )));
        }

        // Rejects dates outside the supported calendar range
        Period::containing(command.date)?;

        for file_id in &command.file_ids {
            let exists = self
                .blob_store
                .exists(file_id)
                .await
                .map_err(ReportError::DataUnavailable)?;
            if !exists {
                warn!("Activity references unknown file {}", file_id);
                return Err(ReportError::validation(format!("Unknown file id '{}'", file_id)));
            }
        }

        Ok(Activity {
            id,
            date: command.date,
            name,
            category,
            duration_hours: command.duration_hours,
            output: command.output,
            notes: command.notes,
            file_ids: command.file_ids,
        })
    }
}
