use shared::{ActivityRequest, RecordListQuery};

use crate::domain::commands::activities::{ActivityCommand, ActivityListQuery};
use crate::domain::errors::ReportResult;
use crate::domain::models::{Activity, Period};

pub struct ActivityMapper;

impl ActivityMapper {
    /// Convert the shared request body to a domain command
    pub fn to_command(request: ActivityRequest) -> ActivityCommand {
        ActivityCommand {
            date: request.date,
            name: request.name,
            category: request.category,
            duration_hours: request.duration_hours,
            output: request.output,
            notes: request.notes,
            file_ids: request.file_ids,
        }
    }

    /// Validates the period before any read happens
    pub fn to_list_query(query: RecordListQuery) -> ReportResult<ActivityListQuery> {
        Ok(ActivityListQuery {
            period: Period::new(query.month, query.year)?,
            search: query.search,
        })
    }

    pub fn to_dto(domain: Activity) -> shared::Activity {
        shared::Activity {
            id: domain.id,
            date: domain.date,
            name: domain.name,
            category: domain.category,
            duration_hours: domain.duration_hours,
            output: domain.output,
            notes: domain.notes,
            file_ids: domain.file_ids,
        }
    }

    pub fn to_dto_list(domain_activities: Vec<Activity>) -> Vec<shared::Activity> {
        domain_activities.into_iter().map(Self::to_dto).collect()
    }
}
