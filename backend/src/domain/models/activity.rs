//! Domain model for a logged activity.
use chrono::NaiveDate;
use shared::ActivityCategory;

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub category: ActivityCategory,
    pub duration_hours: f64,
    pub output: String,
    pub notes: String,
    pub file_ids: Vec<String>,
}

impl Activity {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Field values as the activity table displays them, used by search
    pub fn display_values(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.name.clone(),
            self.category.to_string(),
            self.duration_hours.to_string(),
            self.output.clone(),
            self.notes.clone(),
        ]
    }
}
