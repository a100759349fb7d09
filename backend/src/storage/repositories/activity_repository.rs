use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::activity::Activity;
use crate::storage::connection::DbConnection;
use crate::storage::traits::ActivityStorage;
use crate::storage::DATE_FORMAT;

/// Repository for activity operations
#[derive(Clone)]
pub struct ActivityRepository {
    db: DbConnection,
}

impl ActivityRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn activity_from_row(row: &SqliteRow) -> Result<Activity> {
        let date: String = row.try_get("date")?;
        let category: String = row.try_get("category")?;
        let file_ids: String = row.try_get("file_ids")?;

        Ok(Activity {
            id: row.try_get("id")?,
            date: NaiveDate::parse_from_str(&date, DATE_FORMAT)
                .with_context(|| format!("Invalid stored activity date '{}'", date))?,
            name: row.try_get("name")?,
            category: category.parse()?,
            duration_hours: row.try_get("duration_hours")?,
            output: row.try_get("output")?,
            notes: row.try_get("notes")?,
            file_ids: serde_json::from_str(&file_ids)
                .with_context(|| format!("Invalid stored file id list '{}'", file_ids))?,
        })
    }
}

#[async_trait]
impl ActivityStorage for ActivityRepository {
    async fn store_activity(&self, activity: &Activity) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO activities (id, date, name, category, duration_hours, output, notes, file_ids)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&activity.id)
        .bind(activity.date.format(DATE_FORMAT).to_string())
        .bind(&activity.name)
        .bind(activity.category.as_str())
        .bind(activity.duration_hours)
        .bind(&activity.output)
        .bind(&activity.notes)
        .bind(serde_json::to_string(&activity.file_ids)?)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_activity(&self, activity_id: &str) -> Result<Option<Activity>> {
        let row = sqlx::query(
            r#"
            SELECT id, date, name, category, duration_hours, output, notes, file_ids
            FROM activities
            WHERE id = ?
            "#,
        )
        .bind(activity_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::activity_from_row).transpose()
    }

    async fn update_activity(&self, activity: &Activity) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE activities
            SET date = ?, name = ?, category = ?, duration_hours = ?, output = ?, notes = ?, file_ids = ?
            WHERE id = ?
            "#,
        )
        .bind(activity.date.format(DATE_FORMAT).to_string())
        .bind(&activity.name)
        .bind(activity.category.as_str())
        .bind(activity.duration_hours)
        .bind(&activity.output)
        .bind(&activity.notes)
        .bind(serde_json::to_string(&activity.file_ids)?)
        .bind(&activity.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_activity(&self, activity_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(activity_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_activities_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Activity>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, name, category, duration_hours, output, notes, file_ids
            FROM activities
            WHERE date >= ? AND date <= ?
            ORDER BY date ASC, ROWID ASC
            "#,
        )
        .bind(start.format(DATE_FORMAT).to_string())
        .bind(end.format(DATE_FORMAT).to_string())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::activity_from_row).collect()
    }
}
