use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::storage::repositories::{ActivityRepository, FinanceRepository};
use crate::storage::traits::Connection;

/// DbConnection manages the SQLite pool shared by all repositories
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Dates are stored as YYYY-MM-DD so range filters can compare text
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS activities (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                duration_hours REAL NOT NULL CHECK (duration_hours >= 0),
                output TEXT NOT NULL DEFAULT '',
                notes TEXT NOT NULL DEFAULT '',
                file_ids TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_activities_date
            ON activities(date);
            "#,
        )
        .execute(pool)
        .await?;

        // Money columns hold decimal strings to keep cents exact
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS finances (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT '',
                income TEXT NOT NULL DEFAULT '0',
                expense TEXT NOT NULL DEFAULT '0',
                notes TEXT NOT NULL DEFAULT '',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_finances_date
            ON finances(date);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type ActivityRepository = ActivityRepository;
    type FinanceRepository = FinanceRepository;

    fn create_activity_repository(&self) -> Self::ActivityRepository {
        ActivityRepository::new(self.clone())
    }

    fn create_finance_repository(&self) -> Self::FinanceRepository {
        FinanceRepository::new(self.clone())
    }
}
