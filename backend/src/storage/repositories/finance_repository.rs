use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;

use crate::domain::models::finance::Finance;
use crate::storage::connection::DbConnection;
use crate::storage::traits::FinanceStorage;
use crate::storage::DATE_FORMAT;

/// Repository for finance entry operations
#[derive(Clone)]
pub struct FinanceRepository {
    db: DbConnection,
}

impl FinanceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn finance_from_row(row: &SqliteRow) -> Result<Finance> {
        let date: String = row.try_get("date")?;
        let income: String = row.try_get("income")?;
        let expense: String = row.try_get("expense")?;

        Ok(Finance {
            id: row.try_get("id")?,
            date: NaiveDate::parse_from_str(&date, DATE_FORMAT)
                .with_context(|| format!("Invalid stored finance date '{}'", date))?,
            category: row.try_get("category")?,
            income: Decimal::from_str(&income)
                .with_context(|| format!("Invalid stored income '{}'", income))?,
            expense: Decimal::from_str(&expense)
                .with_context(|| format!("Invalid stored expense '{}'", expense))?,
            notes: row.try_get("notes")?,
        })
    }
}

#[async_trait]
impl FinanceStorage for FinanceRepository {
    async fn store_finance(&self, finance: &Finance) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO finances (id, date, category, income, expense, notes)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&finance.id)
        .bind(finance.date.format(DATE_FORMAT).to_string())
        .bind(&finance.category)
        .bind(finance.income.to_string())
        .bind(finance.expense.to_string())
        .bind(&finance.notes)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_finance(&self, finance_id: &str) -> Result<Option<Finance>> {
        let row = sqlx::query(
            r#"
            SELECT id, date, category, income, expense, notes
            FROM finances
            WHERE id = ?
            "#,
        )
        .bind(finance_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::finance_from_row).transpose()
    }

    async fn update_finance(&self, finance: &Finance) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE finances
            SET date = ?, category = ?, income = ?, expense = ?, notes = ?
            WHERE id = ?
            "#,
        )
        .bind(finance.date.format(DATE_FORMAT).to_string())
        .bind(&finance.category)
        .bind(finance.income.to_string())
        .bind(finance.expense.to_string())
        .bind(&finance.notes)
        .bind(&finance.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_finance(&self, finance_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM finances WHERE id = ?")
            .bind(finance_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_finances_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Finance>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, category, income, expense, notes
            FROM finances
            WHERE date >= ? AND date <= ?
            ORDER BY date ASC, ROWID ASC
            "#,
        )
        .bind(start.format(DATE_FORMAT).to_string())
        .bind(end.format(DATE_FORMAT).to_string())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::finance_from_row).collect()
    }
}
