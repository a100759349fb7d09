//! Excel workbook export.
//!
//! The sheet is laid out as typed rows first, then written with
//! `rust_xlsxwriter`. Money cells are numbers with a two-decimal format.
use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use super::{ReportData, ReportRenderer};

const SHEET_NAME: &str = "Monthly Report";
const COLUMN_WIDTHS: [f64; 6] = [14.0, 36.0, 18.0, 12.0, 12.0, 40.0];

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Heading(String),
    Text(String),
    Number(f64),
    Money(Decimal),
}

fn heading(text: &str) -> Cell {
    Cell::Heading(text.to_string())
}

fn text(text: impl Into<String>) -> Cell {
    Cell::Text(text.into())
}

#[derive(Debug, Clone, Default)]
pub struct SpreadsheetRenderer;

impl SpreadsheetRenderer {
    pub fn new() -> Self {
        Self
    }

    fn layout(report: &ReportData) -> Vec<Vec<Cell>> {
        let recap = &report.recap;
        let totals = &recap.totals;

        let mut rows = vec![
            vec![heading("Monthly Report"), text(recap.period.display_name())],
            vec![heading("Summary"), text(recap.summary.as_str())],
            vec![],
            vec![heading("Totals")],
            vec![text("Activities"), Cell::Number(f64::from(totals.total_activities))],
            vec![text("Hours"), Cell::Number(totals.total_hours)],
            vec![text("Income"), Cell::Money(totals.total_income)],
            vec![text("Expense"), Cell::Money(totals.total_expense)],
            vec![text("Net"), Cell::Money(totals.net())],
            vec![],
            vec![heading("Category"), heading("Activities")],
        ];

        for (category, count) in &totals.activities_by_category {
            rows.push(vec![text(category.to_string()), Cell::Number(f64::from(*count))]);
        }
        rows.push(vec![]);

        rows.push(
            ["Date", "Name", "Category", "Hours", "Output", "Notes"]
                .into_iter()
                .map(heading)
                .collect(),
        );
        for activity in &report.activities {
            rows.push(vec![
                text(activity.date.to_string()),
                text(activity.name.as_str()),
                text(activity.category.to_string()),
                Cell::Number(activity.duration_hours),
                text(activity.output.as_str()),
                text(activity.notes.as_str()),
            ]);
        }
        rows.push(vec![]);

        rows.push(
            ["Date", "Category", "Income", "Expense", "Net", "Notes"]
                .into_iter()
                .map(heading)
                .collect(),
        );
        for finance in &report.finances {
            rows.push(vec![
                text(finance.date.to_string()),
                text(finance.category.as_str()),
                Cell::Money(finance.income),
                Cell::Money(finance.expense),
                Cell::Money(finance.net()),
                text(finance.notes.as_str()),
            ]);
        }

        rows
    }

    fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<Cell>]) -> Result<()> {
        let bold = Format::new().set_bold();
        let money = Format::new().set_num_format("0.00");

        worksheet.set_name(SHEET_NAME)?;
        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        for (row, cells) in rows.iter().enumerate() {
            let row = u32::try_from(row).context("Report has too many rows")?;
            for (col, cell) in cells.iter().enumerate() {
                let col = u16::try_from(col).context("Report has too many columns")?;
                match cell {
                    Cell::Heading(value) => worksheet.write_string_with_format(row, col, value, &bold)?,
                    Cell::Text(value) => worksheet.write_string(row, col, value)?,
                    Cell::Number(value) => worksheet.write_number(row, col, *value)?,
                    Cell::Money(value) => {
                        let value = value.to_f64().context("Amount cannot be written as a number")?;
                        worksheet.write_number_with_format(row, col, value, &money)?
                    }
                };
            }
        }
        Ok(())
    }
}

impl ReportRenderer for SpreadsheetRenderer {
    fn content_type(&self) -> &'static str {
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn render(&self, report: &ReportData) -> Result<Vec<u8>> {
        let rows = Self::layout(report);

        let mut workbook = Workbook::new();
        Self::write_rows(workbook.add_worksheet(), &rows)?;

        workbook.save_to_buffer().context("Failed to write workbook")
    }
}
