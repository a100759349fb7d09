//! Export service domain logic for the monthly report.
//!
//! Loads the same record set the recap uses, builds a [`ReportData`] and hands
//! it to the renderer for the requested format.

pub mod pdf;
pub mod spreadsheet;

use anyhow::Result;
use shared::ExportFormat;
use std::sync::Arc;
use tracing::info;

use crate::domain::errors::{ReportError, ReportResult};
use crate::domain::models::{Activity, Finance, MonthlyRecap, Period};
use crate::domain::recap_service::RecapService;
use crate::storage::Connection;

pub use pdf::PdfRenderer;
pub use spreadsheet::SpreadsheetRenderer;

/// Everything a renderer may put in a document
#[derive(Debug, Clone)]
pub struct ReportData {
    pub recap: MonthlyRecap,
    pub activities: Vec<Activity>,
    pub finances: Vec<Finance>,
}

/// A finished document ready to be downloaded
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub trait ReportRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn extension(&self) -> &'static str;

    fn render(&self, report: &ReportData) -> Result<Vec<u8>>;
}

#[derive(Clone)]
pub struct ExportService<C: Connection> {
    recap_service: RecapService<C>,
    pdf_renderer: Arc<dyn ReportRenderer>,
    spreadsheet_renderer: Arc<dyn ReportRenderer>,
}

impl<C: Connection> ExportService<C> {
    pub fn new(recap_service: RecapService<C>) -> Self {
        Self::with_renderers(
            recap_service,
            Arc::new(PdfRenderer::new()),
            Arc::new(SpreadsheetRenderer::new()),
        )
    }

    pub fn with_renderers(
        recap_service: RecapService<C>,
        pdf_renderer: Arc<dyn ReportRenderer>,
        spreadsheet_renderer: Arc<dyn ReportRenderer>,
    ) -> Self {
        Self {
            recap_service,
            pdf_renderer,
            spreadsheet_renderer,
        }
    }

    pub async fn export(&self, format: ExportFormat, period: Period) -> ReportResult<RenderedReport> {
        info!("📄 EXPORT: Rendering {} report for {}", format, period);

        let (activities, finances) = self.recap_service.load_period(&period).await?;
        let recap = self
            .recap_service
            .recap_from_records(period, &activities, &finances)
            .await?;

        let data = ReportData { recap, activities, finances };

        let renderer = match format {
            ExportFormat::Pdf => &self.pdf_renderer,
            ExportFormat::Excel => &self.spreadsheet_renderer,
        };

        let bytes = renderer.render(&data).map_err(ReportError::Render)?;
        let file_name = format!(
            "report_{:04}_{:02}.{}",
            period.year(),
            period.month(),
            renderer.extension()
        );

        info!("✅ EXPORT: {} ({} bytes)", file_name, bytes.len());
        Ok(RenderedReport {
            file_name,
            content_type: renderer.content_type(),
            bytes,
        })
    }
}
