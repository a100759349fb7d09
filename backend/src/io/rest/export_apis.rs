//! # REST API for Report Export
//!
//! Renders one month as a downloadable PDF or spreadsheet.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use shared::{ExportFormat, PeriodQuery};
use tracing::info;

use crate::io::rest::error::{ApiError, ApiPath, ApiQuery};
use crate::io::rest::mappers::recap_mapper::RecapMapper;
use crate::AppState;

/// Create a router for export related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/:format", get(export_report))
}

pub async fn export_report(
    State(state): State<AppState>,
    ApiPath(format): ApiPath<ExportFormat>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> Result<Response, ApiError> {
    info!("GET /export/{} - query: {:?}", format, query);

    let period = RecapMapper::to_period(query)?;
    let report = state.export_service.export(format, period).await?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", report.file_name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(report.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use axum::{body::Body, http::Request};
    use tower::util::ServiceExt; // for `oneshot`

    async fn export(uri: &str) -> Response {
        let (state, _dir) = test_state().await;
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        router().with_state(state).oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_pdf_export_headers() {
        let response = export("/pdf?month=3&year=2024").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "application/pdf");
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"report_2024_03.pdf\""
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.starts_with(b"%PDF-1.4"));
    }

    #[tokio::test]
    async fn test_excel_export_headers() {
        let response = export("/excel?month=12&year=2023").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"report_2023_12.xlsx\""
        );
    }

    #[tokio::test]
    async fn test_unknown_format_and_bad_period() {
        let response = export("/docx?month=3&year=2024").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = export("/pdf?month=13&year=2024").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
