//! Translation of domain errors and extractor rejections into JSON responses.
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::errors::ReportError;
use crate::domain::models::Period;

/// Response header listing the YYYY-MM periods a mutation made stale
pub const INVALIDATED_PERIODS_HEADER: &str = "x-invalidated-periods";

#[derive(Debug)]
pub enum ApiError {
    Domain(ReportError),
    BadRequest(String),
    PayloadTooLarge(String),
}

impl ApiError {
    fn from_rejection(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(message)
        } else {
            ApiError::BadRequest(message)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(e) => match e {
                ReportError::InvalidPeriod { .. } | ReportError::Validation(_) => StatusCode::BAD_REQUEST,
                ReportError::NotFound { .. } => StatusCode::NOT_FOUND,
                ReportError::DataUnavailable(_) | ReportError::SummaryUnavailable(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                ReportError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Domain(e) => match e {
                ReportError::InvalidPeriod { .. } => "invalid_period",
                ReportError::Validation(_) => "validation",
                ReportError::NotFound { .. } => "not_found",
                ReportError::DataUnavailable(_) => "data_unavailable",
                ReportError::SummaryUnavailable(_) => "summary_unavailable",
                ReportError::Render(_) => "internal",
            },
            ApiError::BadRequest(_) => "bad_request",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
        }
    }

    /// Client-facing text; server-side causes stay in the log
    fn message(&self) -> String {
        match self {
            ApiError::Domain(ReportError::DataUnavailable(_)) => "The record store is unavailable".to_string(),
            ApiError::Domain(ReportError::SummaryUnavailable(_)) => "The summary could not be generated".to_string(),
            ApiError::Domain(ReportError::Render(_)) => "The report could not be rendered".to_string(),
            ApiError::Domain(e) => e.to_string(),
            ApiError::BadRequest(message) | ApiError::PayloadTooLarge(message) => message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match &self {
                ApiError::Domain(e) => error!("❌ {}: {:#}", self.kind(), e),
                other => error!("❌ {:?}", other),
            }
        } else {
            warn!("Request rejected ({}): {}", self.kind(), self.message());
        }

        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        ApiError::Domain(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::from_rejection(e.status(), e.body_text())
    }
}

/// `Json` whose rejections use the JSON error body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query` whose rejections use the JSON error body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `Path` whose rejections use the JSON error body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

pub fn invalidation_headers(periods: &[Period]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = periods
        .iter()
        .map(Period::to_string)
        .collect::<Vec<_>>()
        .join(",");
    if let Ok(value) = HeaderValue::from_str(&value) {
        headers.insert(HeaderName::from_static(INVALIDATED_PERIODS_HEADER), value);
    }
    headers
}
