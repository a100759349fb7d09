//! # REST API for the Monthly Recap

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::PeriodQuery;
use tracing::info;

use crate::io::rest::error::{ApiError, ApiQuery};
use crate::io::rest::mappers::recap_mapper::RecapMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_recap))
}

/// Aggregate counts, sums and the summary paragraph for one month
pub async fn get_recap(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /recap - query: {:?}", query);

    let period = RecapMapper::to_period(query)?;
    let recap = state.recap_service.recap(period).await?;

    Ok((StatusCode::OK, Json(RecapMapper::to_dto(recap))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use axum::{body::Body, http::Request};
    use tower::util::ServiceExt; // for `oneshot`

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let (state, _dir) = test_state().await;
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router().with_state(state).oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_empty_month_is_not_an_error() {
        let (status, body) = get("/?month=2&year=2023").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_activities"], 0);
        assert_eq!(body["total_income"].as_f64(), Some(0.0));
        assert_eq!(body["activities_by_category"], serde_json::json!({}));
        assert!(body["summary"].as_str().unwrap().starts_with("February 2023"));
    }

    #[tokio::test]
    async fn test_out_of_range_periods() {
        for uri in ["/?month=0&year=2024", "/?month=13&year=2024", "/?month=1&year=10000"] {
            let (status, body) = get(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["error"], "invalid_period");
        }

        let (status, body) = get("/?month=march&year=2024").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }
}
