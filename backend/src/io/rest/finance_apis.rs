//! # REST API for Finance Entries

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use shared::{FinanceRequest, RecordListQuery};
use tracing::info;

use crate::io::rest::error::{invalidation_headers, ApiError, ApiJson, ApiPath, ApiQuery};
use crate::io::rest::mappers::finance_mapper::FinanceMapper;
use crate::AppState;

/// Create a router for finance related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_finances).post(create_finance))
        .route("/:id", put(update_finance).delete(delete_finance))
}

pub async fn list_finances(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RecordListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /finances - query: {:?}", query);

    let query = FinanceMapper::to_list_query(query)?;
    let finances = state.finance_service.list_finances(query).await?;

    Ok((StatusCode::OK, Json(FinanceMapper::to_dto_list(finances))))
}

pub async fn create_finance(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<FinanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /finances - request: {:?}", request);

    let mutation = state
        .finance_service
        .create_finance(FinanceMapper::to_command(request))
        .await?;

    Ok((
        StatusCode::CREATED,
        invalidation_headers(&mutation.invalidated),
        Json(FinanceMapper::to_dto(mutation.value)),
    ))
}

pub async fn update_finance(
    State(state): State<AppState>,
    ApiPath(finance_id): ApiPath<String>,
    ApiJson(request): ApiJson<FinanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /finances/{} - request: {:?}", finance_id, request);

    let mutation = state
        .finance_service
        .update_finance(&finance_id, FinanceMapper::to_command(request))
        .await?;

    Ok((
        StatusCode::OK,
        invalidation_headers(&mutation.invalidated),
        Json(FinanceMapper::to_dto(mutation.value)),
    ))
}

pub async fn delete_finance(
    State(state): State<AppState>,
    ApiPath(finance_id): ApiPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /finances/{}", finance_id);

    let mutation = state.finance_service.delete_finance(&finance_id).await?;

    Ok((StatusCode::NO_CONTENT, invalidation_headers(&mutation.invalidated)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::error::INVALIDATED_PERIODS_HEADER;
    use crate::test_support::test_state;
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use rust_decimal::Decimal;
    use serde_json::json;
    use tower::util::ServiceExt; // for `oneshot`

    async fn setup_test_app() -> (Router, tempfile::TempDir) {
        let (state, dir) = test_state().await;
        (router().with_state(state), dir)
    }

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_net() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/",
                json!({"date": "2024-03-10", "category": "grant", "income": 100.5, "expense": 40}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get(INVALIDATED_PERIODS_HEADER).unwrap(), "2024-03");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let finance: shared::Finance = serde_json::from_slice(&body).unwrap();
        assert_eq!(finance.net, Decimal::new(605, 1));
    }

    #[tokio::test]
    async fn test_list_only_returns_requested_month() {
        let (app, _dir) = setup_test_app().await;
        for date in ["2024-02-29", "2024-03-01", "2024-03-31", "2024-04-01"] {
            let response = app
                .clone()
                .oneshot(json_request(Method::POST, "/", json!({"date": date, "income": 1})))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let request = Request::builder()
            .uri("/?month=3&year=2024")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let listed: Vec<shared::Finance> = serde_json::from_slice(&body).unwrap();
        let dates: Vec<String> = listed.iter().map(|f| f.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-31"]);
    }

    #[tokio::test]
    async fn test_negative_amount_and_missing_entry() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/",
                json!({"date": "2024-03-10", "income": 0, "expense": -5}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                "/does-not-exist",
                json!({"date": "2024-03-10"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/does-not-exist")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
