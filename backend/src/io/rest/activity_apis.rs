//! # REST API for Activities
//!
//! List, create, replace and delete logged activities.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use shared::{ActivityRequest, RecordListQuery};
use tracing::info;

use crate::io::rest::error::{invalidation_headers, ApiError, ApiJson, ApiPath, ApiQuery};
use crate::io::rest::mappers::activity_mapper::ActivityMapper;
use crate::AppState;

/// Create a router for activity related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_activities).post(create_activity))
        .route("/:id", put(update_activity).delete(delete_activity))
}

/// List the activities of one month, optionally filtered by a search term
pub async fn list_activities(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RecordListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /activities - query: {:?}", query);

    let query = ActivityMapper::to_list_query(query)?;
    let activities = state.activity_service.list_activities(query).await?;

    Ok((StatusCode::OK, Json(ActivityMapper::to_dto_list(activities))))
}

pub async fn create_activity(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ActivityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /activities - request: {:?}", request);

    let mutation = state
        .activity_service
        .create_activity(ActivityMapper::to_command(request))
        .await?;

    info!("✅ Activity {} created", mutation.value.id);
    Ok((
        StatusCode::CREATED,
        invalidation_headers(&mutation.invalidated),
        Json(ActivityMapper::to_dto(mutation.value)),
    ))
}

/// Full replace of an existing activity
pub async fn update_activity(
    State(state): State<AppState>,
    ApiPath(activity_id): ApiPath<String>,
    ApiJson(request): ApiJson<ActivityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /activities/{} - request: {:?}", activity_id, request);

    let mutation = state
        .activity_service
        .update_activity(&activity_id, ActivityMapper::to_command(request))
        .await?;

    Ok((
        StatusCode::OK,
        invalidation_headers(&mutation.invalidated),
        Json(ActivityMapper::to_dto(mutation.value)),
    ))
}

pub async fn delete_activity(
    State(state): State<AppState>,
    ApiPath(activity_id): ApiPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /activities/{}", activity_id);

    let mutation = state.activity_service.delete_activity(&activity_id).await?;

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

    fn lecture(date: &str) -> serde_json::Value {
        json!({
            "date": date,
            "name": "Lecture",
            "category": "academics",
            "duration_hours": 1.5,
            "output": "Notes"
        })
    }

    async fn create(app: &Router, body: serde_json::Value) -> shared::Activity {
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get(INVALIDATED_PERIODS_HEADER).unwrap(), "2024-03");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (app, _dir) = setup_test_app().await;
        let created = create(&app, lecture("2024-03-05")).await;
        assert_eq!(created.name, "Lecture");
        assert_eq!(created.category, shared::ActivityCategory::Academics);

        let request = Request::builder()
            .uri("/?month=3&year=2024")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let listed: Vec<shared::Activity> = serde_json::from_slice(&body).unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_search_filters_list() {
        let (app, _dir) = setup_test_app().await;
        create(&app, lecture("2024-03-05")).await;
        let mut other = lecture("2024-03-06");
        other["name"] = json!("Beach cleanup");
        other["category"] = json!("community service");
        create(&app, other).await;

        let request = Request::builder()
            .uri("/?month=3&year=2024&search=BEACH")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let listed: Vec<shared::Activity> = serde_json::from_slice(&body).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Beach cleanup");
    }

    #[tokio::test]
    async fn test_update_moves_period() {
        let (app, _dir) = setup_test_app().await;
        let created = create(&app, lecture("2024-03-05")).await;

        let response = app
            .oneshot(json_request(
                Method::PUT,
                &format!("/{}", created.id),
                lecture("2024-04-02"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(INVALIDATED_PERIODS_HEADER).unwrap(),
            "2024-03,2024-04"
        );
    }

    #[tokio::test]
    async fn test_delete_then_missing() {
        let (app, _dir) = setup_test_app().await;
        let created = create(&app, lecture("2024-03-05")).await;

        let delete = |id: String| {
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/{}", id))
                .body(Body::empty())
                .unwrap()
        };

        let response = app.clone().oneshot(delete(created.id.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(delete(created.id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let (app, _dir) = setup_test_app().await;

        let mut negative = lecture("2024-03-05");
        negative["duration_hours"] = json!(-1.0);
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/", negative))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: shared::ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "validation");

        let mut unknown = lecture("2024-03-05");
        unknown["category"] = json!("gardening");
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/", unknown))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_request(Method::POST, "/", json!({"name": "no date"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: shared::ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "bad_request");
    }
}
