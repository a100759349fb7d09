//! # REST API for Evidence Files
//!
//! Multipart upload into the blob store and raw download by id.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use shared::UploadResponse;
use tracing::info;

use crate::io::rest::error::{ApiError, ApiPath};
use crate::AppState;

const UPLOAD_FIELD: &str = "file";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload_file))
        .route("/:id", get(download_file))
}

/// Stores the first multipart field named `file`
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /files");
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        let metadata = state
            .file_service
            .upload(file_name.as_deref(), content_type.as_deref(), bytes.to_vec())
            .await?;

        info!("✅ Uploaded {} as {}", metadata.file_name, metadata.id);
        let response = UploadResponse {
            id: metadata.id,
            file_name: metadata.file_name,
            size: metadata.size,
        };
        return Ok((StatusCode::CREATED, Json(response)));
    }

    Err(ApiError::BadRequest(format!(
        "Multipart field '{}' is required",
        UPLOAD_FIELD
    )))
}

/// Raw bytes with the content type recorded at upload
pub async fn download_file(
    State(state): State<AppState>,
    ApiPath(file_id): ApiPath<String>,
) -> Result<Response, ApiError> {
    info!("GET /files/{}", file_id);

    let (metadata, bytes) = state.file_service.open(&file_id).await?;

    let content_type = HeaderValue::from_str(&metadata.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&format!("inline; filename=\"{}\"", metadata.file_name))
        .unwrap_or_else(|_| HeaderValue::from_static("inline"));

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type), (header::CONTENT_DISPOSITION, disposition)],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use tower::util::ServiceExt; // for `oneshot`

    const BOUNDARY: &str = "X-REPORT-BOUNDARY";

    fn multipart_request(field: &str, file_name: &str, content: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: text/plain\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri("/")
            .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_round_trip() {
        let (state, _dir) = test_state().await;
        let app = router().with_state(state);

        let response = app
            .clone()
            .oneshot(multipart_request("file", "minutes.txt", b"meeting minutes"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let uploaded: UploadResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(uploaded.file_name, "minutes.txt");
        assert_eq!(uploaded.size, 15);

        let request = Request::builder()
            .uri(format!("/{}", uploaded.id))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/plain");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"meeting minutes");
    }

    #[tokio::test]
    async fn test_missing_field_and_unknown_id() {
        let (state, _dir) = test_state().await;
        let app = router().with_state(state);

        let response = app
            .clone()
            .oneshot(multipart_request("attachment", "a.txt", b"x"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let request = Request::builder()
            .uri(format!("/{}", uuid::Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_multipart_body_is_rejected() {
        let (state, _dir) = test_state().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let response = router().with_state(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
