//! # Monthly Report Backend
//!
//! HTTP service behind the monthly report UI: activity and finance records,
//! evidence uploads, the monthly recap and PDF/spreadsheet exports.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum REST handlers, mappers)
//!     ↓
//! Domain Layer (services, recap aggregation, rendering)
//!     ↓
//! Storage Layer (SQLite records, filesystem blobs)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AppConfig, CorsOrigin};
use crate::domain::{
    ActivityService, ExportService, FileService, FinanceService, RecapService, Summarizer,
    TemplateSummarizer,
};
use crate::io::rest::{
    activity_apis, error::INVALIDATED_PERIODS_HEADER, export_apis, file_apis, finance_apis,
    health_apis, recap_apis,
};
use crate::storage::{BlobStore, DbConnection, FsBlobStore};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub activity_service: ActivityService<DbConnection>,
    pub finance_service: FinanceService<DbConnection>,
    pub recap_service: RecapService<DbConnection>,
    pub export_service: ExportService<DbConnection>,
    pub file_service: FileService,
}

impl AppState {
    pub fn new(db: DbConnection, blob_store: Arc<dyn BlobStore>, summarizer: Arc<dyn Summarizer>) -> Self {
        let db = Arc::new(db);
        let recap_service = RecapService::new(db.clone(), summarizer);

        Self {
            activity_service: ActivityService::new(db.clone(), blob_store.clone()),
            finance_service: FinanceService::new(db),
            export_service: ExportService::new(recap_service.clone()),
            recap_service,
            file_service: FileService::new(blob_store),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up blob store in {}", config.files_dir().display());
    let blob_store = FsBlobStore::new(config.files_dir()).await?;

    info!("Setting up application state");
    Ok(AppState::new(db, Arc::new(blob_store), Arc::new(TemplateSummarizer::new())))
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(INVALIDATED_PERIODS_HEADER)]);

    Ok(match &config.cors_origin {
        CorsOrigin::Any => cors.allow_origin(Any),
        CorsOrigin::Exact(origin) => cors.allow_origin(origin.parse::<HeaderValue>()?),
    })
}

/// Build the full HTTP router
pub fn create_router(state: AppState, config: &AppConfig) -> Result<Router> {
    let router = Router::new()
        .nest("/activities", activity_apis::router())
        .nest("/finances", finance_apis::router())
        .nest("/recap", recap_apis::router())
        .nest(
            "/files",
            file_apis::router().layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .nest("/export", export_apis::router())
        .nest("/health", health_apis::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config)?)
        .with_state(state);

    Ok(router)
}
