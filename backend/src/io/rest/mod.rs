//! # REST API Interface Layer
//!
//! HTTP endpoints for the monthly report service. Each `*_apis` module owns
//! one resource and exposes a `router()` that `create_router` nests under the
//! resource path.
//!
//! - Request bodies and query strings use the DTOs from the `shared` crate
//! - Mappers translate DTOs to domain commands and back
//! - Errors leave as `{ "error", "message" }` JSON through [`error::ApiError`]
//! - Mutations add the `X-Invalidated-Periods` header

pub mod activity_apis;
pub mod error;
pub mod export_apis;
pub mod file_apis;
pub mod finance_apis;
pub mod health_apis;
pub mod mappers;
pub mod recap_apis;
