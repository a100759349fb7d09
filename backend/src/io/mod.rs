//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services. Handlers parse
//! requests into domain commands, call one service, and map the result (or the
//! [`crate::domain::ReportError`]) back to JSON.

pub mod rest;
