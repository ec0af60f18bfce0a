//! HTTP application wiring (axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: repository/pipeline/template wiring shared by handlers
//! - `routes/`: HTTP routes + handlers (one file per page area)
//! - `views.rs`: template view models mapped from domain types
//! - `templates.rs`: embedded minijinja templates + render helpers
//! - `flash.rs`: one-shot flash-message cookie

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

pub mod flash;
pub mod routes;
pub mod services;
pub mod templates;
pub mod views;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app() -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services()?);
    Ok(routes::router().layer(ServiceBuilder::new().layer(Extension(services))))
}
