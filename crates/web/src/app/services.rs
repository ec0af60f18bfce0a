//! Shared services behind the HTTP handlers.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use minijinja::{Environment, Value};

use bookshelf_infra::{InMemoryAuthorRepository, MutationPipeline};

use crate::app::templates;

/// Repository, pipeline, and template environment shared by all handlers.
pub struct AppServices {
    pub repo: Arc<InMemoryAuthorRepository>,
    pub pipeline: MutationPipeline<Arc<InMemoryAuthorRepository>>,
    templates: Environment<'static>,
}

pub fn build_services() -> anyhow::Result<AppServices> {
    let repo = Arc::new(InMemoryAuthorRepository::new());
    Ok(AppServices {
        pipeline: MutationPipeline::new(repo.clone()),
        repo,
        templates: templates::environment()?,
    })
}

impl AppServices {
    /// Render a template to a full HTML response.
    ///
    /// Template failures are a server bug; they log and map to a bare 500.
    pub fn render(&self, name: &str, ctx: Value) -> Response {
        match self
            .templates
            .get_template(name)
            .and_then(|template| template.render(ctx))
        {
            Ok(body) => Html(body).into_response(),
            Err(err) => {
                tracing::error!(template = name, error = %err, "template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
