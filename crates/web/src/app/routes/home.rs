use std::sync::Arc;

use axum::extract::Extension;
use axum::http::HeaderMap;
use axum::response::Response;
use minijinja::context;

use crate::app::services::AppServices;
use crate::app::templates;

pub async fn index(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> Response {
    templates::page(&services, &headers, "home.html", context! {})
}
