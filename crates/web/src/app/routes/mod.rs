use axum::{routing::get, Router};

pub mod authors;
pub mod home;

pub fn router() -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/home", get(home::index))
        .route("/health", get(health))
        .nest("/authors", authors::router())
}

pub async fn health() -> &'static str {
    "ok"
}
