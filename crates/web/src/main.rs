#[tokio::main]
async fn main() {
    bookshelf_observability::init();

    let addr = std::env::var("BOOKSHELF_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = bookshelf_web::app::build_app().expect("failed to build application");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
