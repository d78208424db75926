use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

mod config;
mod models;
mod routes;
mod services;
mod utils;

use config::AppConfig;
use models::storage::{Catalog, MemoryCatalog};
use routes::{books::add_book, health::health_check, search::search_books};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub http: reqwest::Client,
    pub config: Arc<AppConfig>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("book_search_service=info,tower_http=info")
        .init();

    let config = Arc::new(AppConfig::from_env());

    std::fs::create_dir_all(&config.upload_dir).expect("Failed to create upload directory");

    let http = reqwest::Client::builder()
        .timeout(services::openlibrary::REQUEST_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client");

    let catalog: Catalog = Arc::new(MemoryCatalog::new());

    let state = AppState {
        catalog,
        http,
        config: config.clone(),
    };

    let app = Router::new()
        .route("/status", get(health_check))
        .route("/search", get(search_books))
        .route("/add-book", post(add_book))
        .nest_service("/static", ServeDir::new(&config.upload_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let port = &config.port;
    let addr = format!("0.0.0.0:{}", port);

    info!("Book search service starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
