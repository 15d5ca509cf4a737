mod app;
mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod service;

use std::sync::{Arc, Mutex};

use repository::Repository;
use service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {e}");
        panic!("failed to load configuration: {e}");
    });
    tracing::info!("Database file: {}", cfg.database_path.display());
    tracing::info!("Front-end directory: {}", cfg.static_dir.display());

    // Storage initialization
    let repo = Repository::open(&cfg.database_path).unwrap_or_else(|e| {
        tracing::error!("Error opening database: {e}");
        panic!("failed to open database: {e}");
    });
    let repo_ptr = Arc::new(Mutex::new(repo));

    // Service creation
    let service = Arc::new(NoteService::new(repo_ptr));

    // Router config
    let router = app::build_router(service, &cfg.static_dir);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind port {}: {e}", cfg.port);
            panic!("failed to bind port {}: {e}", cfg.port);
        });
    let addr = listener.local_addr().expect("listener has a local address");

    tracing::info!("Server running on http://localhost:{}", addr.port());

    axum::serve(listener, router)
        .await
        .expect("failed to start server");
}
