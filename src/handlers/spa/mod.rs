use axum::{
    Router,
    extract::State,
    handler::Handler,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tower_http::services::ServeDir;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

const ENTRY_DOCUMENT: &str = "index.html";

/// Serves the built front-end from `static_dir`. Paths without a matching
/// file get the entry document so client-side routing can take over.
pub fn router(static_dir: &Path) -> Router {
    let index = Arc::new(static_dir.join(ENTRY_DOCUMENT));
    let fallback = serve_index.with_state(index);

    Router::new().fallback_service(ServeDir::new(static_dir).fallback(fallback))
}

async fn serve_index(State(index): State<Arc<PathBuf>>) -> Response {
    match tokio::fs::read_to_string(index.as_path()).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::warn!("front-end entry {} unavailable: {}", index.display(), e);
            (
                StatusCode::NOT_FOUND,
                format!(
                    "Front-end entry document not found at {}. Build the front-end first.",
                    index.display()
                ),
            )
                .into_response()
        }
    }
}
