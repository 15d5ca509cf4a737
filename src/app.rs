use axum::{
    Router,
    routing::{get, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::{path::Path, sync::Arc};

use crate::{
    handlers::{rest, spa},
    service::NoteService,
};

/// Assembles the API under `/api`, the OpenAPI docs and the front-end
/// fallback. API routes always win over the front-end.
pub fn build_router(service: Arc<NoteService>, static_dir: &Path) -> Router {
    let api_router = Router::new()
        .route(
            "/notes",
            get(rest::get_all_notes).post(rest::create_note),
        )
        .route(
            "/notes/",
            get(rest::get_all_notes).post(rest::create_note),
        )
        .route(
            "/notes/{id}",
            put(rest::update_note).delete(rest::delete_note),
        )
        .fallback(rest::not_found)
        .with_state(service);

    Router::new()
        .nest("/api", api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .merge(spa::router(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
