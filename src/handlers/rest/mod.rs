use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{CreateNoteRequest, ErrorResponse, MutationResponse, NoteResponse, UpdateNoteRequest},
    service::{NoteService, ServiceError},
};

#[derive(OpenApi)]
#[openapi(
    paths(get_all_notes, create_note, update_note, delete_note),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        MutationResponse,
        ErrorResponse
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn service_error_response(err: &ServiceError) -> Response {
    match err {
        ServiceError::MissingFields => error_response(StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::Repository(_) | ServiceError::LockPoisoned | ServiceError::Worker(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/notes",
    responses(
        (status = 200, description = "All notes, newest first", body = Vec<NoteResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.get_all_notes().await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => {
            tracing::error!("failed to get note entries: {}", e);
            service_error_response(&e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 200, description = "Note created", body = NoteResponse),
        (status = 400, description = "Title or content missing", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Response {
    // An unreadable body carries no fields
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::debug!("create note body rejected: {}", rejection.body_text());
            CreateNoteRequest::default()
        }
    };

    match service.create_note(payload).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => {
            if matches!(e, ServiceError::MissingFields) {
                tracing::warn!("rejected note creation: {}", e);
            } else {
                tracing::error!("failed to create note entry: {}", e);
            }
            service_error_response(&e)
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Update applied; changes is 0 when the id does not exist", body = MutationResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };
    // Without a JSON content type the body is treated as empty
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(JsonRejection::MissingJsonContentType(_)) => UpdateNoteRequest::default(),
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };

    match service.update_note(id, payload).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            tracing::error!("failed to update note entry: {}", e);
            service_error_response(&e)
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Delete applied; changes is 0 when the id does not exist", body = MutationResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };

    match service.delete_note(id).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            tracing::error!("failed to delete note entry: {}", e);
            service_error_response(&e)
        }
    }
}

/// Keeps unknown `/api` paths out of the front-end fallback.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}
