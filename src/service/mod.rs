use crate::{
    dto::{CreateNoteRequest, MutationResponse, NoteResponse, UpdateNoteRequest},
    repository::{Repository, RepositoryError},
};

use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Missing fields")]
    MissingFields,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("database lock poisoned")]
    LockPoisoned,

    #[error("database worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<Mutex<Repository>>,
}

impl NoteService {
    pub const fn new(repo: Arc<Mutex<Repository>>) -> Self {
        Self { repo }
    }

    /// Runs `op` against the repository on the blocking pool so SQLite I/O
    /// never stalls a runtime worker.
    async fn with_repo<T, F>(&self, op: F) -> Result<T, ServiceError>
    where
        T: Send + 'static,
        F: FnOnce(&Repository) -> Result<T, RepositoryError> + Send + 'static,
    {
        let repo = Arc::clone(&self.repo);

        tokio::task::spawn_blocking(move || {
            let repo = repo.lock().map_err(|_| ServiceError::LockPoisoned)?;
            op(&repo).map_err(ServiceError::from)
        })
        .await?
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, ServiceError> {
        let notes = self.with_repo(Repository::list_notes).await?;

        Ok(notes.into_iter().map(NoteResponse::from).collect())
    }

    /// Rejects empty or absent fields before any write.
    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        let (Some(title), Some(content)) = (
            request.title.filter(|t| !t.is_empty()),
            request.content.filter(|c| !c.is_empty()),
        ) else {
            return Err(ServiceError::MissingFields);
        };

        let note = self
            .with_repo(move |repo| repo.create_note(&title, &content))
            .await?;
        tracing::debug!("Created note {}", note.id);

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<MutationResponse, ServiceError> {
        let changes = self
            .with_repo(move |repo| {
                repo.update_note(id, request.title.as_deref(), request.content.as_deref())
            })
            .await?;

        Ok(MutationResponse {
            message: "Updated".to_string(),
            changes,
        })
    }

    pub async fn delete_note(&self, id: i64) -> Result<MutationResponse, ServiceError> {
        let changes = self.with_repo(move |repo| repo.delete_note(id)).await?;

        Ok(MutationResponse {
            message: "Deleted".to_string(),
            changes,
        })
    }
}
