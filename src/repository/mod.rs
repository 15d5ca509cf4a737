use std::path::Path;

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, Row, params};

use crate::models::Note;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    content TEXT,
    created_at TEXT
)";

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub struct Repository {
    conn: Connection,
}

impl Repository {
    /// Opens the database file, creating it and its parent directory when
    /// missing, and makes sure the `notes` table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        tracing::info!("Connected to the SQLite database at {}", path.display());

        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, RepositoryError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, RepositoryError> {
        conn.execute_batch(SCHEMA)?;
        tracing::info!("Notes table ready");

        Ok(Self { conn })
    }

    pub fn list_notes(&self) -> Result<Vec<Note>, RepositoryError> {
        // NULL created_at (legacy rows) sorts last under DESC
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, created_at FROM notes ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], note_from_row)?;

        let mut vec: Vec<Note> = Vec::new();

        for row in rows {
            vec.push(row?);
        }

        Ok(vec)
    }

    pub fn create_note(&self, title: &str, content: &str) -> Result<Note, RepositoryError> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let note = self.conn.query_row(
            "INSERT INTO notes (title, content, created_at) VALUES (?1, ?2, ?3) \
             RETURNING id, title, content, created_at",
            params![title, content, created_at],
            note_from_row,
        )?;

        Ok(note)
    }

    /// Returns the number of rows changed; `created_at` is never touched.
    pub fn update_note(
        &self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<usize, RepositoryError> {
        let changes = self.conn.execute(
            "UPDATE notes SET title = ?1, content = ?2 WHERE id = ?3",
            params![title, content, id],
        )?;

        Ok(changes)
    }

    pub fn delete_note(&self, id: i64) -> Result<usize, RepositoryError> {
        let changes = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id])?;

        Ok(changes)
    }

    #[cfg(test)]
    pub(crate) const fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> Repository {
        Repository::open_in_memory().expect("open in-memory repository")
    }

    #[test]
    fn create_assigns_increasing_ids_and_timestamp() {
        let repo = repo();

        let first = repo.create_note("First", "one").expect("create first");
        let second = repo.create_note("Second", "two").expect("create second");

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(second.title.as_deref(), Some("Second"));
        assert_eq!(second.content.as_deref(), Some("two"));

        let created_at = second.created_at.expect("timestamp");
        assert!(created_at.ends_with('Z'));
        chrono::DateTime::parse_from_rfc3339(&created_at).expect("rfc3339 timestamp");
    }

    #[test]
    fn list_returns_newest_first() {
        let repo = repo();
        repo.connection()
            .execute(
                "INSERT INTO notes (title, content, created_at) VALUES \
                 ('old', 'a', '2024-01-01T00:00:00.000Z'), \
                 ('new', 'b', '2024-06-01T00:00:00.000Z'), \
                 ('mid', 'c', '2024-03-01T00:00:00.000Z')",
                [],
            )
            .expect("seed rows");

        let titles: Vec<_> = repo
            .list_notes()
            .expect("list")
            .into_iter()
            .filter_map(|n| n.title)
            .collect();

        assert_eq!(titles, ["new", "mid", "old"]);
    }

    #[test]
    fn legacy_rows_without_timestamp_sort_last() {
        let repo = repo();
        repo.connection()
            .execute(
                "INSERT INTO notes (title, content, created_at) VALUES ('legacy', 'x', NULL)",
                [],
            )
            .expect("seed legacy row");
        repo.create_note("fresh", "y").expect("create");

        let notes = repo.list_notes().expect("list");

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title.as_deref(), Some("fresh"));
        assert_eq!(notes[1].title.as_deref(), Some("legacy"));
        assert_eq!(notes[1].created_at, None);
    }

    #[test]
    fn update_keeps_created_at() {
        let repo = repo();
        let note = repo.create_note("Title", "Body").expect("create");

        let changes = repo
            .update_note(note.id, Some("New title"), Some("New body"))
            .expect("update");
        assert_eq!(changes, 1);

        let stored = repo.list_notes().expect("list").remove(0);
        assert_eq!(stored.title.as_deref(), Some("New title"));
        assert_eq!(stored.content.as_deref(), Some("New body"));
        assert_eq!(stored.created_at, note.created_at);
    }

    #[test]
    fn update_missing_id_changes_nothing() {
        let repo = repo();
        let note = repo.create_note("Title", "Body").expect("create");

        let changes = repo
            .update_note(note.id + 100, Some("x"), Some("y"))
            .expect("update");

        assert_eq!(changes, 0);
        assert_eq!(repo.list_notes().expect("list"), vec![note]);
    }

    #[test]
    fn update_with_absent_fields_writes_null() {
        let repo = repo();
        let note = repo.create_note("Title", "Body").expect("create");

        repo.update_note(note.id, None, Some("Body only"))
            .expect("update");

        let stored = repo.list_notes().expect("list").remove(0);
        assert_eq!(stored.title, None);
        assert_eq!(stored.content.as_deref(), Some("Body only"));
    }

    #[test]
    fn delete_removes_exactly_one_row() {
        let repo = repo();
        let keep = repo.create_note("keep", "a").expect("create");
        let gone = repo.create_note("gone", "b").expect("create");

        assert_eq!(repo.delete_note(gone.id).expect("delete"), 1);
        assert_eq!(repo.delete_note(gone.id).expect("delete again"), 0);
        assert_eq!(repo.list_notes().expect("list"), vec![keep]);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let repo = repo();
        let first = repo.create_note("a", "a").expect("create");
        repo.delete_note(first.id).expect("delete");

        let second = repo.create_note("b", "b").expect("create");

        assert!(second.id > first.id);
    }

    #[test]
    fn open_is_idempotent_and_persists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data").join("notes.db");

        let id = {
            let repo = Repository::open(&path).expect("first open");
            repo.create_note("persisted", "yes").expect("create").id
        };

        let repo = Repository::open(&path).expect("second open");
        let notes = repo.list_notes().expect("list");

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, id);
        assert_eq!(notes[0].title.as_deref(), Some("persisted"));
    }

    #[test]
    fn store_faults_surface_as_errors() {
        let repo = repo();
        repo.connection()
            .execute_batch("DROP TABLE notes")
            .expect("drop table");

        let err = repo.list_notes().expect_err("list must fail");

        assert!(matches!(err, RepositoryError::Sqlite(_)));
        assert!(err.to_string().contains("no such table"));
    }
}
