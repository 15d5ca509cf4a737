/// A row of the `notes` table.
///
/// Text columns are nullable in the schema: rows written before `created_at`
/// existed carry no timestamp, and an update that omits a field stores NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub created_at: Option<String>,
}
