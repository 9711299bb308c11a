//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record persisted through the blob port.
//! - Derive the display title from note content.
//!
//! # Invariants
//! - `id` is assigned at creation and never changes.
//! - `title` is never set directly; it is recomputed from `content` on edit.
//! - `updated_at` never moves backwards for a given note.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one note.
pub type NoteId = Uuid;

/// Title assigned to a freshly created, still empty note.
pub const NEW_NOTE_TITLE: &str = "New Note";
/// Title used when the first content line is blank.
pub const UNTITLED_NOTE_TITLE: &str = "Untitled Note";
/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 30;

/// One user note.
///
/// Serialized field names (`id`, `title`, `content`, `updatedAt`) are the
/// persisted blob schema; renaming them breaks existing stored collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Unix epoch milliseconds of the last edit.
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

impl Note {
    /// Creates an empty note with a generated id.
    pub fn new(created_at: i64) -> Self {
        Self::with_id(Uuid::new_v4(), created_at)
    }

    /// Creates an empty note with a caller-provided id.
    pub fn with_id(id: NoteId, created_at: i64) -> Self {
        Self {
            id,
            title: NEW_NOTE_TITLE.to_string(),
            content: String::new(),
            updated_at: created_at,
        }
    }

    /// Replaces content, re-derives the title and bumps `updated_at`.
    ///
    /// A clock reading older than the stored timestamp keeps the stored value.
    pub fn apply_content(&mut self, content: impl Into<String>, now: i64) {
        self.content = content.into();
        self.title = derive_title(&self.content);
        self.updated_at = self.updated_at.max(now);
    }
}

/// Derives a note title from its content.
///
/// Rules:
/// - Take the first line (split on `\n`, trailing `\r` dropped).
/// - Keep at most 30 characters.
/// - Fall back to `"Untitled Note"` when that line is blank.
pub fn derive_title(content: &str) -> String {
    let first_line = content.split('\n').next().unwrap_or_default();
    let first_line = first_line.strip_suffix('\r').unwrap_or(first_line);
    if first_line.trim().is_empty() {
        return UNTITLED_NOTE_TITLE.to_string();
    }
    first_line.chars().take(TITLE_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::{derive_title, Note, NEW_NOTE_TITLE, UNTITLED_NOTE_TITLE};

    #[test]
    fn title_is_first_line() {
        assert_eq!(derive_title("Hello\nworld"), "Hello");
        assert_eq!(derive_title("Windows\r\nline"), "Windows");
    }

    #[test]
    fn title_falls_back_for_blank_first_line() {
        assert_eq!(derive_title(""), UNTITLED_NOTE_TITLE);
        assert_eq!(derive_title("   \nsecond"), UNTITLED_NOTE_TITLE);
    }

    #[test]
    fn title_truncates_by_characters() {
        let long = "é".repeat(40);
        let title = derive_title(&long);
        assert_eq!(title.chars().count(), 30);
        assert_eq!(derive_title(&"a".repeat(30)), "a".repeat(30));
    }

    #[test]
    fn apply_content_never_moves_timestamp_backwards() {
        let mut note = Note::new(5_000);
        assert_eq!(note.title, NEW_NOTE_TITLE);

        note.apply_content("later", 4_000);
        assert_eq!(note.updated_at, 5_000);
        assert_eq!(note.title, "later");

        note.apply_content("again", 6_000);
        assert_eq!(note.updated_at, 6_000);
    }

    #[test]
    fn serialized_field_names_match_blob_schema() {
        let note = Note::new(1);
        let value = serde_json::to_value(&note).unwrap();
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("updated_at").is_none());
        assert_eq!(value["title"], NEW_NOTE_TITLE);
    }
}
