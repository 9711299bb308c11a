//! Note collection use-cases with write-through persistence.
//!
//! # Responsibility
//! - Own the ordered note collection and the active-note reference.
//! - Provide create/select/update/delete with derived-title semantics.
//! - Serialize the whole collection through the blob port after each mutation.
//!
//! # Invariants
//! - Collection order is newest-created first; only `create` reorders.
//! - The active reference is an id that always resolves inside the collection.
//! - Port failures never roll back or fail a mutation; they are recorded in
//!   `PersistenceStatus` for the host to observe.
//! - Note content is never written to logs.

use crate::model::note::{Note, NoteId};
use crate::repo::blob_repo::{BlobStore, RepoError, RepoResult, NOTES_BLOB_KEY};
use crate::service::clock::{Clock, SystemClock};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-contract violations surfaced by note operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteStoreError {
    /// No note with this id exists in the collection.
    NotFound(NoteId),
    /// `update` was called without an active note.
    NoActiveNote,
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::NoActiveNote => write!(f, "no active note selected"),
        }
    }
}

impl Error for NoteStoreError {}

/// Outcome of reading the persisted collection at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Blob decoded; holds the number of notes restored.
    Restored(usize),
    /// No blob stored yet.
    Empty,
    /// Blob present but not decodable; collection started empty.
    Corrupt(String),
    /// Port read failed; collection started empty.
    ReadFailed(String),
}

/// Latest write-through result, observable by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceStatus {
    /// Nothing has been written in this session.
    Idle,
    Saved { at_ms: i64, note_count: usize },
    Failed { error: String, attempted_at_ms: i64 },
}

impl PersistenceStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Short label for view layers.
    pub fn label(&self) -> String {
        match self {
            Self::Idle => "idle".to_string(),
            Self::Saved { note_count, .. } => format!("saved ({note_count} notes)"),
            Self::Failed { error, .. } => format!("save failed: {error}"),
        }
    }
}

/// Note collection bound to a persistence port.
pub struct NoteStore<P: BlobStore, C: Clock = SystemClock> {
    port: P,
    clock: C,
    notes: Vec<Note>,
    active_id: Option<NoteId>,
    load_status: LoadStatus,
    persistence_status: PersistenceStatus,
}

impl<P: BlobStore> NoteStore<P, SystemClock> {
    /// Loads the persisted collection using the system clock.
    pub fn load(port: P) -> Self {
        Self::load_with_clock(port, SystemClock)
    }
}

impl<P: BlobStore, C: Clock> NoteStore<P, C> {
    /// Loads the persisted collection.
    ///
    /// Absent or undecodable blobs start an empty collection; the reason is
    /// kept in `load_status()`. No active note is selected after load.
    pub fn load_with_clock(port: P, clock: C) -> Self {
        let (notes, load_status) = match port.read_blob(NOTES_BLOB_KEY) {
            Ok(Some(bytes)) => match decode_notes(&bytes) {
                Ok(notes) => {
                    let count = notes.len();
                    (notes, LoadStatus::Restored(count))
                }
                Err(err) => (Vec::new(), LoadStatus::Corrupt(err)),
            },
            Ok(None) => (Vec::new(), LoadStatus::Empty),
            Err(err) => (Vec::new(), LoadStatus::ReadFailed(err.to_string())),
        };

        match &load_status {
            LoadStatus::Restored(count) => info!(
                "event=notes_load module=notes status=ok note_count={}",
                count
            ),
            LoadStatus::Empty => info!("event=notes_load module=notes status=ok note_count=0"),
            LoadStatus::Corrupt(reason) => warn!(
                "event=notes_load module=notes status=degraded error_code=blob_corrupt error={}",
                reason
            ),
            LoadStatus::ReadFailed(reason) => warn!(
                "event=notes_load module=notes status=degraded error_code=blob_read_failed error={}",
                reason
            ),
        }

        Self {
            port,
            clock,
            notes,
            active_id: None,
            load_status,
            persistence_status: PersistenceStatus::Idle,
        }
    }

    /// Inserts an empty note at the front and makes it active.
    pub fn create(&mut self) -> NoteId {
        let note = Note::new(self.clock.now_ms());
        let id = note.id;
        self.notes.insert(0, note);
        self.active_id = Some(id);
        info!(
            "event=note_create module=notes status=ok note_id={} note_count={}",
            id,
            self.notes.len()
        );
        self.persist();
        id
    }

    /// Makes `id` the active note.
    ///
    /// # Errors
    /// - `NotFound` when `id` is not in the collection; the active note is kept.
    pub fn select(&mut self, id: NoteId) -> Result<(), NoteStoreError> {
        if self.position(id).is_none() {
            return Err(NoteStoreError::NotFound(id));
        }
        self.active_id = Some(id);
        Ok(())
    }

    /// Replaces the active note's content and re-derives its title.
    ///
    /// # Errors
    /// - `NoActiveNote` when nothing is selected.
    pub fn update(&mut self, content: impl Into<String>) -> Result<(), NoteStoreError> {
        let index = self
            .active_id
            .and_then(|id| self.position(id))
            .ok_or(NoteStoreError::NoActiveNote)?;

        let now = self.clock.now_ms();
        let note = &mut self.notes[index];
        note.apply_content(content, now);
        info!(
            "event=note_update module=notes status=ok note_id={} content_chars={}",
            note.id,
            note.content.chars().count()
        );
        self.persist();
        Ok(())
    }

    /// Removes `id` from the collection, clearing the active note if it matches.
    ///
    /// Returns whether a note was removed. Unknown ids are a no-op and do not
    /// trigger a write.
    pub fn delete(&mut self, id: NoteId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.notes.remove(index);
        if self.active_id == Some(id) {
            self.active_id = None;
        }
        info!(
            "event=note_delete module=notes status=ok note_id={} note_count={}",
            id,
            self.notes.len()
        );
        self.persist();
        true
    }

    /// Notes in display order (newest created first).
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn active_id(&self) -> Option<NoteId> {
        self.active_id
    }

    pub fn active_note(&self) -> Option<&Note> {
        self.active_id.and_then(|id| self.get(id))
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn persistence_status(&self) -> &PersistenceStatus {
        &self.persistence_status
    }

    /// Retries the write-through after an earlier failure.
    pub fn flush(&mut self) -> RepoResult<()> {
        let result = self.write_collection();
        self.record_write(&result);
        result
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }

    fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn persist(&mut self) {
        let result = self.write_collection();
        self.record_write(&result);
    }

    fn write_collection(&mut self) -> RepoResult<()> {
        let bytes =
            serde_json::to_vec(&self.notes).map_err(|err| RepoError::Encode(err.to_string()))?;
        self.port.write_blob(NOTES_BLOB_KEY, &bytes)
    }

    fn record_write(&mut self, result: &RepoResult<()>) {
        let now = self.clock.now_ms();
        self.persistence_status = match result {
            Ok(()) => PersistenceStatus::Saved {
                at_ms: now,
                note_count: self.notes.len(),
            },
            Err(err) => {
                error!(
                    "event=notes_persist module=notes status=error error_code=blob_write_failed error={}",
                    err
                );
                PersistenceStatus::Failed {
                    error: err.to_string(),
                    attempted_at_ms: now,
                }
            }
        };
    }
}

/// Decodes a persisted collection, dropping repeated ids after the first.
fn decode_notes(bytes: &[u8]) -> Result<Vec<Note>, String> {
    let decoded: Vec<Note> = serde_json::from_slice(bytes).map_err(|err| err.to_string())?;
    let mut seen = HashSet::with_capacity(decoded.len());
    let before = decoded.len();
    let notes: Vec<Note> = decoded
        .into_iter()
        .filter(|note| seen.insert(note.id))
        .collect();
    if notes.len() != before {
        warn!(
            "event=notes_load module=notes status=warn duplicate_ids_dropped={}",
            before - notes.len()
        );
    }
    Ok(notes)
}
