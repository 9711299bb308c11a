//! FFI use-case API for the dashboard host.
//!
//! # Responsibility
//! - Expose timer and note use-cases as sync, UI-facing calls via FRB.
//! - Validate raw host input (mode labels, note ids) before it reaches core.
//! - Return a full view snapshot after every call.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One timer and one note store exist per process.
//! - Invalid input never mutates state.

use log::warn;
use std::sync::{Mutex, MutexGuard, OnceLock};
use uuid::Uuid;
use zenith_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Note, NoteStore, SqliteBlobStore, TimerEngine, TimerMode, ZenithConfig,
};

type HostNoteStore = NoteStore<SqliteBlobStore>;

static CONFIG: OnceLock<ZenithConfig> = OnceLock::new();
static TIMER: OnceLock<Mutex<TimerEngine>> = OnceLock::new();
static NOTES: OnceLock<Result<Mutex<HostNoteStore>, String>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Timer view snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSnapshot {
    /// `work|break`.
    pub mode: String,
    pub remaining_secs: u32,
    pub is_running: bool,
    /// `MM:SS` countdown text.
    pub clock: String,
    /// `Running|Standby`.
    pub status: String,
    /// Elapsed share of the current mode in `[0, 1]`.
    pub progress: f64,
}

/// Envelope returned by every timer call.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerResponse {
    pub ok: bool,
    /// Human-readable message; carries the completion text when a session ends.
    pub message: String,
    pub snapshot: TimerSnapshot,
    /// Mode that just completed on this call, if any.
    pub completed_mode: Option<String>,
}

/// Current timer state without mutation.
#[flutter_rust_bridge::frb(sync)]
pub fn timer_snapshot() -> TimerResponse {
    with_timer(|_| Ok(None))
}

#[flutter_rust_bridge::frb(sync)]
pub fn timer_start() -> TimerResponse {
    with_timer(|engine| {
        engine.start();
        Ok(None)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn timer_pause() -> TimerResponse {
    with_timer(|engine| {
        engine.pause();
        Ok(None)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn timer_toggle() -> TimerResponse {
    with_timer(|engine| {
        engine.toggle();
        Ok(None)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn timer_reset() -> TimerResponse {
    with_timer(|engine| {
        engine.reset();
        Ok(None)
    })
}

/// Switches timer mode from a host label.
///
/// # FFI contract
/// - Accepts `work|break` (case-insensitive).
/// - Unknown labels return `ok=false` and leave the timer untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn timer_switch_mode(mode: String) -> TimerResponse {
    with_timer(|engine| {
        let mode = mode.parse::<TimerMode>().map_err(|err| err.to_string())?;
        engine.switch_mode(mode);
        Ok(None)
    })
}

/// Advances the timer by one second.
///
/// # FFI contract
/// - The host calls this at ~1 Hz only while `snapshot.is_running` is true.
/// - `completed_mode` is set on the call that ends a session; the host then
///   decides whether to notify and whether to switch mode.
#[flutter_rust_bridge::frb(sync)]
pub fn timer_tick() -> TimerResponse {
    with_timer(|engine| Ok(engine.tick()))
}

/// Note list item for the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Last edit in epoch milliseconds.
    pub updated_at: i64,
}

/// Envelope returned by every note call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesResponse {
    pub ok: bool,
    pub message: String,
    /// Newest-created first.
    pub items: Vec<NoteItem>,
    pub active_id: Option<String>,
    /// Latest write-through status label.
    pub persistence: String,
}

impl NotesResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            items: Vec::new(),
            active_id: None,
            persistence: "unavailable".to_string(),
        }
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesResponse {
    with_notes(|_| Ok("Notes loaded.".to_string()))
}

/// Creates an empty note, makes it active, and returns its id as `active_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_create() -> NotesResponse {
    with_notes(|store| {
        store.create();
        Ok("Note created.".to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn notes_select(id: String) -> NotesResponse {
    with_notes(|store| {
        let id = parse_note_id(&id)?;
        store.select(id).map_err(|err| err.to_string())?;
        Ok("Note selected.".to_string())
    })
}

/// Replaces the active note's content.
///
/// # FFI contract
/// - Fails with `ok=false` when no note is active.
/// - Persistence failures still return `ok=true`; see `persistence`.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_update(content: String) -> NotesResponse {
    with_notes(|store| {
        store.update(content).map_err(|err| err.to_string())?;
        Ok("Note updated.".to_string())
    })
}

/// Deletes a note. Unknown ids succeed as a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete(id: String) -> NotesResponse {
    with_notes(|store| {
        let id = parse_note_id(&id)?;
        let message = if store.delete(id) {
            "Note deleted."
        } else {
            "Note already absent."
        };
        Ok(message.to_string())
    })
}

fn config() -> &'static ZenithConfig {
    CONFIG.get_or_init(|| {
        ZenithConfig::from_env().unwrap_or_else(|err| {
            warn!("event=config_load module=ffi status=degraded error={err}");
            ZenithConfig::default()
        })
    })
}

fn with_timer(
    f: impl FnOnce(&mut TimerEngine) -> Result<Option<zenith_core::SessionComplete>, String>,
) -> TimerResponse {
    let timer = TIMER.get_or_init(|| Mutex::new(TimerEngine::new(config().durations)));
    let mut engine = lock_recovering(timer);
    let outcome = f(&mut engine);
    let snapshot = to_timer_snapshot(&engine);

    match outcome {
        Ok(Some(done)) => TimerResponse {
            ok: true,
            message: done.message().to_string(),
            snapshot,
            completed_mode: Some(done.mode.as_str().to_string()),
        },
        Ok(None) => TimerResponse {
            ok: true,
            message: String::new(),
            snapshot,
            completed_mode: None,
        },
        Err(message) => TimerResponse {
            ok: false,
            message,
            snapshot,
            completed_mode: None,
        },
    }
}

fn with_notes(f: impl FnOnce(&mut HostNoteStore) -> Result<String, String>) -> NotesResponse {
    let notes = NOTES.get_or_init(|| {
        SqliteBlobStore::open(&config().db_path)
            .map(|port| Mutex::new(NoteStore::load(port)))
            .map_err(|err| format!("note store open failed: {err}"))
    });
    let notes = match notes {
        Ok(notes) => notes,
        Err(message) => return NotesResponse::failure(message.clone()),
    };

    let mut store = lock_recovering(notes);
    let outcome = f(&mut store);
    let (ok, message) = match outcome {
        Ok(message) => (true, message),
        Err(message) => (false, message),
    };
    NotesResponse {
        ok,
        message,
        items: store.notes().iter().map(to_note_item).collect(),
        active_id: store.active_id().map(|id| id.to_string()),
        persistence: store.persistence_status().label(),
    }
}

/// Core state is always consistent between calls, so a poisoned lock is safe to reuse.
fn lock_recovering<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn parse_note_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|err| format!("invalid note id `{raw}`: {err}"))
}

fn to_timer_snapshot(engine: &TimerEngine) -> TimerSnapshot {
    let state = engine.state();
    TimerSnapshot {
        mode: state.mode.as_str().to_string(),
        remaining_secs: state.remaining_secs,
        is_running: state.is_running,
        clock: state.clock(),
        status: state.status_label().to_string(),
        progress: engine.progress(),
    }
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        content: note.content.clone(),
        updated_at: note.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, notes_create, notes_delete, notes_select, notes_update, ping,
        timer_snapshot, timer_switch_mode,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn timer_switch_mode_rejects_unknown_label() {
        let before = timer_snapshot();
        let response = timer_switch_mode("nap".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("unknown timer mode"));
        assert!(response.completed_mode.is_none());
        assert!(before.ok);
    }

    #[test]
    fn timer_snapshot_reports_bounded_progress() {
        let response = timer_snapshot();
        assert!(response.ok);
        assert!((0.0..=1.0).contains(&response.snapshot.progress));
        assert_eq!(response.snapshot.clock.len(), 5);
    }

    #[test]
    fn notes_select_rejects_malformed_id() {
        let response = notes_select("not-a-uuid".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid note id"));
    }

    #[test]
    fn notes_flow_creates_updates_and_deletes() {
        let created = notes_create();
        assert!(created.ok, "{}", created.message);
        let id = created.active_id.clone().expect("create should set active id");

        // Other tests may touch the shared store; select explicitly before editing.
        let selected = notes_select(id.clone());
        assert!(selected.ok, "{}", selected.message);
        let updated = notes_update("Standup\nnotes".to_string());
        assert!(updated.ok, "{}", updated.message);
        let item = updated
            .items
            .iter()
            .find(|item| item.id == id)
            .expect("updated note should be listed");
        assert_eq!(item.title, "Standup");

        let deleted = notes_delete(id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(deleted.items.iter().all(|item| item.id != id));

        let again = notes_delete(id);
        assert!(again.ok);
        assert_eq!(again.message, "Note already absent.");
    }
}
