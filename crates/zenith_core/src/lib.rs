//! Core domain logic for Zenith.
//! This crate is the single source of truth for timer and note invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod timer;

pub use config::{ConfigError, ZenithConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{derive_title, Note, NoteId, NEW_NOTE_TITLE, UNTITLED_NOTE_TITLE};
pub use model::timer::{format_clock, TimerConfigError, TimerDurations, TimerMode, TimerState};
pub use repo::blob_repo::{
    BlobStore, MemoryBlobStore, RepoError, RepoResult, SqliteBlobStore, NOTES_BLOB_KEY,
};
pub use service::clock::{Clock, SystemClock};
pub use service::note_store::{LoadStatus, NoteStore, NoteStoreError, PersistenceStatus};
pub use timer::driver::{CompletionSink, TickScheduler, TimerDriver};
pub use timer::engine::{SessionComplete, TimerEngine};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
