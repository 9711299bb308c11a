//! Persistence port abstractions and implementations.
//!
//! # Responsibility
//! - Define the blob port contract the note store writes through.
//! - Isolate SQLite details from store orchestration.
//!
//! # Invariants
//! - Port errors are reported to callers, never swallowed here.

pub mod blob_repo;
