//! Use-case service layer.
//!
//! # Responsibility
//! - Orchestrate note use-cases over the persistence port.
//!
//! # Invariants
//! - Services remain storage-agnostic; they only see `BlobStore`.

pub mod clock;
pub mod note_store;
