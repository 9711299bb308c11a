//! Domain model for the focus timer and note collection.
//!
//! # Responsibility
//! - Define the value types shared by the timer engine and the note store.
//! - Keep derived fields (note title, progress) as pure functions of state.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Timer mode is a closed enumeration; raw strings are parsed at the boundary.

pub mod note;
pub mod timer;
