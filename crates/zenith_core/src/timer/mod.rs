//! Focus timer: reactive countdown engine and its scheduler-driven wrapper.

pub mod driver;
pub mod engine;
