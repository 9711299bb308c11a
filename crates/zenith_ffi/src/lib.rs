//! Host bridge for Zenith core.
//!
//! Exposes sync, panic-free use-case calls; all domain rules live in `zenith_core`.

pub mod api;
