//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `zenith_core` linkage.
//! - Print the configured timer and an in-memory note round trip.

use zenith_core::{MemoryBlobStore, NoteStore, TimerEngine, ZenithConfig};

fn main() {
    println!("zenith_core ping={}", zenith_core::ping());
    println!("zenith_core version={}", zenith_core::core_version());

    let config = match ZenithConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("zenith_core config error: {err}");
            std::process::exit(2);
        }
    };

    let timer = TimerEngine::new(config.durations);
    let state = timer.state();
    println!(
        "timer mode={} clock={} status={}",
        state.mode,
        state.clock(),
        state.status_label()
    );

    let mut notes = NoteStore::load(MemoryBlobStore::new());
    notes.create();
    let title = match notes.update("Smoke check\nfrom zenith_cli") {
        Ok(()) => notes.active_note().map(|note| note.title.clone()),
        Err(err) => {
            eprintln!("note update failed: {err}");
            None
        }
    };
    println!(
        "notes count={} active_title={} persistence={}",
        notes.notes().len(),
        title.unwrap_or_default(),
        notes.persistence_status().label()
    );
}
