//! Work/break countdown state machine.
//!
//! # Responsibility
//! - Own countdown mode, remaining seconds and running flag.
//! - Advance by exactly one second per `tick()` and report completion.
//!
//! # Invariants
//! - `remaining_secs` stays within `0..=duration(mode)`.
//! - `tick()` is a no-op while in standby.
//! - Completion fires once per drain to zero and always lands in standby.
//! - The engine never switches mode on its own.

use crate::model::timer::{TimerDurations, TimerMode, TimerState};
use log::{debug, info};

/// Discrete "session complete" signal emitted by `TimerEngine::tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionComplete {
    /// Mode whose countdown just reached zero.
    pub mode: TimerMode,
}

impl SessionComplete {
    /// Host-facing notification text for the finished mode.
    pub fn message(&self) -> &'static str {
        match self.mode {
            TimerMode::Work => "Time to take a break!",
            TimerMode::Break => "Break over! Back to work.",
        }
    }

    /// Suggested next mode. Applying it is host policy.
    pub fn next_mode(&self) -> TimerMode {
        self.mode.other()
    }
}

/// Countdown engine driven by external `tick()` calls.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    durations: TimerDurations,
    mode: TimerMode,
    remaining_secs: u32,
    is_running: bool,
}

impl TimerEngine {
    /// Creates an engine in standby, work mode, full duration.
    pub fn new(durations: TimerDurations) -> Self {
        Self {
            durations,
            mode: TimerMode::Work,
            remaining_secs: durations.for_mode(TimerMode::Work),
            is_running: false,
        }
    }

    /// Enters running state. No-op when already running.
    pub fn start(&mut self) {
        if self.is_running {
            return;
        }
        self.is_running = true;
        info!(
            "event=timer_start module=timer status=ok mode={} remaining_secs={}",
            self.mode, self.remaining_secs
        );
    }

    /// Enters standby without touching progress. No-op when already paused.
    pub fn pause(&mut self) {
        if !self.is_running {
            return;
        }
        self.is_running = false;
        info!(
            "event=timer_pause module=timer status=ok mode={} remaining_secs={}",
            self.mode, self.remaining_secs
        );
    }

    /// Starts when in standby, pauses when running.
    pub fn toggle(&mut self) {
        if self.is_running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Restores the full duration of the current mode and enters standby.
    pub fn reset(&mut self) {
        self.is_running = false;
        self.remaining_secs = self.full_duration();
        info!(
            "event=timer_reset module=timer status=ok mode={}",
            self.mode
        );
    }

    /// Switches mode, restoring its full duration in standby.
    ///
    /// Progress in the previous mode is discarded, even for the same mode.
    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.is_running = false;
        self.remaining_secs = self.full_duration();
        info!(
            "event=timer_switch_mode module=timer status=ok mode={}",
            self.mode
        );
    }

    /// Advances one elapsed second.
    ///
    /// Returns `Some(SessionComplete)` exactly when this tick drains the
    /// countdown (or finds it already drained while running) and stops it.
    pub fn tick(&mut self) -> Option<SessionComplete> {
        if !self.is_running {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            debug!(
                "event=timer_tick module=timer mode={} remaining_secs={}",
                self.mode, self.remaining_secs
            );
            return None;
        }

        self.is_running = false;
        info!(
            "event=timer_complete module=timer status=ok mode={}",
            self.mode
        );
        Some(SessionComplete { mode: self.mode })
    }

    /// Elapsed share of the current mode, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let full = f64::from(self.full_duration());
        (full - f64::from(self.remaining_secs)) / full
    }

    /// Current snapshot for display.
    pub fn state(&self) -> TimerState {
        TimerState {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            is_running: self.is_running,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn durations(&self) -> TimerDurations {
        self.durations
    }

    fn full_duration(&self) -> u32 {
        self.durations.for_mode(self.mode)
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerDurations::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionComplete, TimerEngine};
    use crate::model::timer::{TimerDurations, TimerMode};

    fn short_engine() -> TimerEngine {
        TimerEngine::new(TimerDurations::new(3, 2).unwrap())
    }

    #[test]
    fn new_engine_is_standby_work_full() {
        let engine = TimerEngine::default();
        let state = engine.state();
        assert_eq!(state.mode, TimerMode::Work);
        assert_eq!(state.remaining_secs, 1500);
        assert!(!state.is_running);
        assert_eq!(engine.progress(), 0.0);
    }

    #[test]
    fn tick_is_noop_in_standby() {
        let mut engine = short_engine();
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.remaining_secs(), 3);
    }

    #[test]
    fn ticks_drain_and_complete_once() {
        let mut engine = short_engine();
        engine.start();

        let mut previous = engine.remaining_secs();
        let mut completions = Vec::new();
        for _ in 0..10 {
            if let Some(done) = engine.tick() {
                completions.push(done);
            }
            assert!(engine.remaining_secs() <= previous);
            previous = engine.remaining_secs();
        }

        assert_eq!(
            completions,
            vec![SessionComplete {
                mode: TimerMode::Work
            }]
        );
        assert_eq!(engine.remaining_secs(), 0);
        assert!(!engine.is_running());
        assert_eq!(engine.progress(), 1.0);
    }

    #[test]
    fn restarting_a_drained_timer_completes_on_next_tick() {
        let mut engine = TimerEngine::new(TimerDurations::new(1, 1).unwrap());
        engine.start();
        assert!(engine.tick().is_some());

        engine.start();
        assert_eq!(
            engine.tick(),
            Some(SessionComplete {
                mode: TimerMode::Work
            })
        );
        assert_eq!(engine.remaining_secs(), 0);
    }

    #[test]
    fn pause_keeps_progress_and_start_is_idempotent() {
        let mut engine = short_engine();
        engine.start();
        engine.start();
        engine.tick();
        engine.pause();
        engine.pause();
        assert_eq!(engine.remaining_secs(), 2);
        assert!(!engine.is_running());
        assert!((engine.progress() - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn toggle_flips_running_state() {
        let mut engine = short_engine();
        engine.toggle();
        assert!(engine.is_running());
        engine.toggle();
        assert!(!engine.is_running());
    }

    #[test]
    fn reset_restores_full_duration_of_current_mode() {
        let mut engine = short_engine();
        engine.switch_mode(TimerMode::Break);
        engine.start();
        engine.tick();
        engine.reset();
        assert_eq!(engine.mode(), TimerMode::Break);
        assert_eq!(engine.remaining_secs(), 2);
        assert!(!engine.is_running());
    }

    #[test]
    fn switch_mode_always_lands_in_standby_with_full_duration() {
        for target in [TimerMode::Work, TimerMode::Break] {
            let mut engine = short_engine();
            engine.start();
            engine.tick();
            engine.switch_mode(target);
            let state = engine.state();
            assert_eq!(state.mode, target);
            assert_eq!(
                state.remaining_secs,
                engine.durations().for_mode(target)
            );
            assert!(!state.is_running);
        }
    }

    #[test]
    fn completion_message_depends_on_finished_mode() {
        let work = SessionComplete {
            mode: TimerMode::Work,
        };
        let rest = SessionComplete {
            mode: TimerMode::Break,
        };
        assert_eq!(work.message(), "Time to take a break!");
        assert_eq!(work.next_mode(), TimerMode::Break);
        assert_eq!(rest.message(), "Break over! Back to work.");
        assert_eq!(rest.next_mode(), TimerMode::Work);
    }
}
