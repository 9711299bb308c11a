//! Host-facing timer driver with an injected tick scheduler.
//!
//! # Responsibility
//! - Keep the host's 1 Hz tick source armed exactly while the engine runs.
//! - Forward session-complete events to an optional notification sink.
//!
//! # Invariants
//! - After every call the scheduler is armed iff `engine.is_running()`.
//! - The engine stays free of timers; only `on_tick()` advances it.

use crate::model::timer::{TimerMode, TimerState};
use crate::timer::engine::{SessionComplete, TimerEngine};

/// External 1 Hz tick source owned by the host.
///
/// Implementations typically wrap an interval timer and call
/// `TimerDriver::on_tick` from it.
pub trait TickScheduler {
    /// Begins delivering ticks.
    fn arm(&mut self);
    /// Stops delivering ticks.
    fn disarm(&mut self);
}

/// Receiver for session-complete notifications.
pub trait CompletionSink {
    fn session_complete(&mut self, event: SessionComplete);
}

impl<F> CompletionSink for F
where
    F: FnMut(SessionComplete),
{
    fn session_complete(&mut self, event: SessionComplete) {
        self(event)
    }
}

/// Couples a `TimerEngine` with the scheduler that feeds it.
pub struct TimerDriver<S: TickScheduler> {
    engine: TimerEngine,
    scheduler: S,
    sink: Option<Box<dyn CompletionSink>>,
    armed: bool,
}

impl<S: TickScheduler> TimerDriver<S> {
    /// Wraps an engine. The scheduler is armed if the engine already runs.
    pub fn new(engine: TimerEngine, mut scheduler: S) -> Self {
        let armed = engine.is_running();
        if armed {
            scheduler.arm();
        }
        Self {
            engine,
            scheduler,
            sink: None,
            armed,
        }
    }

    /// Installs the notification sink, replacing any previous one.
    pub fn with_sink(mut self, sink: impl CompletionSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn start(&mut self) {
        self.engine.start();
        self.sync_scheduler();
    }

    pub fn pause(&mut self) {
        self.engine.pause();
        self.sync_scheduler();
    }

    pub fn toggle(&mut self) {
        self.engine.toggle();
        self.sync_scheduler();
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.sync_scheduler();
    }

    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.engine.switch_mode(mode);
        self.sync_scheduler();
    }

    /// Called by the scheduler once per elapsed second.
    pub fn on_tick(&mut self) -> Option<SessionComplete> {
        let completed = self.engine.tick();
        self.sync_scheduler();
        if let (Some(event), Some(sink)) = (completed, self.sink.as_mut()) {
            sink.session_complete(event);
        }
        completed
    }

    pub fn state(&self) -> TimerState {
        self.engine.state()
    }

    pub fn progress(&self) -> f64 {
        self.engine.progress()
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn sync_scheduler(&mut self) {
        match (self.engine.is_running(), self.armed) {
            (true, false) => {
                self.scheduler.arm();
                self.armed = true;
            }
            (false, true) => {
                self.scheduler.disarm();
                self.armed = false;
            }
            _ => {}
        }
    }
}
