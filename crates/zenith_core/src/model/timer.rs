//! Focus timer value types.
//!
//! # Responsibility
//! - Define timer modes, configured durations and the observable state shape.
//! - Parse host-supplied mode strings before they reach the engine.
//!
//! # Invariants
//! - Configured durations are strictly positive.
//! - `TimerState::remaining_secs` never exceeds the duration of its mode.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Default work session length (25 minutes).
pub const DEFAULT_WORK_SECS: u32 = 25 * 60;
/// Default break session length (5 minutes).
pub const DEFAULT_BREAK_SECS: u32 = 5 * 60;

/// Countdown mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Work,
    Break,
}

impl TimerMode {
    /// Stable lowercase label used at host boundaries.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
        }
    }

    /// The mode a host would typically switch to after this one completes.
    pub fn other(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }
}

impl Display for TimerMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerMode {
    type Err = TimerConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(Self::Work),
            "break" => Ok(Self::Break),
            _ => Err(TimerConfigError::UnknownTimerMode(value.to_string())),
        }
    }
}

/// Validation error for timer configuration and boundary input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerConfigError {
    /// A mode was configured with a zero-second duration.
    ZeroDuration(TimerMode),
    /// A host passed a mode label outside `work|break`.
    UnknownTimerMode(String),
}

impl Display for TimerConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDuration(mode) => write!(f, "{mode} duration must be greater than zero"),
            Self::UnknownTimerMode(value) => {
                write!(f, "unknown timer mode `{value}`; expected work|break")
            }
        }
    }
}

impl Error for TimerConfigError {}

/// Configured countdown length per mode, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerDurations {
    work_secs: u32,
    break_secs: u32,
}

impl TimerDurations {
    /// Builds a validated duration pair.
    ///
    /// # Errors
    /// - Returns `ZeroDuration` when either duration is zero.
    pub fn new(work_secs: u32, break_secs: u32) -> Result<Self, TimerConfigError> {
        if work_secs == 0 {
            return Err(TimerConfigError::ZeroDuration(TimerMode::Work));
        }
        if break_secs == 0 {
            return Err(TimerConfigError::ZeroDuration(TimerMode::Break));
        }
        Ok(Self {
            work_secs,
            break_secs,
        })
    }

    /// Full countdown length for `mode`.
    pub fn for_mode(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_secs,
            TimerMode::Break => self.break_secs,
        }
    }
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self {
            work_secs: DEFAULT_WORK_SECS,
            break_secs: DEFAULT_BREAK_SECS,
        }
    }
}

/// Read-only snapshot of the timer for view layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerState {
    pub mode: TimerMode,
    pub remaining_secs: u32,
    pub is_running: bool,
}

impl TimerState {
    /// `"Running"` or `"Standby"`.
    pub fn status_label(&self) -> &'static str {
        if self.is_running {
            "Running"
        } else {
            "Standby"
        }
    }

    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

/// Formats seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours, so 90 minutes renders as `90:00`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
