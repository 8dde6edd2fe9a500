//! Clock lifecycle phases and the tick snapshot published to observers

use std::fmt;

/// Lifecycle phase of a session clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPhase {
    /// Constructed but never started
    Idle,
    /// Counting down
    Running,
    /// Countdown halted but resumable
    Paused,
    /// Manually stopped before reaching zero
    Stopped,
    /// Reached zero naturally
    Completed,
    /// Restored to the full duration, restartable
    Reset,
}

impl ClockPhase {
    /// Check if the clock finished on its own
    pub fn is_completed(&self) -> bool {
        matches!(self, ClockPhase::Completed)
    }
}

impl fmt::Display for ClockPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClockPhase::Idle => "Idle",
            ClockPhase::Running => "Running",
            ClockPhase::Paused => "Paused",
            ClockPhase::Stopped => "Stopped",
            ClockPhase::Completed => "Completed",
            ClockPhase::Reset => "Reset",
        };
        write!(f, "{}", name)
    }
}

/// Snapshot of the countdown published on every state change and tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickFrame {
    pub remaining_seconds: u64,
    pub phase: ClockPhase,
}

impl TickFrame {
    /// Create a frame for a clock that has not started yet
    pub fn idle(total_seconds: u64) -> Self {
        Self {
            remaining_seconds: total_seconds,
            phase: ClockPhase::Idle,
        }
    }
}
