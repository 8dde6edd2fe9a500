//! State management module
//!
//! This module contains the session clock state machine and the snapshot
//! types it publishes to observers.

pub mod clock;
pub mod phase;

// Re-export main types
pub use clock::SessionClock;
pub use phase::{ClockPhase, TickFrame};
