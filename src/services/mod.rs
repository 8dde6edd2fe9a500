//! Completion notification module
//!
//! This module contains the audible/visual cue emitted when a session
//! completes naturally.

pub mod notify;

// Re-export main functions
pub use notify::completion_cue;
