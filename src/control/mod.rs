//! Interactive control module
//!
//! This module contains command parsing and the per-session control loop
//! that maps input lines onto clock operations.

pub mod command;
pub mod control_loop;

// Re-export main types
pub use command::{parse_input, Command, ParsedInput};
pub use control_loop::{read_prompt_line, run_session, stdin_lines, InputLines, SessionOutcome};
