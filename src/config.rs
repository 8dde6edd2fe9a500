//! Configuration and CLI argument handling

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "focus-clock")]
#[command(about = "An interactive terminal focus/break session clock")]
#[command(version = "1.2.0")]
pub struct Config {
    /// Work session duration in minutes
    #[arg(short, long, default_value = "25")]
    pub work: u64,

    /// Short break duration in minutes
    #[arg(short = 'b', long, default_value = "5")]
    pub short_break: u64,

    /// Long break duration in minutes
    #[arg(short = 'B', long, default_value = "15")]
    pub long_break: u64,

    /// Number of work sessions in a full cycle
    #[arg(short, long, default_value = "4")]
    pub sessions: u32,

    /// JSON cycle plan file overriding the duration flags
    #[arg(short, long)]
    pub plan: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }

    /// Resolve the cycle plan: the plan file when one was given, otherwise
    /// the duration flags
    pub fn cycle_plan(&self) -> Result<CyclePlan, String> {
        match &self.plan {
            Some(path) => CyclePlan::load(path),
            None => Ok(CyclePlan {
                work_minutes: self.work,
                short_break_minutes: self.short_break,
                long_break_minutes: self.long_break,
                sessions: self.sessions,
            }),
        }
    }
}

/// Durations of a full work/break cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CyclePlan {
    pub work_minutes: u64,
    pub short_break_minutes: u64,
    pub long_break_minutes: u64,
    pub sessions: u32,
}

impl CyclePlan {
    /// Load a cycle plan from a JSON file
    pub fn load(path: &PathBuf) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read plan file {}: {}", path.display(), e))?;

        serde_json::from_str(&content)
            .map_err(|e| format!("Invalid plan file {}: {}", path.display(), e))
    }
}

impl Default for CyclePlan {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            sessions: 4,
        }
    }
}
