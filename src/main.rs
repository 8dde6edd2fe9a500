//! Focus Clock - an interactive terminal focus/break session clock
//!
//! This is the main entry point for the focus-clock application.

use tracing::info;

use focus_clock::{
    config::Config,
    control::{read_prompt_line, stdin_lines},
    sequence::{run_full_cycle, run_single_session},
    utils::spawn_shutdown_flag,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so they do not corrupt the status panel
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_clock={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting focus-clock v1.2.0");

    let plan = match config.cycle_plan() {
        Ok(plan) => plan,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Plan: work={}min, short break={}min, long break={}min, sessions={}",
        plan.work_minutes, plan.short_break_minutes, plan.long_break_minutes, plan.sessions
    );

    let mut shutdown = spawn_shutdown_flag();
    let mut lines = stdin_lines();

    println!("Focus Clock");
    println!("1. Full cycle ({} sessions)", plan.sessions);
    println!("2. Single session");

    let choice = read_prompt_line("Select option (1/2): ", &mut lines, &mut shutdown).await;

    match choice.as_deref().map(str::trim) {
        Some("2") => {
            run_single_session(&mut lines, &mut shutdown).await;
        }
        Some(_) => {
            run_full_cycle(&plan, &mut lines, &mut shutdown).await;
        }
        // Interrupt or end of input before a session began
        None => {}
    }

    println!("\nGoodbye! 👋");
    Ok(())
}
