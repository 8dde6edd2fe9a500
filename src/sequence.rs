//! Session sequence orchestration
//!
//! Runs the classic full cycle (N work sessions interleaved with short
//! breaks, one long break after the last) or a single custom session, one
//! clock at a time.

use std::sync::Arc;

use chrono::Utc;
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::CyclePlan;
use crate::control::{read_prompt_line, run_session, SessionOutcome};
use crate::display::render_task;
use crate::state::SessionClock;

/// Run one clock to its outcome with a live display panel
async fn drive_clock<R>(
    clock: Arc<SessionClock>,
    lines: &mut Lines<R>,
    shutdown: &mut watch::Receiver<bool>,
) -> SessionOutcome
where
    R: AsyncBufRead + Unpin,
{
    let renderer = tokio::spawn(render_task(clock.label().to_string(), clock.subscribe()));
    let outcome = run_session(&clock, lines, shutdown).await;

    // On completion the renderer drains the final frame and exits on its
    // own; on quit/interrupt there is no final frame to wait for.
    if outcome == SessionOutcome::Completed {
        let _ = renderer.await;
    } else {
        renderer.abort();
    }

    outcome
}

/// Run the full configured cycle. Returns how many work sessions
/// completed naturally.
pub async fn run_full_cycle<R>(
    plan: &CyclePlan,
    lines: &mut Lines<R>,
    shutdown: &mut watch::Receiver<bool>,
) -> u32
where
    R: AsyncBufRead + Unpin,
{
    let started_at = Utc::now();
    let mut completed_sessions = 0;

    println!("\n=== STARTING FOCUS CYCLE ===");

    for session_number in 1..=plan.sessions {
        println!("\n🎯 Session {} of {}", session_number, plan.sessions);
        let clock = Arc::new(SessionClock::from_minutes(plan.work_minutes, "Focus"));

        match drive_clock(clock, lines, shutdown).await {
            SessionOutcome::Completed => completed_sessions += 1,
            outcome => {
                report_interruption(outcome, completed_sessions);
                return completed_sessions;
            }
        }

        let (break_minutes, break_label) = if session_number < plan.sessions {
            println!(
                "\n☕ Short break ({}/{} completed)",
                completed_sessions, plan.sessions
            );
            (plan.short_break_minutes, "Short Break")
        } else {
            println!("\n🎉 All sessions completed! Long break");
            (plan.long_break_minutes, "Long Break")
        };

        let clock = Arc::new(SessionClock::from_minutes(break_minutes, break_label));
        match drive_clock(clock, lines, shutdown).await {
            SessionOutcome::Completed => {}
            outcome => {
                report_interruption(outcome, completed_sessions);
                return completed_sessions;
            }
        }
    }

    println!("\n=== FOCUS CYCLE FINISHED ===");
    info!(
        "cycle finished: {}/{} sessions completed (started {})",
        completed_sessions, plan.sessions, started_at
    );
    completed_sessions
}

fn report_interruption(outcome: SessionOutcome, completed_sessions: u32) {
    println!("\nCycle interrupted by the user.");
    info!(
        "cycle ended early ({:?}) after {} completed sessions",
        outcome, completed_sessions
    );
}

/// Prompt for a custom duration and label, then run that one session.
/// Returns `None` when setup was aborted by invalid input, interrupt or
/// end of input.
pub async fn run_single_session<R>(
    lines: &mut Lines<R>,
    shutdown: &mut watch::Receiver<bool>,
) -> Option<SessionOutcome>
where
    R: AsyncBufRead + Unpin,
{
    let duration = read_prompt_line("Duration in minutes: ", lines, shutdown).await?;
    let minutes: u64 = match duration.trim().parse() {
        Ok(minutes) => minutes,
        Err(_) => {
            warn!("invalid duration input: {:?}", duration.trim());
            println!("Please enter a valid whole number of minutes.");
            return None;
        }
    };

    let label = read_prompt_line("Session name: ", lines, shutdown).await?;
    let label = if label.trim().is_empty() {
        "Session".to_string()
    } else {
        label.trim().to_string()
    };

    let clock = Arc::new(SessionClock::from_minutes(minutes, label));
    Some(drive_clock(clock, lines, shutdown).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    fn pending_input() -> (
        tokio::io::DuplexStream,
        Lines<BufReader<tokio::io::DuplexStream>>,
    ) {
        let (client, server) = tokio::io::duplex(64);
        (client, BufReader::new(server).lines())
    }

    fn zero_plan(sessions: u32) -> CyclePlan {
        CyclePlan {
            work_minutes: 0,
            short_break_minutes: 0,
            long_break_minutes: 0,
            sessions,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_length_cycle_completes_without_input() {
        let (_client, mut lines) = pending_input();
        let (_tx, mut shutdown) = watch::channel(false);

        let completed = run_full_cycle(&zero_plan(2), &mut lines, &mut shutdown).await;
        assert_eq!(completed, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_duration_aborts_single_session_setup() {
        let mut lines = BufReader::new(&b"twenty\n"[..]).lines();
        let (_tx, mut shutdown) = watch::channel(false);

        let outcome = run_single_session(&mut lines, &mut shutdown).await;
        assert!(outcome.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_single_session_completes() {
        let (mut client, server) = tokio::io::duplex(64);
        let mut lines = BufReader::new(server).lines();
        let (_tx, mut shutdown) = watch::channel(false);

        client.write_all(b"0\nQuick\n").await.unwrap();

        let outcome = run_single_session(&mut lines, &mut shutdown).await;
        assert_eq!(outcome, Some(SessionOutcome::Completed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_during_setup_aborts_quietly() {
        let (_client, mut lines) = pending_input();
        let (tx, mut shutdown) = watch::channel(false);
        tx.send(true).expect("receiver is held");

        let outcome = run_single_session(&mut lines, &mut shutdown).await;
        assert!(outcome.is_none());
    }
}
