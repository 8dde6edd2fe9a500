//! Interactive session control loop

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info};

use super::command::{parse_input, Command, ParsedInput};
use crate::services::completion_cue;
use crate::state::SessionClock;

/// How long the completion message stays on screen before the next session
const COMPLETION_LINGER: Duration = Duration::from_secs(2);

/// How one session ended, so the outer sequence can decide whether to
/// continue with the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The countdown reached zero on its own
    Completed,
    /// The user quit the session and the whole run
    Quit,
    /// An interrupt signal stopped the session
    Interrupted,
}

/// Line reader shared by the startup menu, setup prompts and sessions
pub type InputLines = Lines<BufReader<Stdin>>;

/// Create the stdin line reader used for all interactive input
pub fn stdin_lines() -> InputLines {
    BufReader::new(tokio::io::stdin()).lines()
}

fn print_flushed(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}

/// Read one prompt line, honoring the shutdown flag. Returns `None` on
/// interrupt or end of input.
pub async fn read_prompt_line<R>(
    prompt: &str,
    lines: &mut Lines<R>,
    shutdown: &mut watch::Receiver<bool>,
) -> Option<String>
where
    R: AsyncBufRead + Unpin,
{
    if *shutdown.borrow() {
        return None;
    }

    print_flushed(prompt);

    tokio::select! {
        line = lines.next_line() => line.ok().flatten(),
        _ = shutdown.changed() => None,
    }
}

/// Drive one session: start the clock, then react to command lines,
/// countdown frames and the shutdown flag until the session ends.
pub async fn run_session<R>(
    clock: &Arc<SessionClock>,
    lines: &mut Lines<R>,
    shutdown: &mut watch::Receiver<bool>,
) -> SessionOutcome
where
    R: AsyncBufRead + Unpin,
{
    if *shutdown.borrow() {
        return SessionOutcome::Interrupted;
    }

    let mut frames = clock.subscribe();
    clock.start();
    print_flushed("\nCommand [p/r/s/x/q]: ");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(raw)) => {
                        match parse_input(&raw) {
                            ParsedInput::Command(command) => {
                                if apply_command(clock, command) {
                                    return SessionOutcome::Quit;
                                }
                            }
                            ParsedInput::Empty => {}
                            ParsedInput::Unknown(other) => {
                                debug!("unrecognized command: {:?}", other);
                                println!("Invalid command. Use: p, r, s, x, q");
                            }
                        }

                        // The completion check mirrors the frame branch for
                        // commands issued right as the countdown ends.
                        if !clock.is_active() && clock.phase().is_completed() {
                            return finish_completed(clock).await;
                        }
                        print_flushed("\nCommand [p/r/s/x/q]: ");
                    }
                    Ok(None) | Err(_) => {
                        debug!("input closed, quitting session");
                        clock.stop();
                        return SessionOutcome::Quit;
                    }
                }
            }
            changed = frames.changed() => {
                if changed.is_err() {
                    clock.stop();
                    return SessionOutcome::Quit;
                }
                let completed = frames.borrow_and_update().phase.is_completed();
                if completed {
                    return finish_completed(clock).await;
                }
            }
            _ = shutdown.changed() => {
                println!("\nInterrupt received. Stopping the session...");
                clock.stop();
                return SessionOutcome::Interrupted;
            }
        }
    }
}

/// Apply one recognized command to the clock. Returns true on quit.
fn apply_command(clock: &Arc<SessionClock>, command: Command) -> bool {
    match command {
        Command::Pause => clock.pause(),
        Command::Resume => clock.resume(),
        Command::Stop => clock.stop(),
        Command::Reset => {
            // Restart only when the reset interrupted a live countdown
            if clock.reset() {
                clock.start();
            }
        }
        Command::Quit => {
            clock.stop();
            return true;
        }
    }
    false
}

async fn finish_completed(clock: &Arc<SessionClock>) -> SessionOutcome {
    completion_cue().await;
    println!("\n{} completed!", clock.label());
    if let Some(started_at) = clock.started_at() {
        info!("'{}' completed (started {})", clock.label(), started_at);
    }
    sleep(COMPLETION_LINGER).await;
    SessionOutcome::Completed
}
