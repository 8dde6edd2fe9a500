//! Countdown background task

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::state::{ClockPhase, SessionClock};

/// One second per tick while running
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Short poll while paused so a stop or resume is observed promptly
/// without consuming countdown time
pub const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Background task that decrements a session clock once per second while it
/// is running. Spawned by `SessionClock::start` with the run token of that
/// start; every mutation re-checks the token under the clock's lock, so a
/// task that outlived a stop, reset or restart exits without ticking.
pub async fn countdown_task(clock: Arc<SessionClock>, run_token: u64) {
    debug!("countdown task started for '{}'", clock.label());

    loop {
        let Some(phase) = clock.countdown_phase(run_token) else {
            break;
        };

        match phase {
            ClockPhase::Running => {
                clock.publish_frame();
                sleep(TICK_INTERVAL).await;
                clock.consume_second(run_token);
            }
            ClockPhase::Paused => {
                sleep(PAUSE_POLL_INTERVAL).await;
            }
            _ => break,
        }
    }

    // The claim fails when a stop or reset won the race, in which case no
    // completion frame is published.
    if clock.try_complete(run_token) {
        clock.publish_frame();
        info!("'{}' completed", clock.label());
    } else {
        debug!("countdown task for '{}' exited without completing", clock.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, Duration};

    fn started_clock(total_seconds: u64) -> Arc<SessionClock> {
        let clock = Arc::new(SessionClock::new(total_seconds, "Test"));
        clock.start();
        clock
    }

    /// Let spawned tasks run, then move virtual time forward in small
    /// steps so every sleep deadline fires in order.
    async fn run_for(duration: Duration) {
        let mut elapsed = Duration::ZERO;
        while elapsed < duration {
            let step = Duration::from_millis(50);
            advance(step).await;
            elapsed += step;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_second_clock_runs_to_completion() {
        let clock = started_clock(3);
        run_for(Duration::from_millis(3100)).await;

        assert_eq!(clock.phase(), ClockPhase::Completed);
        assert_eq!(clock.remaining(), 0);
        assert!(!clock.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_clock_completes_immediately() {
        let clock = started_clock(0);
        run_for(Duration::from_millis(100)).await;

        assert_eq!(clock.phase(), ClockPhase::Completed);
        assert_eq!(clock.remaining(), 0);
        assert!(!clock.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_frame_is_published_once() {
        let clock = started_clock(2);
        let mut rx = clock.subscribe();
        run_for(Duration::from_millis(2500)).await;

        let mut completed_frames = 0;
        while rx.has_changed().unwrap_or(false) {
            let frame = rx.borrow_and_update().clone();
            if frame.phase == ClockPhase::Completed {
                completed_frames += 1;
            }
        }
        // The final 00:00 frame is the only Completed one.
        assert_eq!(clock.phase(), ClockPhase::Completed);
        assert_eq!(completed_frames, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_freezes_remaining_time() {
        let clock = started_clock(10);

        run_for(Duration::from_millis(2050)).await;
        clock.pause();
        assert_eq!(clock.remaining(), 8);

        run_for(Duration::from_secs(5)).await;
        assert_eq!(clock.remaining(), 8);
        assert_eq!(clock.phase(), ClockPhase::Paused);

        clock.resume();
        run_for(Duration::from_millis(3300)).await;
        assert_eq!(clock.remaining(), 5);
        assert_eq!(clock.phase(), ClockPhase::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_pause_resume_leaves_remaining_unchanged() {
        let clock = started_clock(10);
        run_for(Duration::from_millis(1050)).await;

        let before = clock.remaining();
        clock.pause();
        clock.resume();
        assert_eq!(clock.remaining(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_decrementing_for_good() {
        let clock = started_clock(10);
        run_for(Duration::from_millis(2050)).await;

        clock.stop();
        let frozen = clock.remaining();
        assert_eq!(clock.phase(), ClockPhase::Stopped);

        run_for(Duration::from_secs(15)).await;
        assert_eq!(clock.remaining(), frozen);
        assert_eq!(clock.phase(), ClockPhase::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_does_not_double_decrement() {
        let clock = started_clock(10);
        clock.start();
        clock.start();

        run_for(Duration::from_millis(3300)).await;
        assert_eq!(clock.remaining(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_and_restart_runs_a_fresh_countdown() {
        let clock = started_clock(10);
        run_for(Duration::from_millis(2050)).await;

        assert!(clock.reset());
        assert_eq!(clock.remaining(), 10);
        assert_eq!(clock.phase(), ClockPhase::Reset);

        clock.start();
        run_for(Duration::from_millis(2300)).await;
        // Only the fresh countdown may tick; the stale one must not.
        assert_eq!(clock.remaining(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_while_paused_exits_within_poll_interval() {
        let clock = started_clock(10);
        run_for(Duration::from_millis(1050)).await;

        clock.pause();
        run_for(Duration::from_secs(1)).await;
        clock.stop();
        run_for(Duration::from_millis(200)).await;

        assert_eq!(clock.phase(), ClockPhase::Stopped);
        assert!(!clock.is_active());
    }
}
