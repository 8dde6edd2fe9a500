//! Session clock state machine and its guarded transition operations

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{ClockPhase, TickFrame};
use crate::tasks::countdown_task;

/// Mutable countdown state shared between the control loop and the
/// countdown task. Always accessed through a single mutex so a stop issued
/// concurrently with the completion check cannot produce both outcomes.
#[derive(Debug)]
struct ClockInner {
    remaining_seconds: u64,
    phase: ClockPhase,
    active: bool,
    /// Generation counter bumped by each start. A countdown task may only
    /// mutate state while its captured token still matches, so a task left
    /// over from before a reset/restart can never tick the new run.
    run_token: u64,
}

/// A single focus or break session: owns the remaining duration, the
/// lifecycle phase and the countdown task that decrements once per second.
#[derive(Debug)]
pub struct SessionClock {
    label: String,
    total_seconds: u64,
    inner: Mutex<ClockInner>,
    started_at: Mutex<Option<DateTime<Utc>>>,
    /// Channel for countdown frames consumed by the display and control loop
    frame_tx: watch::Sender<TickFrame>,
    /// Keep one receiver alive to prevent channel closure
    _frame_rx: watch::Receiver<TickFrame>,
}

impl SessionClock {
    /// Create an idle clock with a duration in seconds and a display label
    pub fn new(total_seconds: u64, label: impl Into<String>) -> Self {
        let (frame_tx, frame_rx) = watch::channel(TickFrame::idle(total_seconds));

        Self {
            label: label.into(),
            total_seconds,
            inner: Mutex::new(ClockInner {
                remaining_seconds: total_seconds,
                phase: ClockPhase::Idle,
                active: false,
                run_token: 0,
            }),
            started_at: Mutex::new(None),
            frame_tx,
            _frame_rx: frame_rx,
        }
    }

    /// Create an idle clock from a duration in whole minutes
    pub fn from_minutes(minutes: u64, label: impl Into<String>) -> Self {
        Self::new(minutes * 60, label)
    }

    /// Descriptive name of the session
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Configured duration in seconds
    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    // No clock operation can fail: a poisoned guard only means another
    // holder panicked mid-update, and the triple is still readable.
    fn inner(&self) -> MutexGuard<'_, ClockInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start the countdown. No-op if a countdown is already active.
    pub fn start(self: &Arc<Self>) {
        let run_token = {
            let mut inner = self.inner();
            if inner.active {
                debug!("start ignored, '{}' is already active", self.label);
                return;
            }
            inner.active = true;
            inner.phase = ClockPhase::Running;
            inner.run_token += 1;
            inner.run_token
        };

        if let Ok(mut started_at) = self.started_at.lock() {
            *started_at = Some(Utc::now());
        }

        info!("starting '{}' for {} seconds", self.label, self.total_seconds);
        self.publish_frame();
        tokio::spawn(countdown_task(Arc::clone(self), run_token));
    }

    /// Pause the countdown. Valid only while active and running.
    pub fn pause(&self) {
        {
            let mut inner = self.inner();
            if !inner.active || inner.phase != ClockPhase::Running {
                debug!("pause ignored, '{}' is not running", self.label);
                return;
            }
            inner.phase = ClockPhase::Paused;
        }

        info!("paused '{}'", self.label);
        self.publish_frame();
    }

    /// Resume a paused countdown. Valid only while active and paused.
    pub fn resume(&self) {
        {
            let mut inner = self.inner();
            if !inner.active || inner.phase != ClockPhase::Paused {
                debug!("resume ignored, '{}' is not paused", self.label);
                return;
            }
            inner.phase = ClockPhase::Running;
        }

        info!("resumed '{}'", self.label);
        self.publish_frame();
    }

    /// Stop the countdown. The countdown task observes the cleared active
    /// flag within one sleep interval and exits without completing.
    pub fn stop(&self) {
        {
            let mut inner = self.inner();
            if !inner.active {
                debug!("stop ignored, '{}' is not active", self.label);
                return;
            }
            inner.active = false;
            inner.phase = ClockPhase::Stopped;
        }

        info!("stopped '{}'", self.label);
        self.publish_frame();
    }

    /// Restore the full duration and clear the pause/active flags.
    /// Returns whether the clock had been active so the caller can decide
    /// to restart it. Safe to call from any state.
    pub fn reset(&self) -> bool {
        let was_active = {
            let mut inner = self.inner();
            let was_active = inner.active;
            inner.active = false;
            inner.remaining_seconds = self.total_seconds;
            inner.phase = ClockPhase::Reset;
            was_active
        };

        info!("reset '{}' to {} seconds", self.label, self.total_seconds);
        self.publish_frame();
        was_active
    }

    /// Seconds left on the countdown
    pub fn remaining(&self) -> u64 {
        self.inner().remaining_seconds
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ClockPhase {
        self.inner().phase
    }

    /// Whether a countdown is logically supposed to be running
    pub fn is_active(&self) -> bool {
        self.inner().active
    }

    /// When the current run was started, if it ever was
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at.lock().ok().and_then(|guard| *guard)
    }

    /// Subscribe to countdown frames
    pub fn subscribe(&self) -> watch::Receiver<TickFrame> {
        self.frame_tx.subscribe()
    }

    /// Publish the current state to frame watchers
    pub(crate) fn publish_frame(&self) {
        let frame = {
            let inner = self.inner();
            TickFrame {
                remaining_seconds: inner.remaining_seconds,
                phase: inner.phase,
            }
        };

        if let Err(e) = self.frame_tx.send(frame) {
            warn!("failed to publish clock frame: {}", e);
        }
    }

    /// Countdown loop guard: the phase for this run, or `None` once the
    /// task should exit (stale token, stopped, or remaining time spent).
    pub(crate) fn countdown_phase(&self, run_token: u64) -> Option<ClockPhase> {
        let inner = self.inner();
        if inner.run_token != run_token || !inner.active || inner.remaining_seconds == 0 {
            return None;
        }
        Some(inner.phase)
    }

    /// Consume one elapsed second. The decrement is skipped when a pause,
    /// stop or reset landed during the sleep: remaining time never drains
    /// unless the clock is still running this run.
    pub(crate) fn consume_second(&self, run_token: u64) {
        let mut inner = self.inner();
        if inner.run_token == run_token
            && inner.active
            && inner.phase == ClockPhase::Running
            && inner.remaining_seconds > 0
        {
            inner.remaining_seconds -= 1;
        }
    }

    /// Atomically claim natural completion. Fails if a stop or reset got
    /// there first, so `Stopped` and `Completed` can never both fire.
    pub(crate) fn try_complete(&self, run_token: u64) -> bool {
        let mut inner = self.inner();
        if inner.run_token == run_token && inner.active && inner.remaining_seconds == 0 {
            inner.phase = ClockPhase::Completed;
            inner.active = false;
            true
        } else {
            false
        }
    }
}
