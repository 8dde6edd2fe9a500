//! Status panel rendering
//!
//! The render task subscribes to a clock's frames and redraws a bordered
//! status panel on every tick. The screen is cleared and rewritten each
//! time; this is a display convention, not a performance-critical path.

use std::io::Write;

use tokio::sync::watch;
use tracing::debug;

use crate::state::TickFrame;

const PANEL_WIDTH: usize = 40;

/// Format remaining seconds as `MM:SS`
pub fn format_clock(remaining_seconds: u64) -> String {
    let minutes = remaining_seconds / 60;
    let seconds = remaining_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Build the bordered status panel for one frame
pub fn render_panel(label: &str, frame: &TickFrame) -> String {
    let border = "#".repeat(PANEL_WIDTH);
    let divider = format!("#{}#", "-".repeat(PANEL_WIDTH - 2));
    let title = format!("{} {}", label, format_clock(frame.remaining_seconds));

    let mut panel = String::new();
    panel.push_str(&border);
    panel.push('\n');
    panel.push_str(&format!("# {:^36} #\n", title));
    panel.push_str(&format!("# State: {:<29} #\n", frame.phase.to_string()));
    panel.push_str(&divider);
    panel.push('\n');
    panel.push_str(&format!("# {:<36} #\n", "[p] Pause     [r] Resume"));
    panel.push_str(&format!("# {:<36} #\n", "[s] Stop      [x] Reset"));
    panel.push_str(&format!("# {:<36} #\n", "[q] Quit"));
    panel.push_str(&border);
    panel.push('\n');
    panel
}

fn draw(label: &str, frame: &TickFrame) {
    let mut stdout = std::io::stdout();
    // Clear and home before redrawing the panel
    let _ = write!(stdout, "\x1B[2J\x1B[1;1H{}", render_panel(label, frame));
    let _ = stdout.flush();
}

/// Render task: redraw the panel on every published frame. Exits on the
/// final completion frame or when the clock goes away. A stopped frame is
/// drawn but keeps the task watching, since a reset may restart the clock.
pub async fn render_task(label: String, mut frames: watch::Receiver<TickFrame>) {
    loop {
        let frame = frames.borrow_and_update().clone();
        draw(&label, &frame);

        if frame.phase.is_completed() {
            break;
        }
        if frames.changed().await.is_err() {
            break;
        }
    }

    debug!("render task for '{}' finished", label);
}
