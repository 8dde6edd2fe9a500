//! Completion cue played when a session reaches zero

use std::io::Write;
use std::path::Path;

use tokio::process::Command;
use tracing::{debug, info};

/// System sounds tried in order, with the player that understands them
#[cfg(target_os = "macos")]
const SOUND_CANDIDATES: &[(&str, &str)] = &[
    ("afplay", "/System/Library/Sounds/Glass.aiff"),
    ("afplay", "/System/Library/Sounds/Ping.aiff"),
];

#[cfg(not(target_os = "macos"))]
const SOUND_CANDIDATES: &[(&str, &str)] = &[
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("paplay", "/usr/share/sounds/alsa/Front_Left.wav"),
    ("aplay", "/usr/share/sounds/alsa/Front_Left.wav"),
];

/// Emit the audible completion cue: a system sound when one is available,
/// always followed by the terminal bell as the portable fallback.
pub async fn completion_cue() {
    if let Err(e) = play_system_sound().await {
        debug!("system sound unavailable: {}", e);
    }

    print!("\x07");
    let _ = std::io::stdout().flush();
}

async fn play_system_sound() -> Result<(), String> {
    for (player, sound) in SOUND_CANDIDATES {
        if !Path::new(sound).exists() {
            continue;
        }

        match Command::new(player).arg(sound).output().await {
            Ok(output) if output.status.success() => {
                info!("played completion sound with {}", player);
                return Ok(());
            }
            Ok(output) => {
                debug!("{} exited with {}", player, output.status);
            }
            Err(e) => {
                debug!("failed to execute {}: {}", player, e);
            }
        }
    }

    Err("no playable completion sound found".to_string())
}
