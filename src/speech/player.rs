//! External media player invocation
//!
//! The player executable is located by probing a short ordered list of
//! well-known install paths, then `PATH`. A missing player is not an error:
//! the response is silently not spoken.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tokio::time::timeout;

use crate::config::SpeechConfig;
use crate::{Error, Result};

/// Locate a media player: fixed candidates first, then `PATH`
#[must_use]
pub fn find_player(config: &SpeechConfig) -> Option<PathBuf> {
    for candidate in &config.player_paths {
        if candidate.is_file() {
            return Some(candidate.clone());
        }
    }

    config
        .player_names
        .iter()
        .find_map(|name| which::which(name).ok())
}

/// Play-and-exit flags, no visible UI, per player family
fn player_args(player: &Path) -> Vec<&'static str> {
    let stem = player
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match stem.as_str() {
        "mpv" => vec!["--no-video", "--really-quiet"],
        "ffplay" => vec!["-nodisp", "-autoexit", "-loglevel", "quiet"],
        // vlc / cvlc
        _ => vec!["--play-and-exit", "--intf", "dummy"],
    }
}

/// Play the artifact through the external player, waiting for it to exit
///
/// A missing player logs and resolves as a no-op success.
///
/// # Errors
///
/// Returns error if the player cannot be spawned, exits unsuccessfully, or
/// exceeds the playback timeout
pub async fn play(artifact: &Path, config: &SpeechConfig) -> Result<()> {
    let Some(player) = find_player(config) else {
        tracing::warn!("no media player found, response will not be spoken");
        return Ok(());
    };

    let args = player_args(&player);
    tracing::debug!(player = %player.display(), artifact = %artifact.display(), "playing artifact");

    let mut command = Command::new(&player);
    command.arg(artifact).args(&args);

    let status = timeout(config.playback_timeout, async {
        let mut child = command
            .spawn()
            .map_err(|e| Error::Playback(format!("failed to spawn player: {e}")))?;
        child
            .wait()
            .await
            .map_err(|e| Error::Playback(format!("player wait failed: {e}")))
    })
    .await
    .map_err(|_| Error::Playback(format!("playback timed out after {:?}", config.playback_timeout)))??;

    if !status.success() {
        let code = status.code().unwrap_or(-1);
        return Err(Error::Playback(format!("player exited with code {code}")));
    }

    Ok(())
}
