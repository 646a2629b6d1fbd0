//! Speech output pipeline
//!
//! Turns response text into a temporary audio artifact, plays it through an
//! external media player, and deletes the artifact afterward. Every call
//! produces exactly one artifact and deletes it exactly once; deletion runs
//! after the playback attempt on success and failure alike.

pub mod janitor;
pub mod player;
pub mod synth;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::config::{Config, SpeechConfig};
use crate::Result;

pub use synth::{GoogleTranslateTts, Synthesizer};

/// Filename prefix for speech artifacts
pub const ARTIFACT_PREFIX: &str = "vaani_";

/// Filename extension for speech artifacts
pub const ARTIFACT_EXT: &str = "mp3";

/// Anything that can speak a response to the user
#[async_trait]
pub trait Speaker: Send + Sync {
    /// Speak `text`, resolving once playback has completed (or a recoverable
    /// failure has been reported)
    async fn say(&self, text: &str) -> Result<()>;
}

/// Speech output pipeline: synthesize, settle, play, delete
pub struct SpeechPipeline<S> {
    synth: S,
    config: SpeechConfig,
    artifact_dir: PathBuf,
    seq: AtomicU64,
}

impl<S: Synthesizer> SpeechPipeline<S> {
    /// Create a pipeline writing artifacts under the configured directory
    pub fn new(config: &Config, synth: S) -> Self {
        Self {
            synth,
            config: config.speech.clone(),
            artifact_dir: config.artifact_dir.clone(),
            seq: AtomicU64::new(0),
        }
    }

    /// Derive a unique artifact path
    ///
    /// Timestamps alone collide under rapid successive calls; the sequence
    /// suffix keeps names unique without relying on clock granularity.
    fn artifact_path(&self) -> PathBuf {
        let millis = chrono::Utc::now().timestamp_millis();
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.artifact_dir
            .join(format!("{ARTIFACT_PREFIX}{millis}_{seq}.{ARTIFACT_EXT}"))
    }
}

#[async_trait]
impl<S: Synthesizer> Speaker for SpeechPipeline<S> {
    async fn say(&self, text: &str) -> Result<()> {
        println!("Assistant: {text}");

        let artifact = self.artifact_path();

        if let Err(e) = self.synth.synthesize(text, &artifact).await {
            // A failed synthesis may still have left a partial file behind
            let _ = tokio::fs::remove_file(&artifact).await;
            return Err(e);
        }

        // Give the filesystem a moment before the player opens the file
        tokio::time::sleep(self.config.settle_delay).await;

        let played = player::play(&artifact, &self.config).await;
        if let Err(e) = &played {
            tracing::error!(error = %e, artifact = %artifact.display(), "playback failed");
        }

        // Deletion runs regardless of how playback went
        if let Err(e) = tokio::fs::remove_file(&artifact).await {
            tracing::warn!(error = %e, artifact = %artifact.display(), "artifact cleanup failed");
        }

        Ok(())
    }
}

impl<S> std::fmt::Debug for SpeechPipeline<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechPipeline")
            .field("artifact_dir", &self.artifact_dir)
            .field("language", &self.config.language)
            .finish_non_exhaustive()
    }
}
