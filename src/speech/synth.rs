//! Speech synthesis
//!
//! The production synthesizer fetches audio from the Google Translate TTS
//! endpoint for a fixed target language and writes the MP3 bytes to the
//! artifact path. The trait seam lets tests substitute a local fake.

use std::path::Path;

use async_trait::async_trait;

use crate::{Error, Result};

/// Translate TTS endpoint
const TTS_URL: &str = "https://translate.google.com/translate_tts";

/// The endpoint rejects long inputs; text is truncated to one request's worth
const MAX_INPUT_CHARS: usize = 200;

/// Turns text into an audio file at a given path
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesize `text` into an audio file at `path`
    ///
    /// # Errors
    ///
    /// Returns error if synthesis or the file write fails
    async fn synthesize(&self, text: &str, path: &Path) -> Result<()>;
}

/// Google Translate TTS client
pub struct GoogleTranslateTts {
    client: reqwest::Client,
    language: String,
}

impl GoogleTranslateTts {
    /// Create a synthesizer for the given language code (e.g. `hi`)
    #[must_use]
    pub fn new(language: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            language: language.to_string(),
        }
    }
}

#[async_trait]
impl Synthesizer for GoogleTranslateTts {
    async fn synthesize(&self, text: &str, path: &Path) -> Result<()> {
        let input: String = text.chars().take(MAX_INPUT_CHARS).collect();

        let response = self
            .client
            .get(TTS_URL)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.language.as_str()),
                ("q", input.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::Synthesis(format!("TTS endpoint returned {status}")));
        }

        let audio = response.bytes().await?;
        tokio::fs::write(path, &audio).await?;

        tracing::debug!(
            bytes = audio.len(),
            path = %path.display(),
            "speech synthesized"
        );
        Ok(())
    }
}
