//! Shared test doubles for dispatcher scenarios
#![allow(dead_code)] // each test binary uses a different subset

use std::cell::Cell;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use vaani_assistant::automation::SearchDriver;
use vaani_assistant::config::{AutomationConfig, Config};
use vaani_assistant::navigate::UrlOpener;
use vaani_assistant::speech::{Speaker, Synthesizer};
use vaani_assistant::{Error, Result};

/// Records everything the dispatcher speaks
#[derive(Clone, Default)]
pub struct RecordingVoice {
    utterances: Arc<Mutex<Vec<String>>>,
}

impl RecordingVoice {
    pub fn spoken(&self) -> Vec<String> {
        self.utterances.lock().unwrap().clone()
    }
}

#[async_trait]
impl Speaker for RecordingVoice {
    async fn say(&self, text: &str) -> Result<()> {
        self.utterances.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Records opened URLs; optionally fails every open
#[derive(Clone, Default)]
pub struct RecordingOpener {
    pub opened: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl RecordingOpener {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl UrlOpener for RecordingOpener {
    async fn open(&self, url: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Navigation("opener unavailable".to_string()));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

// Per-test-thread script state for the fake automation driver;
// `#[tokio::test]` runs each test on its own thread
thread_local! {
    static LAUNCHES: Cell<u32> = const { Cell::new(0) };
    static FAIL_WAIT: Cell<bool> = const { Cell::new(false) };
}

/// Count of driver launches on this test thread
pub fn driver_launches() -> u32 {
    LAUNCHES.with(Cell::get)
}

/// Make the next media searches fail at the wait-for-results step
pub fn fail_media_wait(fail: bool) {
    FAIL_WAIT.with(|f| f.set(fail));
}

/// Scripted automation driver; never touches a real browser
pub struct FakeDriver;

#[async_trait]
impl SearchDriver for FakeDriver {
    async fn launch(_config: &AutomationConfig) -> Result<Self> {
        LAUNCHES.with(|c| c.set(c.get() + 1));
        Ok(Self)
    }

    async fn goto(&self, _url: &str) -> Result<()> {
        Ok(())
    }

    async fn type_into(&self, _selector: &str, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn submit(&self, _selector: &str) -> Result<()> {
        Ok(())
    }

    async fn wait_for(&self, selector: &str, _timeout: Duration) -> Result<()> {
        if FAIL_WAIT.with(Cell::get) {
            return Err(Error::Browser(format!("element not found: {selector}")));
        }
        Ok(())
    }

    async fn click_first(&self, _selector: &str) -> Result<()> {
        Ok(())
    }

    async fn shutdown(self) -> Result<()> {
        Ok(())
    }
}

/// Synthesizer that writes placeholder bytes, or fails on demand
pub struct FakeSynth {
    pub fail: bool,
}

#[async_trait]
impl Synthesizer for FakeSynth {
    async fn synthesize(&self, _text: &str, path: &Path) -> Result<()> {
        if self.fail {
            return Err(Error::Synthesis("synthesis unavailable".to_string()));
        }
        tokio::fs::write(path, b"not really audio").await?;
        Ok(())
    }
}

/// Baseline test configuration: temp artifacts, no players, no delays
pub fn test_config(artifact_dir: &Path) -> Config {
    let mut config = Config::default();
    config.artifact_dir = artifact_dir.to_path_buf();
    config.speech.settle_delay = Duration::from_millis(0);
    config.speech.player_paths = Vec::new();
    config.speech.player_names = Vec::new();
    config.automation.settle_delay = Duration::from_millis(0);
    config
}

/// Count artifacts matching the pipeline naming convention
pub fn artifact_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .filter(|e| {
                    let name = e.file_name();
                    let name = name.to_string_lossy();
                    name.starts_with("vaani_") && name.ends_with(".mp3")
                })
                .count()
        })
        .unwrap_or(0)
}
