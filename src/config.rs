//! Configuration for the Vaani assistant
//!
//! Defaults cover a stock local setup (Ollama on `localhost:11434`, VLC in
//! one of its usual install locations). A TOML overlay file at
//! `~/.config/vaani/config.toml` and a handful of environment variables can
//! override individual fields; all file fields are optional.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::{Error, Result};

/// Default Ollama generate endpoint
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434/api/generate";

/// Default Ollama model
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

/// Assistant configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory where speech artifacts are written and cleaned up
    pub artifact_dir: PathBuf,

    /// Speech configuration
    pub speech: SpeechConfig,

    /// Inference service configuration
    pub inference: InferenceConfig,

    /// Browser automation configuration
    pub automation: AutomationConfig,

    /// HTTP command server configuration
    pub server: ServerConfig,
}

/// Speech output configuration
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// Target spoken language code passed to the synthesizer
    pub language: String,

    /// Delay after synthesis before the artifact is handed to playback
    pub settle_delay: Duration,

    /// Absolute candidate paths probed for the media player, in order
    pub player_paths: Vec<PathBuf>,

    /// Executable names looked up on `PATH` after the candidates miss
    pub player_names: Vec<String>,

    /// Upper bound on a single playback subprocess
    pub playback_timeout: Duration,
}

/// Inference service configuration
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Generate endpoint URL
    pub endpoint: String,

    /// Model identifier
    pub model: String,
}

/// Browser automation configuration
#[derive(Debug, Clone)]
pub struct AutomationConfig {
    /// Media site opened for search
    pub media_url: String,

    /// How long to wait for a search result element
    pub result_timeout: Duration,

    /// Extra delay after results appear, before clicking the first one
    pub settle_delay: Duration,
}

/// HTTP command server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Optional directory of static UI files to serve at `/`
    pub static_dir: Option<PathBuf>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language: "hi".to_string(),
            settle_delay: Duration::from_millis(1000),
            player_paths: default_player_paths(),
            player_names: vec![
                "vlc".to_string(),
                "cvlc".to_string(),
                "mpv".to_string(),
                "ffplay".to_string(),
            ],
            playback_timeout: Duration::from_secs(60),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OLLAMA_ENDPOINT.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            media_url: "https://www.youtube.com".to_string(),
            result_timeout: Duration::from_secs(5),
            settle_delay: Duration::from_millis(2000),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            static_dir: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            artifact_dir: default_artifact_dir(),
            speech: SpeechConfig::default(),
            inference: InferenceConfig::default(),
            automation: AutomationConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the TOML overlay file, then env vars
    ///
    /// # Errors
    ///
    /// Returns error if the config file exists but cannot be parsed
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = config_file_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                let file: ConfigFile = toml::from_str(&content)?;
                config.apply_file(file);
                tracing::debug!(path = %path.display(), "loaded config file");
            }
        }

        config.apply_env();
        Ok(config)
    }

    /// Overlay values from the config file
    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(dir) = file.artifact_dir {
            self.artifact_dir = PathBuf::from(dir);
        }
        if let Some(lang) = file.speech.language {
            self.speech.language = lang;
        }
        if let Some(ms) = file.speech.settle_delay_ms {
            self.speech.settle_delay = Duration::from_millis(ms);
        }
        if let Some(paths) = file.speech.player_paths {
            self.speech.player_paths = paths.into_iter().map(PathBuf::from).collect();
        }
        if let Some(names) = file.speech.player_names {
            self.speech.player_names = names;
        }
        if let Some(url) = file.inference.endpoint {
            self.inference.endpoint = url;
        }
        if let Some(model) = file.inference.model {
            self.inference.model = model;
        }
        if let Some(url) = file.automation.media_url {
            self.automation.media_url = url;
        }
        if let Some(secs) = file.automation.result_timeout_secs {
            self.automation.result_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = file.automation.settle_delay_ms {
            self.automation.settle_delay = Duration::from_millis(ms);
        }
        if let Some(port) = file.server.port {
            self.server.port = port;
        }
        if let Some(dir) = file.server.static_dir {
            self.server.static_dir = Some(PathBuf::from(dir));
        }
    }

    /// Overlay values from environment variables
    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("VAANI_OLLAMA_URL") {
            self.inference.endpoint = url;
        }
        if let Ok(model) = std::env::var("VAANI_OLLAMA_MODEL") {
            self.inference.model = model;
        }
        if let Ok(dir) = std::env::var("VAANI_ARTIFACT_DIR") {
            self.artifact_dir = PathBuf::from(dir);
        }
    }

    /// Ensure the artifact directory exists
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created
    pub fn ensure_artifact_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.artifact_dir).map_err(|e| {
            Error::Config(format!(
                "cannot create artifact dir {}: {e}",
                self.artifact_dir.display()
            ))
        })
    }
}

/// Standard config file path (`~/.config/vaani/config.toml`)
fn config_file_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "vaani", "vaani")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Default artifact directory (`~/.local/share/vaani` or platform equivalent)
fn default_artifact_dir() -> PathBuf {
    directories::ProjectDirs::from("dev", "vaani", "vaani")
        .map_or_else(std::env::temp_dir, |dirs| dirs.data_dir().to_path_buf())
}

/// Well-known media player install locations, probed before `PATH`
fn default_player_paths() -> Vec<PathBuf> {
    [
        r"C:\Program Files\VideoLAN\VLC\vlc.exe",
        r"C:\Program Files (x86)\VideoLAN\VLC\vlc.exe",
        "/usr/bin/vlc",
        "/Applications/VLC.app/Contents/MacOS/VLC",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

/// Top-level TOML configuration file schema
///
/// All fields are optional — the file is a partial overlay on top of defaults.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    artifact_dir: Option<String>,

    #[serde(default)]
    speech: SpeechFileConfig,

    #[serde(default)]
    inference: InferenceFileConfig,

    #[serde(default)]
    automation: AutomationFileConfig,

    #[serde(default)]
    server: ServerFileConfig,
}

#[derive(Debug, Default, Deserialize)]
struct SpeechFileConfig {
    language: Option<String>,
    settle_delay_ms: Option<u64>,
    player_paths: Option<Vec<String>>,
    player_names: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct InferenceFileConfig {
    endpoint: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AutomationFileConfig {
    media_url: Option<String>,
    result_timeout_secs: Option<u64>,
    settle_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerFileConfig {
    port: Option<u16>,
    static_dir: Option<String>,
}
