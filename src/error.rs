//! Error types for the Vaani assistant

use thiserror::Error;

/// Result type alias for Vaani operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Vaani assistant
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Speech synthesis error
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// Audio playback error
    #[error("playback error: {0}")]
    Playback(String),

    /// Browser automation error
    #[error("browser error: {0}")]
    Browser(String),

    /// Inference service returned a well-formed body without an answer
    #[error("inference service returned no answer")]
    EmptyAnswer,

    /// Inference service is not reachable (connection refused)
    #[error("inference service unreachable: {0}")]
    InferenceUnavailable(String),

    /// Inference error other than the two cases above
    #[error("inference error: {0}")]
    Inference(String),

    /// URL open / navigation error
    #[error("navigation error: {0}")]
    Navigation(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
