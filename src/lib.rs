//! Vaani - Hindi-speaking voice command assistant
//!
//! This library provides the core functionality for the Vaani assistant:
//! - Command dispatch (intent classification and handler routing)
//! - Speech output pipeline (synthesize, play, delete)
//! - Browser automation for media search
//! - Local LLM queries via Ollama
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    Interfaces                        │
//! │      Interactive prompt   │   HTTP /command          │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                   Dispatcher                         │
//! │   classify  │  route  │  run/stop  │  apologies     │
//! └──┬───────────┬──────────────┬──────────────┬────────┘
//!    │           │              │              │
//! ┌──▼─────┐ ┌──▼────────┐ ┌──▼──────────┐ ┌─▼────────┐
//! │ Speech │ │ Inference │ │ Media       │ │ Navigate │
//! │ output │ │ (Ollama)  │ │ session     │ │ actions  │
//! └────────┘ └───────────┘ └─────────────┘ └──────────┘
//! ```
//!
//! Every spoken response funnels through the speech output pipeline, which
//! owns the full lifecycle of its temporary audio artifact. The dispatcher
//! never lets a handler failure escape its boundary.

pub mod api;
pub mod automation;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod inference;
pub mod navigate;
pub mod phrases;
pub mod speech;

pub use config::Config;
pub use dispatch::{Dispatcher, Intent, classify};
pub use error::{Error, Result};
pub use inference::OllamaClient;
pub use speech::{Speaker, SpeechPipeline};
