//! Command dispatch
//!
//! Classifies a command into an intent via an ordered first-match-wins rule
//! table and routes it to exactly one handler. Handlers return typed
//! failures; the dispatcher converts every one of them into a spoken apology
//! so nothing escapes its boundary. The only error `dispatch` itself returns
//! is a failure to speak — the defensive backstop callers log or map to an
//! HTTP 500.

use std::io::Write;
use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::automation::{ChromiumDriver, MediaSession, SearchDriver};
use crate::config::Config;
use crate::inference::OllamaClient;
use crate::navigate::{self, SystemOpener, UrlOpener};
use crate::phrases;
use crate::speech::{self, GoogleTranslateTts, Speaker, SpeechPipeline};
use crate::{Error, Result};

/// Classified purpose of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Question for the local inference service
    Inference {
        /// Text after the `ollama` prefix; may be empty
        question: String,
    },
    /// Open a site by name or best-guess domain
    OpenSite {
        /// Text after the `open` prefix
        name: String,
    },
    /// Search the media site and play the first result
    PlayMedia {
        /// Text after the first `play` (or `youtube`); may be empty
        query: String,
    },
    /// Search-engine query
    WebSearch {
        /// Text with the first `search` removed
        query: String,
    },
    /// Stop the run loop
    Exit,
    /// Fixed self-introduction
    Identity,
    /// No rule matched
    Unrecognized,
}

/// One classification rule: predicate plus payload extractor
///
/// Rules are evaluated in table order; the first match wins. The order is
/// the priority — overlapping keywords ("search" inside a play command) are
/// resolved by position, not by exclusivity.
struct Rule {
    name: &'static str,
    matches: fn(&str) -> bool,
    extract: fn(&str) -> Intent,
}

const RULES: &[Rule] = &[
    Rule {
        name: "inference",
        matches: |c| c.starts_with("ollama"),
        extract: |c| Intent::Inference {
            question: c["ollama".len()..].trim().to_string(),
        },
    },
    Rule {
        name: "open-site",
        matches: |c| c.starts_with("open"),
        extract: |c| Intent::OpenSite {
            name: c.replacen("open", "", 1).trim().to_string(),
        },
    },
    Rule {
        name: "play-media",
        matches: |c| {
            c.contains("youtube")
                || (c.contains("play")
                    && (c.contains("song") || c.contains("video") || c.contains("music")))
        },
        extract: |c| {
            let query = c
                .split_once("play")
                .or_else(|| c.split_once("youtube"))
                .map(|(_, rest)| rest.trim())
                .unwrap_or_default();
            Intent::PlayMedia {
                query: query.to_string(),
            }
        },
    },
    Rule {
        name: "web-search",
        matches: |c| c.contains("search"),
        extract: |c| Intent::WebSearch {
            query: c.replacen("search", "", 1).trim().to_string(),
        },
    },
    Rule {
        name: "exit",
        matches: |c| c.contains("exit") || c.contains("quit") || c.contains("goodbye"),
        extract: |_| Intent::Exit,
    },
    Rule {
        name: "identity",
        matches: |c| c.contains("what is your name") || c.contains("who are you"),
        extract: |_| Intent::Identity,
    },
    Rule {
        name: "fallback",
        matches: |_| true,
        extract: |_| Intent::Unrecognized,
    },
];

/// Classify a command; `None` for empty or whitespace-only input
#[must_use]
pub fn classify(command: &str) -> Option<Intent> {
    let command = command.trim();
    if command.is_empty() {
        return None;
    }

    let rule = RULES.iter().find(|rule| (rule.matches)(command))?;
    tracing::debug!(rule = rule.name, "command classified");
    Some((rule.extract)(command))
}

/// Routes commands to handlers and owns the run/stop lifecycle
pub struct Dispatcher<V, D, O> {
    voice: V,
    inference: OllamaClient,
    media: MediaSession<D>,
    opener: O,
    artifact_dir: PathBuf,
    running: bool,
}

/// Production dispatcher wiring
pub type Assistant = Dispatcher<SpeechPipeline<GoogleTranslateTts>, ChromiumDriver, SystemOpener>;

impl Dispatcher<SpeechPipeline<GoogleTranslateTts>, ChromiumDriver, SystemOpener> {
    /// Build the production dispatcher from configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let synth = GoogleTranslateTts::new(&config.speech.language);
        let voice = SpeechPipeline::new(config, synth);
        Self::new(config, voice, SystemOpener)
    }
}

impl<V, D, O> Dispatcher<V, D, O>
where
    V: Speaker,
    D: SearchDriver,
    O: UrlOpener,
{
    /// Create a dispatcher; clears artifacts orphaned by a prior run
    pub fn new(config: &Config, voice: V, opener: O) -> Self {
        speech::janitor::cleanup(&config.artifact_dir);

        Self {
            voice,
            inference: OllamaClient::new(&config.inference),
            media: MediaSession::new(config.automation.clone()),
            opener,
            artifact_dir: config.artifact_dir.clone(),
            running: false,
        }
    }

    /// Whether the run loop should continue
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Mark the dispatcher running; part of the startup sequence
    ///
    /// Only this startup path and the Exit handler touch the flag.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Read-only view of the media session, for callers that report state
    #[must_use]
    pub fn media(&self) -> &MediaSession<D> {
        &self.media
    }

    /// Classify and handle one command
    ///
    /// Handler failures become spoken apologies and are not propagated.
    ///
    /// # Errors
    ///
    /// Returns error only when speaking itself fails
    pub async fn dispatch(&mut self, command: &str) -> Result<()> {
        let Some(intent) = classify(command) else {
            return Ok(());
        };

        match intent {
            Intent::Inference { question } => self.handle_inference(&question).await,
            Intent::OpenSite { name } => self.handle_open_site(&name).await,
            Intent::PlayMedia { query } => self.handle_play_media(&query).await,
            Intent::WebSearch { query } => self.handle_web_search(&query).await,
            Intent::Exit => self.handle_exit().await,
            Intent::Identity => self.voice.say(phrases::IDENTITY).await,
            Intent::Unrecognized => self.voice.say(phrases::UNRECOGNIZED).await,
        }
    }

    /// Interactive loop: prompt, read, lowercase, dispatch; ends only on Exit
    ///
    /// # Errors
    ///
    /// Returns error if standard input fails
    pub async fn run(&mut self) -> Result<()> {
        self.start();

        if let Err(e) = self.voice.say(phrases::GREETING).await {
            tracing::error!(error = %e, "greeting failed");
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while self.running {
            print!("You: ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                tracing::info!("input closed, stopping");
                break;
            };
            let command = line.trim().to_lowercase();

            if let Err(e) = self.dispatch(&command).await {
                tracing::error!(error = %e, "command handling failed");
                if let Err(e) = self.voice.say(phrases::LOOP_APOLOGY).await {
                    tracing::error!(error = %e, "apology failed");
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Graceful teardown: close the automation session, sweep artifacts
    pub async fn shutdown(&mut self) {
        self.media.shutdown().await;
        speech::janitor::cleanup(&self.artifact_dir);
    }

    async fn handle_inference(&mut self, question: &str) -> Result<()> {
        if question.is_empty() {
            return self.voice.say(phrases::ASK_A_QUESTION).await;
        }

        match self.inference.generate(question).await {
            Ok(answer) => self.voice.say(&answer).await,
            Err(Error::EmptyAnswer) => self.voice.say(phrases::NO_ANSWER).await,
            Err(Error::InferenceUnavailable(e)) => {
                tracing::error!(error = %e, "inference service unreachable");
                self.voice.say(phrases::SERVER_DOWN).await
            }
            Err(e) => {
                tracing::error!(error = %e, "inference failed");
                self.voice.say(phrases::INFERENCE_APOLOGY).await
            }
        }
    }

    async fn handle_open_site(&mut self, name: &str) -> Result<()> {
        let url = navigate::resolve_site(name);

        match self.opener.open(&url).await {
            Ok(()) => self.voice.say(&format!("Opening {name}")).await,
            Err(e) => {
                tracing::error!(error = %e, url, "site open failed");
                self.voice.say(phrases::OPEN_APOLOGY).await
            }
        }
    }

    async fn handle_play_media(&mut self, query: &str) -> Result<()> {
        if query.is_empty() {
            // Nothing to search for; the session is not touched
            return self.voice.say(phrases::WHAT_TO_PLAY).await;
        }

        match self.media.play(query).await {
            Ok(()) => self.voice.say(&format!("Playing {query} on YouTube")).await,
            Err(_) => self.voice.say(phrases::PLAY_APOLOGY).await,
        }
    }

    async fn handle_web_search(&mut self, query: &str) -> Result<()> {
        let url = navigate::search_url(query);

        match self.opener.open(&url).await {
            Ok(()) => self.voice.say(&format!("Searching for {query}")).await,
            Err(e) => {
                tracing::error!(error = %e, url, "web search failed");
                self.voice.say(phrases::SEARCH_APOLOGY).await
            }
        }
    }

    async fn handle_exit(&mut self) -> Result<()> {
        self.running = false;
        self.voice.say(phrases::FAREWELL).await
    }
}
