//! Local LLM queries via Ollama
//!
//! One HTTP POST per question, no retries: failures surface immediately as
//! spoken feedback instead of stalling the command loop.

use serde::{Deserialize, Serialize};

use crate::config::InferenceConfig;
use crate::{Error, Result};

/// Client for a locally hosted Ollama generate endpoint
pub struct OllamaClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

/// Generate request body
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

/// Generate response body (only the answer field matters here)
#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

impl OllamaClient {
    /// Create a client for the configured endpoint and model
    #[must_use]
    pub fn new(config: &InferenceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        }
    }

    /// Ask a question and return the model's answer verbatim
    ///
    /// # Errors
    ///
    /// - [`Error::InferenceUnavailable`] when the connection is refused
    /// - [`Error::EmptyAnswer`] when the body parses but carries no answer
    /// - [`Error::Inference`] / [`Error::Http`] for anything else
    pub async fn generate(&self, question: &str) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: build_prompt(question),
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    Error::InferenceUnavailable(e.to_string())
                } else {
                    Error::Http(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::Inference(format!("Ollama returned {status}")));
        }

        let body: GenerateResponse = response.json().await?;
        match body.response {
            Some(answer) if !answer.is_empty() => Ok(answer),
            _ => Err(Error::EmptyAnswer),
        }
    }
}

/// Wrap the question in the fixed Hindi instruction template
fn build_prompt(question: &str) -> String {
    format!(
        "Please respond in Hindi language (using Devanagari script) to this question: {question}. \
         Make sure to write the full response in proper Hindi."
    )
}

impl std::fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
