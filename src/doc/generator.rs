use crate::config::{Config, Prompts};
use crate::doc::UnitKind;
use crate::error::{DocError, Result};
use log::{debug, info};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Produces raw docstring text for a unit's source.
///
/// Implementations return the text unpolished; fences, labels and quoting are
/// cleaned up by [`crate::doc::polish`].
pub trait DocGenerator {
    fn generate(&self, source: &str, kind: UnitKind) -> Result<String>;
}

/// Talks to an OpenAI-compatible `chat/completions` endpoint.
pub struct ChatCompletionsGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    prompts: Prompts,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl ChatCompletionsGenerator {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("zero-docs/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            prompts: config.prompts.clone(),
        })
    }

    fn request_body<'a>(&'a self, prompt: &'a str, source: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt,
                },
                ChatMessage {
                    role: "user",
                    content: source,
                },
            ],
        }
    }
}

impl DocGenerator for ChatCompletionsGenerator {
    fn generate(&self, source: &str, kind: UnitKind) -> Result<String> {
        let prompt = self.prompts.for_kind(kind);
        info!(
            "Generating {} docstring with {} at {}",
            kind, self.model, self.endpoint
        );
        let start = Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(&prompt, source))
            .send()
            .map_err(|e| DocError::generation_error(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| DocError::generation_error(format!("failed to read response: {}", e)))?;
        if !status.is_success() {
            return Err(DocError::generation_error(format!(
                "endpoint returned {}: {}",
                status,
                body.trim()
            )));
        }

        let content = extract_content(&body)?;
        info!(
            "Generated {} docstring in {:.2} seconds",
            kind,
            start.elapsed().as_secs_f64()
        );
        debug!("Raw {} docstring: {}", kind, content);
        Ok(content)
    }
}

/// Pulls the first choice's message text out of a response body.
fn extract_content(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| DocError::generation_error(format!("malformed response: {}", e)))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    if content.is_empty() {
        return Err(DocError::generation_error("response contained no text"));
    }
    Ok(content)
}
