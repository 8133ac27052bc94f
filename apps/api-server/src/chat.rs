//! Chat proxy client - forwards a single user message to the OpenRouter
//! chat-completions API and returns the reply text.
//!
//! One attempt per request; a failing upstream is surfaced immediately.
//! Shares no state with the blog core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ChatConfig;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("upstream reply carried no choices")]
    MalformedReply,
}

pub struct ChatClient {
    http: reqwest::Client,
    config: ChatConfig,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Forward one user message and return the model's reply text.
    pub async fn send(&self, message: &str) -> Result<String, ChatError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let payload = CompletionRequest {
            model: &self.config.model,
            messages: vec![Message {
                role: "user",
                content: message,
            }],
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ChatError::MalformedReply)
    }
}
