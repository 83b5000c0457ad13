//! OpenAI Responses API client

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use super::LanguageModel;
use crate::config::{ApiKey, LlmConfig};
use crate::{Result, TripcastError};

/// reqwest-backed [`LanguageModel`] for the OpenAI Responses API
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: [InputMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesResponse {
    /// Aggregated assistant text
    fn text(self) -> String {
        if let Some(text) = self.output_text.filter(|t| !t.is_empty()) {
            return text;
        }
        self.output
            .into_iter()
            .flat_map(|item| item.content)
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text)
            .collect()
    }
}

impl OpenAiClient {
    /// Create a new client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tripcast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripcastError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Build the responses endpoint URL
    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    #[instrument(skip(self, prompt, key), fields(model = %self.model))]
    async fn complete(&self, prompt: &str, key: &ApiKey) -> Result<String> {
        let request = ResponsesRequest {
            model: &self.model,
            input: [InputMessage {
                role: "user",
                content: prompt,
            }],
        };

        let start = Instant::now();
        let response = self
            .client
            .post(self.responses_url())
            .bearer_auth(key.as_str())
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        debug!(
            "POST /responses -> {} in {:.3}s",
            status,
            start.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str::<Value>(&text).ok();
            let message = body
                .as_ref()
                .and_then(|b| b.pointer("/error/message"))
                .and_then(Value::as_str)
                .map_or_else(
                    || format!("Language model request failed with status {status}"),
                    str::to_string,
                );
            return Err(TripcastError::upstream(status.as_u16(), message, body));
        }

        let parsed: ResponsesResponse = response
            .json()
            .await
            .map_err(|e| TripcastError::parse(format!("Invalid completion response: {e}")))?;

        Ok(parsed.text())
    }
}
