// src/client.rs
//! OpenAI-compatible chat-completions client with function calling.

use crate::config::SiriusConfig;
use crate::error::SiriusError;
use crate::tool::{FunctionCall, ToolCallProposal};
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl OpenAiConfig {
    /// `None` when no API key is configured.
    pub fn from_sirius(config: &SiriusConfig) -> Option<Self> {
        config.openai_api_key.as_ref().map(|api_key| Self {
            base_url: config.openai_base_url.clone(),
            api_key: api_key.clone(),
            model: config.openai_model.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<MessagePayload<'a>>,
    tools: &'a [Value],
    tool_choice: &'a str,
}

#[derive(Debug, Serialize)]
struct MessagePayload<'a> {
    role: &'a str,
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
    #[serde(default)]
    tool_calls: Option<Vec<ToolCallPayload>>,
}

#[derive(Debug, Deserialize)]
struct ToolCallPayload {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    kind: String,
    function: FunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiClient {
    /// `client` is usually `provider::build_http_client`, so the configured
    /// request timeout applies to model calls too.
    pub fn with_http_client(mut config: OpenAiConfig, client: Client) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self { config, client }
    }

    /// One completion with `tool_choice: "auto"`. Returns the proposed tool
    /// calls of the first choice, empty when the model answered in text.
    pub async fn propose_tool_calls(
        &self,
        system_prompt: &str,
        query: &str,
        tools: &[Value],
    ) -> Result<Vec<ToolCallProposal>, SiriusError> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                MessagePayload { role: "system", content: system_prompt },
                MessagePayload { role: "user", content: query },
            ],
            tools,
            tool_choice: "auto",
        };

        debug!("Chat completion request to model {}", self.config.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SiriusError::Upstream { status: status.as_u16(), body });
        }

        let body: ChatResponse = response.json().await?;
        let calls = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.tool_calls)
            .unwrap_or_default();

        Ok(calls
            .into_iter()
            .map(|call| ToolCallProposal {
                id: call.id,
                kind: call.kind,
                function: call.function,
            })
            .collect())
    }
}
