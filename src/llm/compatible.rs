//! OpenAI-compatible chat completions provider.
//! Groq, OpenAI, Together, local llama.cpp servers and friends all accept the
//! same `/chat/completions` request shape.

use super::{Provider, build_provider_client, sanitize_api_error};
use crate::error::LlmError;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub struct OpenAiCompatibleProvider {
    pub(crate) name: String,
    pub(crate) base_url: String,
    pub(crate) api_key: Option<String>,
    /// Pre-computed `Authorization` header value.
    cached_auth: Option<String>,
    /// Pre-computed chat completions URL.
    cached_chat_url: String,
    client: Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(name: &str, base_url: &str, api_key: Option<&str>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let cached_chat_url = if base_url.contains("chat/completions") {
            base_url.clone()
        } else {
            format!("{base_url}/chat/completions")
        };

        Self {
            name: name.to_string(),
            base_url,
            api_key: api_key.map(ToString::to_string),
            cached_auth: api_key.map(|k| format!("Bearer {k}")),
            cached_chat_url,
            client: build_provider_client(),
        }
    }

    fn chat_completions_url(&self) -> &str {
        &self.cached_chat_url
    }

    fn apply_auth_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(value) = &self.cached_auth {
            req.header("Authorization", value)
        } else {
            req
        }
    }

    async fn call_chat_completions(&self, request: &ChatRequest) -> anyhow::Result<ChatResponse> {
        let response = self
            .apply_auth_header(self.client.post(self.chat_completions_url()).json(request))
            .send()
            .await
            .with_context(|| format!("{} chat completions request failed", self.name))?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await?;
            let sanitized_error = sanitize_api_error(&error);

            if status == reqwest::StatusCode::UNAUTHORIZED {
                tracing::warn!("{} rejected the API key: {sanitized_error}", self.name);
                return Err(LlmError::Auth {
                    provider: self.name.clone(),
                }
                .into());
            }

            return Err(LlmError::Request {
                provider: self.name.clone(),
                message: format!("{status}: {sanitized_error}"),
            }
            .into());
        }

        response
            .json()
            .await
            .with_context(|| format!("{} chat completions JSON decode failed", self.name))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

fn extract_chat_text(response: &ChatResponse, provider_name: &str) -> anyhow::Result<String> {
    let choice = response
        .choices
        .first()
        .ok_or_else(|| anyhow::anyhow!("No response from {provider_name}"))?;

    let text = choice.message.content.as_deref().unwrap_or_default().trim();
    if text.is_empty() {
        return Err(LlmError::EmptyCompletion {
            provider: provider_name.to_string(),
        }
        .into());
    }

    Ok(text.to_string())
}

#[async_trait]
impl Provider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn chat_with_system(
        &self,
        system_prompt: Option<&str>,
        message: &str,
        model: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> anyhow::Result<String> {
        if self.api_key.is_none() {
            anyhow::bail!(
                "{} API key not set. Set LLM_API_KEY or llm.api_key in config.toml.",
                self.name
            );
        }

        let capacity = if system_prompt.is_some() { 2 } else { 1 };
        let mut messages = Vec::with_capacity(capacity);

        if let Some(sys) = system_prompt {
            messages.push(Message {
                role: "system",
                content: sys.to_string(),
            });
        }

        messages.push(Message {
            role: "user",
            content: message.to_string(),
        });

        let request = ChatRequest {
            model: model.to_string(),
            messages,
            temperature,
            max_tokens,
        };

        let response = self.call_chat_completions(&request).await?;
        extract_chat_text(&response, &self.name)
    }

    async fn warmup(&self) -> anyhow::Result<()> {
        // Any response (even 401/404) proves the TLS connection is up.
        let _ = self.client.get(&self.base_url).send().await?;
        Ok(())
    }
}
