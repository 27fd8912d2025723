//! Async client for a local Ollama instance
//!
//! The narrative generator runs against Ollama's chat API. The engine
//! never depends on anything this client returns: every caller has a
//! static fallback, so a missing or broken endpoint degrades gracefully.

use crate::core::error::{Result, SimError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default endpoint for a locally running Ollama.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Hard ceiling on any single generation call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Async client for making Ollama chat calls.
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    /// Create a client with an explicit endpoint and model.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Create a client from environment variables
    ///
    /// Required: OLLAMA_MODEL
    /// Optional: OLLAMA_ENDPOINT (defaults to a local instance)
    pub fn from_env() -> Result<Self> {
        let model = std::env::var("OLLAMA_MODEL")
            .map_err(|_| SimError::Generator("OLLAMA_MODEL not set".into()))?;
        let endpoint =
            std::env::var("OLLAMA_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.into());
        Ok(Self::new(endpoint, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one chat completion request and return the response text.
    pub async fn chat(
        &self,
        system: &str,
        user: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            stream: false,
            messages: vec![
                Message {
                    role: "system".into(),
                    content: system.into(),
                },
                Message {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
            options: ChatOptions {
                temperature,
                num_predict: max_tokens,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| SimError::Generator(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SimError::Generator(format!(
                "Ollama error ({status}): {body}"
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| SimError::Generator(e.to_string()))?;

        let content = completion.message.content.trim().to_string();
        if content.is_empty() {
            return Err(SimError::Generator("empty response".into()));
        }
        Ok(content)
    }

    /// List models available on the endpoint.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/v1/models", self.endpoint))
            .send()
            .await
            .map_err(|e| SimError::Generator(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SimError::Generator(format!(
                "model listing failed: {}",
                response.status()
            )));
        }

        let listing: ModelListing = response
            .json()
            .await
            .map_err(|e| SimError::Generator(e.to_string()))?;
        Ok(listing.data.into_iter().map(|m| m.id).collect())
    }

    /// Cheap reachability probe.
    pub async fn test_connection(&self) -> bool {
        self.list_models().await.is_ok()
    }
}

// Ollama chat API format
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    stream: bool,
    messages: Vec<Message>,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f64,
    num_predict: u32,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ModelListing {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_is_normalized() {
        let client = OllamaClient::new("http://localhost:11434///", "test-model");
        assert_eq!(client.endpoint, "http://localhost:11434");
        assert_eq!(client.model(), "test-model");
    }

    #[test]
    fn test_from_env_missing_model() {
        if std::env::var("OLLAMA_MODEL").is_err() {
            assert!(OllamaClient::from_env().is_err());
        }
    }
}
