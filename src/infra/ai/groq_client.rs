use crate::core::ai::{
    models::{ChatConfig, ChatMessage},
    ChatProvider,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::error::Error;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Client for Groq's OpenAI-compatible chat completion endpoint.
pub struct GroqClient {
    client: Client,
    api_key: String,
}

impl GroqClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl ChatProvider for GroqClient {
    async fn chat_complete(
        &self,
        messages: &[ChatMessage],
        config: &ChatConfig,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let payload = json!({
            "model": config.model,
            "messages": messages,
            "max_tokens": config.max_tokens,
            "temperature": config.temperature,
        });

        let response = self
            .client
            .post(GROQ_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(format!("Groq API error: {} - {}", status, text).into());
        }

        let response_json: serde_json::Value = response.json().await?;

        // Extract content
        let content = response_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("Failed to parse response content")?
            .to_string();

        Ok(content)
    }
}
