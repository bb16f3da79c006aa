use serde::{Deserialize, Serialize};

/// Sent to the channel whenever the AI call fails, whatever the cause.
/// Transport errors, bad status codes and malformed responses all collapse
/// into this one user-visible string; the detail only goes to the logs.
pub const FALLBACK_REPLY: &str = "Sorry, my AI brain glitched 😅 Try again later.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Fixed sampling parameters for every completion request.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}
