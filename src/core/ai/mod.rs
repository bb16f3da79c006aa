pub mod ai_service;
pub mod models;

pub use ai_service::{AiService, ChatProvider};
pub use models::{ChatConfig, ChatMessage, FALLBACK_REPLY};
