use super::models::{ChatConfig, ChatMessage, FALLBACK_REPLY};
use async_trait::async_trait;
use std::error::Error;

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Sends one chat completion request and returns the completion text.
    async fn chat_complete(
        &self,
        messages: &[ChatMessage],
        config: &ChatConfig,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}

/// Stateless chat bridge: every call submits exactly the fixed system prompt
/// plus the single user message. No conversation history is kept across turns.
pub struct AiService<P: ChatProvider> {
    provider: P,
    system_prompt: String,
    config: ChatConfig,
}

impl<P: ChatProvider> AiService<P> {
    pub fn new(provider: P, system_prompt: String, config: ChatConfig) -> Self {
        Self {
            provider,
            system_prompt,
            config,
        }
    }

    pub async fn reply_to(
        &self,
        user_message: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let messages = [
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(user_message),
        ];
        self.provider.chat_complete(&messages, &self.config).await
    }

    /// The single "log and continue" failure policy for the AI bridge:
    /// any provider error is logged and replaced with [`FALLBACK_REPLY`].
    pub async fn reply_or_fallback(&self, user_message: &str) -> String {
        match self.reply_to(user_message).await {
            Ok(text) => text,
            Err(source) => {
                tracing::error!("AI completion failed: {}", source);
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Mutex;

    /// Provider that records what it was asked and returns a canned result.
    struct MockProvider {
        seen: Mutex<Vec<Vec<ChatMessage>>>,
        fail: bool,
    }

    impl MockProvider {
        fn new(fail: bool) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl ChatProvider for MockProvider {
        async fn chat_complete(
            &self,
            messages: &[ChatMessage],
            _config: &ChatConfig,
        ) -> Result<String, Box<dyn Error + Send + Sync>> {
            self.seen.lock().await.push(messages.to_vec());
            if self.fail {
                return Err("simulated timeout".into());
            }
            Ok("canned answer".to_string())
        }
    }

    fn config() -> ChatConfig {
        ChatConfig {
            model: "test-model".to_string(),
            max_tokens: 400,
            temperature: 0.8,
        }
    }

    #[tokio::test]
    async fn test_reply_submits_system_prompt_plus_single_user_turn() {
        let service = AiService::new(MockProvider::new(false), "be nice".to_string(), config());

        let reply = service.reply_to("hello bot").await.unwrap();
        assert_eq!(reply, "canned answer");

        let seen = service.provider.seen.lock().await;
        assert_eq!(seen.len(), 1);
        let messages = &seen[0];
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "be nice");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "hello bot");
    }

    #[tokio::test]
    async fn test_turns_are_stateless() {
        let service = AiService::new(MockProvider::new(false), "be nice".to_string(), config());

        service.reply_to("first").await.unwrap();
        service.reply_to("second").await.unwrap();

        // The second call carries no trace of the first.
        let seen = service.provider.seen.lock().await;
        assert_eq!(seen[1].len(), 2);
        assert_eq!(seen[1][1].content, "second");
    }

    #[tokio::test]
    async fn test_provider_error_becomes_fallback_reply() {
        let service = AiService::new(MockProvider::new(true), "be nice".to_string(), config());

        let reply = service.reply_or_fallback("hello?").await;
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_reply_to_propagates_provider_error() {
        let service = AiService::new(MockProvider::new(true), "be nice".to_string(), config());
        assert!(service.reply_to("hello?").await.is_err());
    }
}
