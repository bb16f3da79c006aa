// Discord layer - event handlers and command execution.
//
// This layer is THIN: extract primitives from Discord types, call core
// services, format the replies. All business logic lives in `core/`.

#[path = "handlers/message_handler.rs"]
pub mod messages;

#[path = "handlers/command_exec.rs"]
pub mod commands;

#[path = "handlers/welcome.rs"]
pub mod welcome;

#[path = "handlers/joke_scheduler.rs"]
pub mod jokes;

use crate::core::ai::AiService;
use crate::core::filter::ProfanityFilter;
use crate::core::jokes::JokeService;
use crate::core::warns::WarnService;
use crate::infra::ai::GroqClient;
use crate::infra::warns::JsonWarnStore;
use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Channel routing and command prefix, loaded once at startup.
pub struct BotConfig {
    pub primary_channel_id: u64,
    pub welcome_channel_id: u64,
    pub joke_channel_id: u64,
    pub prefix: String,
}

/// Data that's shared across all event handlers.
/// This is where we store our services and configuration.
pub struct Data {
    pub config: BotConfig,
    pub warns: Arc<WarnService<JsonWarnStore>>,
    pub filter: ProfanityFilter,
    pub jokes: JokeService,
    /// `None` when no API key is configured; the bridge then answers with a
    /// static notice instead of calling out.
    pub ai: Option<Arc<AiService<GroqClient>>>,
}
