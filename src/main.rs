// This is the entry point of the Discord bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (JSON store, Groq API)
// - `discord/` = Discord-specific adapters (event handlers, command execution)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register event handlers and the joke scheduler

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::ai::{AiService, ChatConfig};
use crate::core::filter::ProfanityFilter;
use crate::core::jokes::JokeService;
use crate::core::warns::WarnService;
use crate::discord::{jokes as joke_scheduler, messages, welcome, BotConfig, Data, Error};
use crate::infra::ai::GroqClient;
use crate::infra::warns::JsonWarnStore;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a friendly and funny Discord bot for the Moses Bones server. \
    Reply casually, use short messages, add light jokes sometimes, never be rude.";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const WARNS_FILE: &str = "warns.json";

/// Event handler for Discord events.
///
/// Errors from individual handlers stop here: they are logged and that
/// event's processing simply ends. No crash, no reply.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            if let Err(source) = messages::handle_message(ctx, new_message, data).await {
                tracing::error!("Message handler error: {}", source);
            }
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            if let Err(source) = welcome::handle_member_join(ctx, new_member, data).await {
                tracing::error!("Welcome handler error: {}", source);
            }
        }
        _ => {}
    }

    Ok(())
}

/// Optional numeric channel id env var, falling back to the primary channel.
fn channel_id_or(var: &str, fallback: u64) -> u64 {
    match std::env::var(var) {
        Ok(value) => value
            .parse::<u64>()
            .unwrap_or_else(|_| panic!("{} must be a numeric channel id", var)),
        Err(_) => fallback,
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Required configuration: missing values are fatal before any handler
    // is registered.
    let token = std::env::var("DISCORD_TOKEN").expect(
        "Missing DISCORD_TOKEN environment variable! Create a .env file with your bot token.",
    );
    let primary_channel_id = std::env::var("CHANNEL_ID")
        .expect("Missing CHANNEL_ID environment variable! Set it to the primary chat channel id.")
        .parse::<u64>()
        .expect("CHANNEL_ID must be a numeric channel id");

    // Optional configuration, with defaults.
    let welcome_channel_id = channel_id_or("WELCOME_CHANNEL_ID", primary_channel_id);
    let joke_channel_id = channel_id_or("JOKE_CHANNEL_ID", primary_channel_id);
    let prefix = std::env::var("PREFIX").unwrap_or_else(|_| "!".to_string());

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Create our services with their dependencies.
    // This is the "composition root" where we wire everything together.

    let warn_store = JsonWarnStore::new(WARNS_FILE);
    let warn_service = Arc::new(WarnService::new(warn_store));

    // AI bridge is optional: without a key the bot answers with a static
    // notice and never calls out.
    let ai_service = match std::env::var("GROQ_API_KEY") {
        Ok(key) if !key.is_empty() => {
            let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
            let config = ChatConfig {
                model,
                max_tokens: 400,
                temperature: 0.8,
            };
            Some(Arc::new(AiService::new(
                GroqClient::new(key),
                SYSTEM_PROMPT.to_string(),
                config,
            )))
        }
        _ => {
            tracing::warn!("GROQ_API_KEY not set; AI replies are disabled");
            None
        }
    };

    // Create the data structure that will be shared across all handlers
    let data = Data {
        config: BotConfig {
            primary_channel_id,
            welcome_channel_id,
            joke_channel_id,
            prefix,
        },
        warns: Arc::clone(&warn_service),
        filter: ProfanityFilter::new(),
        jokes: JokeService::new(),
        ai: ai_service,
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            // All commands are prefix-parsed in the event handler; nothing to
            // register with Discord.
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, _framework| {
            Box::pin(async move {
                tracing::info!("Bot online as {}", ready.user.name);

                // Post one joke immediately, then every 24h.
                joke_scheduler::spawn_joke_loop(ctx.http.clone(), joke_channel_id, data.jokes);

                Ok(data)
            })
        })
        .build();

    // Create the client and start the bot
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .expect("Error creating client");

    client.start().await.expect("Error running bot");
}
