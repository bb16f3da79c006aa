// The per-message pipeline, in processing order: bot-author filter, guild
// filter, profanity filter, primary-channel gate, prefix dispatch, AI bridge.

use crate::core::commands::Command;
use crate::discord::{commands, Data, Error};
use poise::serenity_prelude as serenity;
use poise::serenity_prelude::Mentionable;

/// Reply used instead of an outbound call when no API key is configured.
const AI_NOT_CONFIGURED_REPLY: &str =
    "Hey! 😄 I'm Moses Bones bot — chat with me or use `!help` / `!joke`! (AI not configured yet.)";

pub async fn handle_message(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
) -> Result<(), Error> {
    // Ignore bot messages (including our own)
    if msg.author.bot {
        return Ok(());
    }

    // Ignore DMs
    let Some(guild_id) = msg.guild_id else {
        return Ok(());
    };

    // The profanity filter runs for every visible channel, before the
    // channel gate and before command parsing.
    if data.filter.is_violation(&msg.content) {
        handle_violation(ctx, msg, guild_id.get(), data).await;
        return Ok(());
    }

    // Only handle bot stuff in the configured channel.
    if msg.channel_id.get() != data.config.primary_channel_id {
        return Ok(());
    }

    // Any prefixed message short-circuits the AI bridge, recognized or not.
    if let Some(command) = Command::parse(&msg.content, &data.config.prefix) {
        return commands::execute(ctx, msg, data, command).await;
    }

    ai_reply(ctx, msg, data).await;
    Ok(())
}

/// Delete (best-effort), post the warning notice, record the warn.
async fn handle_violation(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    guild_id: u64,
    data: &Data,
) {
    if let Err(source) = msg.delete(&ctx.http).await {
        tracing::warn!("Failed to delete filtered message: {}", source);
    }

    let notice = format!("{}, chill bro 😅— no bad words here!", msg.author.mention());
    if let Err(source) = msg.channel_id.say(&ctx.http, notice).await {
        tracing::warn!("Failed to send profanity notice: {}", source);
    }

    let user_id = msg.author.id.get();
    match data.warns.warn(guild_id, user_id).await {
        Ok(count) => {
            tracing::info!(guild_id, user_id, count, "Recorded profanity warning");
        }
        Err(source) => {
            tracing::error!("Failed to record profanity warning: {}", source);
        }
    }
}

async fn ai_reply(ctx: &serenity::Context, msg: &serenity::Message, data: &Data) {
    let Some(ai) = data.ai.as_ref() else {
        if let Err(source) = msg.reply(&ctx.http, AI_NOT_CONFIGURED_REPLY).await {
            tracing::warn!("Failed to send AI-not-configured reply: {}", source);
        }
        return;
    };

    // Errors never escape this call; it substitutes the fallback reply.
    let reply = ai.reply_or_fallback(&msg.content).await;
    if let Err(source) = msg.reply(&ctx.http, reply).await {
        tracing::warn!("Failed to send AI reply: {}", source);
    }
}
