// Welcome handler - greets each new member in the configured channel.

use crate::discord::{Data, Error};
use poise::serenity_prelude as serenity;

pub async fn handle_member_join(
    ctx: &serenity::Context,
    member: &serenity::Member,
    data: &Data,
) -> Result<(), Error> {
    let channel_id = serenity::ChannelId::new(data.config.welcome_channel_id);

    // Missing or inaccessible channel is a no-op, not an error.
    let channel = match ctx.http.get_channel(channel_id).await {
        Ok(channel) => channel,
        Err(source) => {
            tracing::warn!("Welcome channel {} unavailable: {}", channel_id, source);
            return Ok(());
        }
    };

    channel
        .id()
        .say(
            &ctx.http,
            format!(
                "🎉 Welcome **{}** to Moses Bones! Make yourself at home 😄🔥",
                member.user.name
            ),
        )
        .await?;
    Ok(())
}
