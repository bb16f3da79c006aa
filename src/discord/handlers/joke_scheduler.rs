// Daily joke poster - fires once at ready, then every 24 hours.
//
// The interval does not correct for drift and is not persisted: a restart
// posts immediately and resets the clock.

use crate::core::jokes::JokeService;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

const JOKE_INTERVAL: Duration = Duration::from_secs(60 * 60 * 24);

/// Spawned once from the ready hook.
pub fn spawn_joke_loop(http: Arc<serenity::Http>, channel_id: u64, jokes: JokeService) {
    tokio::spawn(async move {
        loop {
            post_joke(&http, channel_id, &jokes).await;
            sleep(JOKE_INTERVAL).await;
        }
    });
}

async fn post_joke(http: &serenity::Http, channel_id: u64, jokes: &JokeService) {
    // Resolve the channel at fire time, not cached: if it is gone this fire
    // is a logged no-op and the loop keeps ticking.
    let channel = match http.get_channel(serenity::ChannelId::new(channel_id)).await {
        Ok(channel) => channel,
        Err(source) => {
            tracing::warn!("Joke channel {} unavailable: {}", channel_id, source);
            return;
        }
    };

    let text = format!("😂 **Daily Joke Time!**\n{}", jokes.random_joke());
    if let Err(source) = channel.id().say(http, text).await {
        tracing::warn!("Failed to post daily joke: {}", source);
    }
}
