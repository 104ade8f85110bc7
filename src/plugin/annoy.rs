use crate::{
    decide::{decide, Action},
    event::*,
    helper::is_permission_error,
    log_error, log_internal,
    logging::*,
    plugin::*,
};
use anyhow::Result;
use serenity::all::{Message, ReactionType};

/// Replies to or reacts on messages from configured targets.
pub struct Annoy;

#[serenity::async_trait]
impl Plugin for Annoy {
    fn name(&self) -> &'static str {
        "annoy"
    }

    fn usage(&self) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Message(msg) = event else {
            return Ok(EventHandled::No);
        };

        // The thread-local RNG must not live across an await, so only the settings are carried
        // out of the cache.
        let settings = ctx.targets.read().await.get(msg.author.id).cloned();
        let action = decide(
            settings.as_ref(),
            &ctx.cfg.pools.random_messages,
            &ctx.cfg.pools.random_emojis,
            &mut rand::thread_rng(),
        );

        let Some(action) = action else {
            return Ok(EventHandled::No);
        };

        // Failing to annoy someone is never worth telling them about.
        if let Err(e) = perform(ctx, msg, &action).await {
            if is_permission_error(&e) {
                log_error!(
                    "Lacked permissions to annoy {} in {}",
                    msg.author.color(),
                    msg.channel_id.color(ctx.http).await,
                );
            } else {
                log_error!("An error occurred during annoyance: {}", e);
            }
        }

        Ok(EventHandled::Yes)
    }
}

async fn perform(ctx: &Context<'_>, msg: &Message, action: &Action) -> serenity::Result<()> {
    match action {
        Action::SendMessage(text) => {
            msg.channel_id.say(ctx.http, text).await?;
            log_internal!(
                "Replied to {} in {} with a message",
                msg.author.color(),
                msg.channel_id.color(ctx.http).await,
            );
        }
        Action::AddReaction(emoji) => {
            let reaction = ReactionType::try_from(emoji.as_str())
                .unwrap_or_else(|_| ReactionType::Unicode(emoji.clone()));
            msg.react(ctx.cache_http, reaction).await?;
            log_internal!(
                "Reacted to {} in {} with {}",
                msg.author.color(),
                msg.channel_id.color(ctx.http).await,
                emoji,
            );
        }
    }
    Ok(())
}
