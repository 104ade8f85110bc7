use crate::{event::*, plugin::*};
use anyhow::Result;

/// Keeps the bot from annoying itself in an endless loop.
pub struct IgnoreSelf;

#[serenity::async_trait]
impl Plugin for IgnoreSelf {
    fn name(&self) -> &'static str {
        "ignore_self"
    }

    fn usage(&self) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Message(msg) = event else {
            return Ok(EventHandled::No);
        };

        if msg.author.id == ctx.cache.current_user().id {
            Ok(EventHandled::Yes)
        } else {
            Ok(EventHandled::No)
        }
    }
}
