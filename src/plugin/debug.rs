use crate::{event::*, log_event, logging::*, plugin::*};
use anyhow::Result;

/// Prints debug information about event to stdout
pub struct Debug;

#[serenity::async_trait]
impl Plugin for Debug {
    fn name(&self) -> &'static str {
        "debug"
    }

    fn usage(&self) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        match event {
            Event::Ready(ready) => {
                log_event!(
                    "Connected to {} server(s) as {}",
                    ready.guilds.len(),
                    ctx.cache.current_user().color(),
                );
            }
            Event::Message(msg) => {
                log_event!(
                    "{}{}{}{}{}{} {}",
                    msg.guild_id.color(ctx.http).await,
                    Glue {}.color(),
                    msg.channel_id.color(ctx.http).await,
                    Glue {}.color(),
                    msg.author.color(),
                    Glue {}.color(),
                    msg.content,
                );
            }
            Event::Command(cmd) => {
                let options = cmd
                    .data
                    .options
                    .iter()
                    .map(|option| format!("{}={:?}", option.name, option.value))
                    .collect::<Vec<_>>()
                    .join(" ");

                log_event!(
                    "{}{}{}{}{} ran /{} {}",
                    cmd.guild_id.color(ctx.http).await,
                    Glue {}.color(),
                    cmd.channel_id.color(ctx.http).await,
                    Glue {}.color(),
                    cmd.user.color(),
                    cmd.data.name,
                    options,
                );
            }
        }

        Ok(EventHandled::No)
    }
}
