use crate::{commands, event::*, helper::*, plugin::*};
use anyhow::{anyhow, Result};
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

/// Curated messages for one target
pub struct SetReplies;

#[serenity::async_trait]
impl Plugin for SetReplies {
    fn name(&self) -> &'static str {
        "setannoyancemessage"
    }

    fn usage(&self) -> Option<String> {
        Some(format!(
            "/{} <user> [messages] - set specific messages, separated by `;`\n\
             |  Quote a message to keep a `;` inside it.  Leave empty to clear.",
            self.name()
        ))
    }

    fn command(&self) -> Option<CreateCommand> {
        Some(
            CreateCommand::new(self.name())
                .description("Set specific text messages to annoy a user with.")
                .add_option(target_option())
                .add_option(CreateCommandOption::new(
                    CommandOptionType::String,
                    "messages",
                    "Messages separated by ';'. Leave empty to clear.",
                )),
        )
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some(cmd) = event.is_slash_cmd(self.name()) else {
            return Ok(EventHandled::No);
        };

        let user = cmd
            .user_option("user")
            .ok_or(anyhow!("/{} invoked without a user", self.name()))?;
        let messages = cmd.str_option("messages");
        let reply = commands::set_messages(ctx.store, ctx.targets, user, messages).await;

        cmd.respond(ctx, reply).await?;
        Ok(EventHandled::Yes)
    }
}
