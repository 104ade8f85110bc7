use crate::{commands, event::*, helper::*, plugin::*};
use anyhow::{anyhow, Result};
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

pub struct SetMethods;

#[serenity::async_trait]
impl Plugin for SetMethods {
    fn name(&self) -> &'static str {
        "setannoyancemethods"
    }

    fn usage(&self) -> Option<String> {
        Some(format!(
            "/{} <user> <messages> <reactions> - choose which annoyances to use",
            self.name()
        ))
    }

    fn command(&self) -> Option<CreateCommand> {
        Some(
            CreateCommand::new(self.name())
                .description("Configure which annoyance methods to use for a user.")
                .add_option(target_option())
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::Boolean,
                        "messages",
                        "Whether to use text messages to annoy them.",
                    )
                    .required(true),
                )
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::Boolean,
                        "reactions",
                        "Whether to use emoji reactions to annoy them.",
                    )
                    .required(true),
                ),
        )
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some(cmd) = event.is_slash_cmd(self.name()) else {
            return Ok(EventHandled::No);
        };

        let user = cmd
            .user_option("user")
            .ok_or(anyhow!("/{} invoked without a user", self.name()))?;
        let messages = cmd.bool_option("messages").unwrap_or(false);
        let reactions = cmd.bool_option("reactions").unwrap_or(false);
        let reply = commands::set_methods(ctx.store, ctx.targets, user, messages, reactions).await;

        cmd.respond(ctx, reply).await?;
        Ok(EventHandled::Yes)
    }
}
