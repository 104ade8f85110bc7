use crate::{commands, event::*, helper::*, plugin::*};
use anyhow::{anyhow, Result};
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

pub struct SetTarget;

#[serenity::async_trait]
impl Plugin for SetTarget {
    fn name(&self) -> &'static str {
        "settarget"
    }

    fn usage(&self) -> Option<String> {
        Some(format!("/{} <user> - add a user to the annoyance list", self.name()))
    }

    fn command(&self) -> Option<CreateCommand> {
        Some(
            CreateCommand::new(self.name())
                .description("Add a user to the annoyance list.")
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::User,
                        "user",
                        "The user to add to the annoyance list.",
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
        let reply = commands::set_target(ctx.store, ctx.targets, user).await;

        cmd.respond(ctx, reply).await?;
        Ok(EventHandled::Yes)
    }
}
