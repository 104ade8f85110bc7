use crate::{commands, event::*, helper::*, plugin::*};
use anyhow::{anyhow, Result};
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

pub struct SetReactions;

#[serenity::async_trait]
impl Plugin for SetReactions {
    fn name(&self) -> &'static str {
        "setannoyancereaction"
    }

    fn usage(&self) -> Option<String> {
        Some(format!(
            "/{} <user> [emojis] - set specific reactions, separated by `,`. Leave empty to clear.",
            self.name()
        ))
    }

    fn command(&self) -> Option<CreateCommand> {
        Some(
            CreateCommand::new(self.name())
                .description("Set specific emoji reactions to annoy a user with.")
                .add_option(target_option())
                .add_option(CreateCommandOption::new(
                    CommandOptionType::String,
                    "emojis",
                    "Emojis separated by ',' (e.g. 😂, <:name:id>). Leave empty to clear.",
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
        let emojis = cmd.str_option("emojis");
        let reply = commands::set_reactions(ctx.store, ctx.targets, user, emojis).await;

        cmd.respond(ctx, reply).await?;
        Ok(EventHandled::Yes)
    }
}
