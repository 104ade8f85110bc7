use crate::{commands, event::*, helper::*, plugin::*, settings::MessageMode};
use anyhow::{anyhow, Result};
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

pub struct SetMessageMode;

#[serenity::async_trait]
impl Plugin for SetMessageMode {
    fn name(&self) -> &'static str {
        "setmessagemode"
    }

    fn usage(&self) -> Option<String> {
        Some(format!(
            "/{} <user> <mode> - pick messages from specific, random, or both",
            self.name()
        ))
    }

    fn command(&self) -> Option<CreateCommand> {
        let mode = MessageMode::ALL.into_iter().fold(
            CreateCommandOption::new(
                CommandOptionType::String,
                "mode",
                "Choose how messages are selected.",
            )
            .required(true),
            |option, mode| option.add_string_choice(mode.label(), mode.as_str()),
        );

        Some(
            CreateCommand::new(self.name())
                .description("Configure how text messages are chosen for a user.")
                .add_option(target_option())
                .add_option(mode),
        )
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some(cmd) = event.is_slash_cmd(self.name()) else {
            return Ok(EventHandled::No);
        };

        let user = cmd
            .user_option("user")
            .ok_or(anyhow!("/{} invoked without a user", self.name()))?;
        let mode: MessageMode = cmd
            .str_option("mode")
            .ok_or(anyhow!("/{} invoked without a mode", self.name()))?
            .parse()?;
        let reply = commands::set_message_mode(ctx.store, ctx.targets, user, mode).await;

        cmd.respond(ctx, reply).await?;
        Ok(EventHandled::Yes)
    }
}
