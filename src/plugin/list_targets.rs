use crate::{commands, event::*, helper::*, plugin::*};
use anyhow::Result;
use serenity::all::CreateCommand;

pub struct ListTargets;

#[serenity::async_trait]
impl Plugin for ListTargets {
    fn name(&self) -> &'static str {
        "listtargets"
    }

    fn usage(&self) -> Option<String> {
        Some(format!("/{} - list targets and their settings", self.name()))
    }

    fn command(&self) -> Option<CreateCommand> {
        Some(
            CreateCommand::new(self.name())
                .description("List all users currently being annoyed and their settings."),
        )
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some(cmd) = event.is_slash_cmd(self.name()) else {
            return Ok(EventHandled::No);
        };

        let http = ctx.http;
        let reply = commands::list_targets(ctx.store, |user_id| async move {
            user_id.display_name(http).await
        })
        .await;

        cmd.respond(ctx, reply).await?;
        Ok(EventHandled::Yes)
    }
}
