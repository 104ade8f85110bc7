use crate::{commands::Reply, event::*, helper::*, plugin::*};
use anyhow::Result;
use serenity::all::CreateCommand;

pub struct Help;

#[serenity::async_trait]
impl Plugin for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn usage(&self) -> Option<String> {
        Some(format!("/{} - show this help message", self.name()))
    }

    fn command(&self) -> Option<CreateCommand> {
        Some(CreateCommand::new(self.name()).description("List the annoyance commands."))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some(cmd) = event.is_slash_cmd(self.name()) else {
            return Ok(EventHandled::No);
        };

        let mut reply = String::new();
        reply.push_str("```\n");
        reply.push_str("Commands:\n");
        for plugin in crate::plugin::plugins() {
            if let Some(usage) = plugin.usage() {
                reply.push_str(&usage);
                reply.push('\n');
            }
        }
        reply.push_str("```\n");

        cmd.respond(ctx, Reply::private(reply)).await?;
        Ok(EventHandled::Yes)
    }
}
