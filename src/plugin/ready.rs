use crate::{event::*, log_error, log_internal, plugin::*};
use anyhow::Result;
use serenity::all::{Command, GuildId};

/// Registers slash commands once the connection to Discord is ready.
pub struct PluginReady;

#[serenity::async_trait]
impl Plugin for PluginReady {
    fn name(&self) -> &'static str {
        "ready"
    }

    fn usage(&self) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Ready(_) = event else {
            return Ok(EventHandled::No);
        };

        let commands: Vec<_> = crate::plugin::plugins()
            .iter()
            .filter_map(|plugin| plugin.command())
            .collect();

        // Failing to sync leaves whatever was registered last time in place, so keep running.
        let synced = match ctx.cfg.general.dev_guild_id {
            Some(guild_id) => GuildId::new(guild_id).set_commands(ctx.http, commands).await,
            None => Command::set_global_commands(ctx.http, commands).await,
        };
        match synced {
            Ok(synced) => log_internal!("Synced {} command(s)", synced.len()),
            Err(e) => log_error!("Error syncing commands: {}", e),
        }

        Ok(EventHandled::Yes)
    }
}
