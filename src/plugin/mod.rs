use crate::event::EventHandled;
use anyhow::Result;
use serenity::all::CreateCommand;

pub(crate) use crate::context::Context;

mod annoy;
mod debug;
mod help;
mod ignore_self;
mod list_targets;
mod ready;
mod remove_target;
mod set_message_mode;
mod set_methods;
mod set_reactions;
mod set_replies;
mod set_target;

#[serenity::async_trait]
pub trait Plugin: Sync + Send {
    /// Plugin name.  For slash command plugins this is also the command name.
    fn name(&self) -> &'static str;
    /// Help message line.  None if no help message
    fn usage(&self) -> Option<String>;
    /// Slash command to register with Discord, if the plugin provides one
    fn command(&self) -> Option<CreateCommand> {
        None
    }
    /// Potentially handle event.  Returns:
    /// - Ok(EventHandled::Yes) if the event has been handled and no other plugin should attempt to
    /// handle it
    /// - Ok(EventHandled::No) if another plugin should attempt to handle the event
    /// - Err if an error occurred
    async fn handle(&self, ctx: &Context, event: &crate::event::Event) -> Result<EventHandled>;
}

/// Ordered list of available plugins
pub fn plugins() -> Vec<Box<dyn Plugin>> {
    use crate::plugin::*;

    vec![
        // Core bot operations
        Box::new(debug::Debug),
        Box::new(ready::PluginReady),
        Box::new(ignore_self::IgnoreSelf),
        Box::new(help::Help),
        // Target configuration
        Box::new(set_target::SetTarget),
        Box::new(set_replies::SetReplies),
        Box::new(set_reactions::SetReactions),
        Box::new(set_methods::SetMethods),
        Box::new(set_message_mode::SetMessageMode),
        Box::new(remove_target::RemoveTarget),
        Box::new(list_targets::ListTargets),
        // Annoy whoever is left.
        // Keep last.
        Box::new(annoy::Annoy),
    ]
}

/// `user` option shared by every per-target command
fn target_option() -> serenity::all::CreateCommandOption {
    serenity::all::CreateCommandOption::new(
        serenity::all::CommandOptionType::User,
        "user",
        "The target user.",
    )
    .required(true)
}
