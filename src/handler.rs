use crate::{
    config::Config, context::Context, event::Event, persistent_state::SettingsStore,
    volatile_state::SettingsCache,
};
use serenity::all::{Interaction, Message, Ready};
use tokio::sync::RwLock;

/// Discord event handler
pub struct Handler {
    cfg: Config,
    store: SettingsStore,
    targets: RwLock<SettingsCache>,
}

impl<'a> Handler {
    pub fn new(cfg: Config, store: SettingsStore, targets: SettingsCache) -> Self {
        Self {
            cfg,
            store,
            targets: RwLock::new(targets),
        }
    }

    fn ctx(&'a self, discord_ctx: &'a serenity::all::Context) -> Context<'a> {
        Context {
            cfg: &self.cfg,
            store: &self.store,
            targets: &self.targets,
            cache: &discord_ctx.cache,
            http: &discord_ctx.http,
            cache_http: discord_ctx,
        }
    }
}

#[serenity::async_trait]
impl serenity::all::EventHandler for Handler {
    async fn ready(&self, discord_ctx: serenity::all::Context, ready: Ready) {
        Event::Ready(ready).handle(self.ctx(&discord_ctx)).await;
    }

    async fn message(&self, discord_ctx: serenity::all::Context, msg: Message) {
        Event::Message(msg).handle(self.ctx(&discord_ctx)).await;
    }

    async fn interaction_create(&self, discord_ctx: serenity::all::Context, interaction: Interaction) {
        // Only slash commands are registered, so nothing else should arrive.
        if let Interaction::Command(cmd) = interaction {
            Event::Command(cmd).handle(self.ctx(&discord_ctx)).await;
        }
    }
}
