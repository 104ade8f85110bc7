mod commands;
mod config;
mod context;
mod decide;
mod event;
mod handler;
mod helper;
mod logging;
mod parse;
mod persistent_state;
mod plugin;
mod settings;
mod volatile_state;

use serenity::{all::GatewayIntents, Client};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = crate::config::Config::load().await?;
    let token = cfg.general.discord_token.clone();
    let store = crate::persistent_state::SettingsStore::open(&cfg.general.database_url).await?;

    // Only ever loaded here; afterwards the command handlers keep it in step with the store.
    let targets = crate::volatile_state::SettingsCache::load(store.get_all().await?);
    crate::log_internal!("Loaded {} target(s) from the database", targets.len());

    let handler = handler::Handler::new(cfg, store, targets);

    // Things we want discord to tell us about.
    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    Client::builder(&token, intents)
        .event_handler(handler)
        .await?
        .start()
        .await
        .map_err(Into::into)
}
