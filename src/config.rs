use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

const CONFIG_PATH_REL_HOME: &str = ".config/annoybot/config.toml";

/// Bot configuration
///
/// Read from an optional TOML file, then overridden by the environment (including `.env`).
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub pools: Pools,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct General {
    pub discord_token: String,
    /// Register slash commands only in this guild.  Guild commands show up immediately, global
    /// ones can take a while.
    pub dev_guild_id: Option<u64>,
    pub database_url: String,
}

/// Content used when a target has nothing specific configured
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Pools {
    pub random_messages: Vec<String>,
    pub random_emojis: Vec<String>,
}

impl Default for General {
    fn default() -> Self {
        Self {
            discord_token: String::new(),
            dev_guild_id: None,
            database_url: "sqlite://annoy_o_matic.db".to_owned(),
        }
    }
}

impl Default for Pools {
    fn default() -> Self {
        let random_messages = ["You dopehead", "Bad Boy", "Dingus"];
        let random_emojis = [
            "😂", "👍", "❤️", "🤔", "😁", "😆", "😅", "🤣", "😊", "😇", "😉", "😌", "😍", "🥰",
            "😘", "😗", "😙", "😚", "😋", "😛", "😝", "😜", "🤪", "🤨", "🧐", "🤓", "😎", "🤩",
            "🥳", "😏", "😒", "😞", "😔", "😟", "😕", "🙁", "☹️", "😣", "😖", "😫", "😩", "🥺",
            "😢", "😭", "😤", "😠", "😡", "🤬", "🤯", "😳", "🥵", "🥶", "😱", "😨", "😰", "😥",
            "😓", "🤗", "🤭", "🤫", "🤥", "😶", "😐", "😑", "😬", "🙄", "😯", "😦", "😧", "😮",
            "😲", "🥱", "😴", "🤤", "😪", "😵", "🤐", "🥴", "🤢", "🤮", "🤧", "😷", "🤒", "🤕",
            "🤑", "🤠", "😈", "👿", "👹", "👺", "🤡", "💩", "👻", "💀", "☠️", "👽", "👾", "🤖",
            "🎃", "😺", "😸", "😹", "😻", "😼", "😽", "🙀", "😿", "😾",
        ];

        Self {
            random_messages: random_messages.iter().map(|s| s.to_string()).collect(),
            random_emojis: random_emojis.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    fn config_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|p| p.join(CONFIG_PATH_REL_HOME))
            .ok_or(anyhow!("Could not find home directory"))
    }

    pub async fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let contents = match tokio::fs::File::open(&path).await {
            Ok(mut file) => {
                let mut contents = String::new();
                file.read_to_string(&mut contents).await.map_err(|e| {
                    anyhow!(
                        "Could not read configuration at `{}`: {}",
                        path.to_string_lossy(),
                        e
                    )
                })?;
                Some(contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                bail!(
                    "Could not open configuration at `{}`: {}",
                    path.to_string_lossy(),
                    e
                )
            }
        };

        // A missing `.env` is fine, the variables may be set some other way.
        dotenv::dotenv().ok();

        Self::from_sources(contents.as_deref(), |key| std::env::var(key).ok()).map_err(|e| {
            anyhow!(
                "Invalid configuration (`{}` and environment): {}",
                path.to_string_lossy(),
                e
            )
        })
    }

    /// Build from file contents (if any) and an environment lookup, then validate.
    pub fn from_sources(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config: Config = match file {
            Some(contents) => toml::from_str(contents)
                .map_err(|e| anyhow!("Could not parse configuration: {}", e))?,
            None => Config::default(),
        };

        if let Some(token) = env("DISCORD_TOKEN") {
            config.general.discord_token = token;
        }
        if let Some(guild) = env("DEV_GUILD_ID").filter(|g| !g.trim().is_empty()) {
            let guild = guild
                .trim()
                .parse::<u64>()
                .map_err(|e| anyhow!("DEV_GUILD_ID `{}` is not a guild id: {}", guild, e))?;
            config.general.dev_guild_id = Some(guild);
        }
        if let Some(url) = env("DATABASE_URL") {
            config.general.database_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.general.discord_token.trim().is_empty() {
            bail!("DISCORD_TOKEN is not set in the environment or configuration file");
        }
        if self.general.dev_guild_id == Some(0) {
            bail!("dev_guild_id must not be 0");
        }
        if self.pools.random_emojis.is_empty() {
            bail!("pools.random_emojis must contain at least one emoji");
        }
        Ok(())
    }
}
