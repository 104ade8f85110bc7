//! Colored terminal logging.
//!
//! Three line prefixes: `*` for gateway events, `+` for what the bot did on its own, and `!` for
//! failures (written to stderr).  Names of Discord entities get their own colors through
//! [`PrintColor`] and [`AsyncPrintColor`].

use serenity::all::{ChannelId, CurrentUser, GuildId, Http, User};
use std::fmt::Display;
use std::io::IsTerminal;
use std::sync::{Arc, LazyLock};

pub enum Color {
    Default,
    Event,
    Internal,
    Error,
    User,
    Channel,
    Guild,
    Glue,
}

impl Color {
    fn code(&self) -> &'static str {
        match self {
            Color::Default => "\x1b[0m",
            Color::Event => "\x1b[33m",
            Color::Internal => "\x1b[35m",
            Color::Error => "\x1b[31m",
            Color::User => "\x1b[32m",
            Color::Channel => "\x1b[36m",
            Color::Guild => "\x1b[38;5;33m",
            Color::Glue => "\x1b[90m",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // Escape codes only make sense when both log streams end up on a terminal.
        static COLORED: LazyLock<bool> =
            LazyLock::new(|| std::io::stdout().is_terminal() && std::io::stderr().is_terminal());

        if *COLORED {
            f.write_str(self.code())
        } else {
            Ok(())
        }
    }
}

/// `text` wrapped in `color`, resetting afterwards.
pub fn paint(color: Color, text: impl Display) -> String {
    format!("{}{}{}", color, text, Color::Default)
}

/// Shared body of the `log_*` macros: a colored marker, then the formatted message.
#[doc(hidden)]
#[macro_export]
macro_rules! log_line {
    ($print:ident, $color:ident, $marker:literal, $($arg:tt)*) => {{
        $print!(
            "{}{}{} {}",
            $crate::logging::Color::$color,
            $marker,
            $crate::logging::Color::Default,
            format_args!($($arg)*)
        )
    }};
}

/// Something Discord told us about.
#[macro_export]
macro_rules! log_event {
    ($($arg:tt)*) => {
        $crate::log_line!(println, Event, "*", $($arg)*)
    };
}

/// Something the bot did: a reply sent, a target stored, a column migrated.
#[macro_export]
macro_rules! log_internal {
    ($($arg:tt)*) => {
        $crate::log_line!(println, Internal, "+", $($arg)*)
    };
}

/// A failure that was handled and did not stop the bot.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::log_line!(eprintln, Error, "!", $($arg)*)
    };
}

pub trait PrintColor {
    fn color(&self) -> String;
}

/// Colored names that need a lookup against Discord first.
#[serenity::async_trait]
pub trait AsyncPrintColor {
    async fn color(&self, http: &Arc<Http>) -> String;
}

/// Separator between guild, channel and author in event lines.
pub struct Glue;

impl PrintColor for Glue {
    fn color(&self) -> String {
        paint(Color::Glue, ":")
    }
}

impl PrintColor for CurrentUser {
    fn color(&self) -> String {
        paint(Color::User, &self.name)
    }
}

impl PrintColor for User {
    fn color(&self) -> String {
        paint(Color::User, self.display_name())
    }
}

#[serenity::async_trait]
impl AsyncPrintColor for ChannelId {
    async fn color(&self, http: &Arc<Http>) -> String {
        match self.name(http).await {
            Ok(name) => paint(Color::Channel, format!("#{}", name)),
            Err(_) => paint(Color::Channel, format!("<channel-{}>", self)),
        }
    }
}

#[serenity::async_trait]
impl AsyncPrintColor for Option<GuildId> {
    async fn color(&self, http: &Arc<Http>) -> String {
        let Some(guild_id) = self else {
            return paint(Color::Guild, "<direct-message>");
        };

        match guild_id.to_partial_guild(http).await {
            Ok(guild) => paint(Color::Guild, guild.name),
            Err(_) => paint(Color::Guild, format!("<guild-{}>", guild_id)),
        }
    }
}
