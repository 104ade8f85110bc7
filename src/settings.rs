//! Per-target annoyance settings

use anyhow::{anyhow, Result};
use serenity::all::UserId;
use std::{collections::BTreeSet, fmt, str::FromStr};

/// Everything the bot knows about one annoyance target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetSettings {
    pub user_id: UserId,
    pub specific_replies: Vec<String>,
    pub specific_reactions: Vec<String>,
    pub annoy_methods: AnnoyMethods,
    pub message_mode: MessageMode,
}

impl TargetSettings {
    /// Settings for a freshly added target.  Mirrors the column defaults in the store.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            specific_replies: Vec::new(),
            specific_reactions: Vec::new(),
            annoy_methods: AnnoyMethods::default(),
            message_mode: MessageMode::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnnoyMethod {
    Message,
    Reaction,
}

impl AnnoyMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnoyMethod::Message => "message",
            AnnoyMethod::Reaction => "reaction",
        }
    }
}

impl FromStr for AnnoyMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "message" => Ok(AnnoyMethod::Message),
            "reaction" => Ok(AnnoyMethod::Reaction),
            other => Err(anyhow!("Unknown annoy method `{}`", other)),
        }
    }
}

/// Enabled annoyance methods.  Stored as a comma-joined string such as `message,reaction`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnoyMethods(BTreeSet<AnnoyMethod>);

impl AnnoyMethods {
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Build from the two toggles exposed by `/setannoyancemethods`.
    pub fn from_flags(messages: bool, reactions: bool) -> Self {
        let mut methods = Self::empty();
        if messages {
            methods.insert(AnnoyMethod::Message);
        }
        if reactions {
            methods.insert(AnnoyMethod::Reaction);
        }
        methods
    }

    pub fn insert(&mut self, method: AnnoyMethod) {
        self.0.insert(method);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AnnoyMethod> + '_ {
        self.0.iter().copied()
    }

    pub fn encode(&self) -> String {
        self.iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Decode the stored representation.  Returns the methods along with any tokens that could
    /// not be understood so the caller can report them.
    pub fn decode(s: &str) -> (Self, Vec<String>) {
        let mut methods = Self::empty();
        let mut unknown = Vec::new();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.parse::<AnnoyMethod>() {
                Ok(method) => methods.insert(method),
                Err(_) => unknown.push(token.to_owned()),
            }
        }
        (methods, unknown)
    }
}

impl Default for AnnoyMethods {
    fn default() -> Self {
        Self::from_flags(true, true)
    }
}

impl fmt::Display for AnnoyMethods {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let joined = self
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}", joined)
    }
}

/// Which pools a text annoyance may be drawn from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageMode {
    SpecificOnly,
    RandomOnly,
    #[default]
    Both,
}

impl MessageMode {
    pub const ALL: [MessageMode; 3] = [
        MessageMode::SpecificOnly,
        MessageMode::RandomOnly,
        MessageMode::Both,
    ];

    /// Stored and slash-command choice value
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageMode::SpecificOnly => "specific_only",
            MessageMode::RandomOnly => "random_only",
            MessageMode::Both => "both",
        }
    }

    /// Human facing label
    pub fn label(&self) -> &'static str {
        match self {
            MessageMode::SpecificOnly => "Specific Message Only",
            MessageMode::RandomOnly => "Random Messages Only",
            MessageMode::Both => "Both Specific and Random",
        }
    }
}

impl FromStr for MessageMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        MessageMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown message mode `{}`", s))
    }
}

impl fmt::Display for MessageMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_encode_in_stable_order() {
        let mut methods = AnnoyMethods::empty();
        methods.insert(AnnoyMethod::Reaction);
        methods.insert(AnnoyMethod::Message);
        assert_eq!(methods.encode(), "message,reaction");
        assert_eq!(AnnoyMethods::empty().encode(), "");
    }

    #[test]
    fn methods_decode_reports_unknown_tokens() {
        let (methods, unknown) = AnnoyMethods::decode("reaction, carrier-pigeon,,");
        assert_eq!(methods, AnnoyMethods::from_flags(false, true));
        assert_eq!(unknown, vec!["carrier-pigeon".to_owned()]);
    }

    #[test]
    fn message_mode_parses_stored_values() {
        for mode in MessageMode::ALL {
            assert_eq!(mode.as_str().parse::<MessageMode>().unwrap(), mode);
        }
        assert!("sometimes".parse::<MessageMode>().is_err());
    }

    #[test]
    fn new_target_has_defaults() {
        let settings = TargetSettings::new(UserId::new(42));
        assert!(settings.specific_replies.is_empty());
        assert!(settings.specific_reactions.is_empty());
        assert_eq!(settings.annoy_methods, AnnoyMethods::from_flags(true, true));
        assert_eq!(settings.message_mode, MessageMode::Both);
    }
}
