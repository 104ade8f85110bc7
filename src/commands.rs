//! Slash command behavior, independent of how the command arrived.
//!
//! Each handler validates, writes the store, then mirrors the write into the cache.  The cache
//! write lock is held for the whole sequence so commands never interleave, and the cache is only
//! touched once the store has accepted the change.

use crate::{
    log_error,
    parse::{parse_messages, parse_reactions},
    persistent_state::{SettingsStore, Upsert},
    settings::{AnnoyMethods, MessageMode, TargetSettings},
    volatile_state::SettingsCache,
};
use anyhow::Result;
use serenity::all::{Mentionable, UserId};
use std::future::Future;
use tokio::sync::RwLock;

/// Discord rejects messages longer than this many characters.
pub const MESSAGE_CHAR_LIMIT: usize = 2000;
const TRUNCATED_LENGTH: usize = 1900;
const TRUNCATION_MARKER: &str = "\n... (truncated)";

/// What to tell the person who ran a command
#[derive(Debug, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    /// Only visible to the invoking user
    pub ephemeral: bool,
}

impl Reply {
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: truncate(content.into()),
            ephemeral: false,
        }
    }

    pub fn private(content: impl Into<String>) -> Self {
        Self {
            content: truncate(content.into()),
            ephemeral: true,
        }
    }
}

fn truncate(content: String) -> String {
    if content.chars().count() <= MESSAGE_CHAR_LIMIT {
        return content;
    }
    let mut cut: String = content.chars().take(TRUNCATED_LENGTH).collect();
    cut.push_str(TRUNCATION_MARKER);
    cut
}

fn not_a_target(user: UserId) -> Reply {
    Reply::private(format!(
        "{} is not an annoyance target. Use `/settarget` first.",
        user.mention()
    ))
}

pub async fn set_target(store: &SettingsStore, targets: &RwLock<SettingsCache>, user: UserId) -> Reply {
    let mut cache = targets.write().await;

    match store.upsert_target(user).await {
        Ok(Upsert::Created) => {
            cache.insert(TargetSettings::new(user));
            Reply::public(format!(
                "Successfully added {} to the annoyance list. \
                 Use `/setannoyancemessage`, `/setannoyancereaction`, `/setannoyancemethods`, \
                 and `/setmessagemode` to configure their annoyances.",
                user.mention()
            ))
        }
        Ok(Upsert::AlreadyExists) => {
            // Added behind our back, e.g. by editing the database directly.
            if !cache.contains(user) {
                match store.get_settings(user).await {
                    Ok(Some(settings)) => cache.insert(settings),
                    Ok(None) => {}
                    Err(e) => log_error!("{}", e),
                }
            }
            Reply::private(format!(
                "{} is already an annoyance target. Use other commands to configure them.",
                user.mention()
            ))
        }
        Err(e) => {
            log_error!("{}", e);
            Reply::private(format!(
                "Failed to add {} as an annoyance target. Check bot logs for errors.",
                user.mention()
            ))
        }
    }
}

/// Run one store update for an existing target and mirror it into the cache.
///
/// On failure the returned `Err` holds the reply to send.
async fn update_target(
    targets: &RwLock<SettingsCache>,
    user: UserId,
    what: &str,
    store_update: impl Future<Output = Result<bool>>,
    apply: impl FnOnce(&mut TargetSettings),
) -> Result<(), Reply> {
    let mut cache = targets.write().await;
    let Some(settings) = cache.get_mut(user) else {
        return Err(not_a_target(user));
    };

    let failed = || {
        Reply::private(format!(
            "Failed to {} for {}. Check bot logs.",
            what,
            user.mention()
        ))
    };

    match store_update.await {
        Ok(true) => {
            apply(settings);
            Ok(())
        }
        Ok(false) => {
            log_error!("Target {} is cached but missing from the store", user);
            Err(failed())
        }
        Err(e) => {
            log_error!("{}", e);
            Err(failed())
        }
    }
}

pub async fn set_messages(
    store: &SettingsStore,
    targets: &RwLock<SettingsCache>,
    user: UserId,
    input: Option<&str>,
) -> Reply {
    let messages = parse_messages(input.unwrap_or_default());
    let stored = messages.clone();

    let result = update_target(
        targets,
        user,
        "set specific messages",
        store.set_specific_replies(user, &messages),
        |settings| settings.specific_replies = stored,
    )
    .await;

    match result {
        Err(reply) => reply,
        Ok(()) if messages.is_empty() => Reply::public(format!(
            "Successfully cleared specific messages for {}.",
            user.mention()
        )),
        Ok(()) => Reply::public(format!(
            "Successfully set specific messages for {}: {}",
            user.mention(),
            quote_all(&messages)
        )),
    }
}

pub async fn set_reactions(
    store: &SettingsStore,
    targets: &RwLock<SettingsCache>,
    user: UserId,
    input: Option<&str>,
) -> Reply {
    let input = input.unwrap_or_default();
    let reactions = parse_reactions(input);
    if reactions.is_empty() && !input.trim().is_empty() {
        return Reply::private(
            "Please provide valid emoji separated by commas, e.g. `😂, <:name:id>`.",
        );
    }
    let stored = reactions.clone();

    let result = update_target(
        targets,
        user,
        "set specific reactions",
        store.set_specific_reactions(user, &reactions),
        |settings| settings.specific_reactions = stored,
    )
    .await;

    match result {
        Err(reply) => reply,
        Ok(()) if reactions.is_empty() => Reply::public(format!(
            "Successfully cleared specific reactions for {}.",
            user.mention()
        )),
        Ok(()) => Reply::public(format!(
            "Successfully set specific reactions for {}: {}",
            user.mention(),
            reactions.join(" ")
        )),
    }
}

pub async fn set_methods(
    store: &SettingsStore,
    targets: &RwLock<SettingsCache>,
    user: UserId,
    messages: bool,
    reactions: bool,
) -> Reply {
    let methods = AnnoyMethods::from_flags(messages, reactions);
    if methods.is_empty() {
        return Reply::private(
            "You must enable at least one annoyance method (messages or reactions).",
        );
    }
    let stored = methods.clone();

    let result = update_target(
        targets,
        user,
        "update annoyance methods",
        store.set_methods(user, &methods),
        |settings| settings.annoy_methods = stored,
    )
    .await;

    match result {
        Err(reply) => reply,
        Ok(()) => Reply::public(format!(
            "Successfully set annoyance methods for {}: {}",
            user.mention(),
            methods
        )),
    }
}

pub async fn set_message_mode(
    store: &SettingsStore,
    targets: &RwLock<SettingsCache>,
    user: UserId,
    mode: MessageMode,
) -> Reply {
    let result = update_target(
        targets,
        user,
        "update message mode",
        store.set_message_mode(user, mode),
        |settings| settings.message_mode = mode,
    )
    .await;

    match result {
        Err(reply) => reply,
        Ok(()) => Reply::public(format!(
            "Successfully set message mode for {} to '{}'.",
            user.mention(),
            mode.label()
        )),
    }
}

pub async fn remove_target(
    store: &SettingsStore,
    targets: &RwLock<SettingsCache>,
    user: UserId,
) -> Reply {
    let mut cache = targets.write().await;

    match store.remove_target(user).await {
        Ok(true) => {
            cache.remove(user);
            Reply::public(format!(
                "Successfully removed {} from annoyance targets.",
                user.mention()
            ))
        }
        Ok(false) => Reply::private(format!(
            "{} was not found in the annoyance targets.",
            user.mention()
        )),
        Err(e) => {
            log_error!("{}", e);
            Reply::private(format!(
                "Failed to remove {} from annoyance targets. Check bot logs.",
                user.mention()
            ))
        }
    }
}

/// Describe every stored target.  `display_name` resolves a user id to something readable.
pub async fn list_targets<F, Fut>(store: &SettingsStore, display_name: F) -> Reply
where
    F: Fn(UserId) -> Fut,
    Fut: Future<Output = String>,
{
    let targets = match store.get_all().await {
        Ok(targets) => targets,
        Err(e) => {
            log_error!("{}", e);
            return Reply::private("Failed to list annoyance targets. Check bot logs.");
        }
    };

    if targets.is_empty() {
        return Reply::private("No users are currently being annoyed.");
    }

    let mut list = String::from("Currently annoying the following users:\n");
    for (user_id, settings) in &targets {
        let name = display_name(*user_id).await;
        list.push_str(&describe_target(&name, settings));
    }

    Reply::private(list)
}

fn describe_target(name: &str, settings: &TargetSettings) -> String {
    let or_none = |s: String| if s.is_empty() { "None".to_owned() } else { s };

    format!(
        "\n- **{}** (`{}`)\n  \
         - Specific Messages: {}\n  \
         - Specific Reactions: {}\n  \
         - Annoy Methods: {}\n  \
         - Message Mode: {}\n",
        name,
        settings.user_id,
        or_none(quote_all(&settings.specific_replies)),
        or_none(settings.specific_reactions.join(" ")),
        or_none(settings.annoy_methods.to_string()),
        settings.message_mode,
    )
}

fn quote_all(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("'{}'", item))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistent_state::tests::memory_store;

    async fn setup() -> (SettingsStore, RwLock<SettingsCache>) {
        (memory_store().await, RwLock::new(SettingsCache::default()))
    }

    fn user(id: u64) -> UserId {
        UserId::new(id)
    }

    #[tokio::test]
    async fn set_target_populates_store_and_cache() {
        let (store, targets) = setup().await;

        let reply = set_target(&store, &targets, user(1)).await;
        assert!(!reply.ephemeral);
        assert!(reply.content.contains("<@1>"));

        assert_eq!(
            targets.read().await.get(user(1)),
            Some(&TargetSettings::new(user(1)))
        );
        assert!(store.get_settings(user(1)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn set_target_twice_reports_existing() {
        let (store, targets) = setup().await;
        set_target(&store, &targets, user(1)).await;
        set_messages(&store, &targets, user(1), Some("hi")).await;

        let reply = set_target(&store, &targets, user(1)).await;
        assert!(reply.ephemeral);
        assert!(reply.content.contains("already"));
        assert_eq!(
            targets.read().await.get(user(1)).unwrap().specific_replies,
            vec!["hi".to_owned()]
        );
    }

    #[tokio::test]
    async fn set_target_adopts_targets_added_outside_the_bot() {
        let (store, targets) = setup().await;
        store.upsert_target(user(9)).await.unwrap();

        set_target(&store, &targets, user(9)).await;
        assert!(targets.read().await.contains(user(9)));
    }

    #[tokio::test]
    async fn updates_require_an_existing_target() {
        let (store, targets) = setup().await;

        for reply in [
            set_messages(&store, &targets, user(2), Some("hi")).await,
            set_reactions(&store, &targets, user(2), Some("😂")).await,
            set_methods(&store, &targets, user(2), true, false).await,
            set_message_mode(&store, &targets, user(2), MessageMode::RandomOnly).await,
        ] {
            assert!(reply.ephemeral);
            assert!(reply.content.contains("is not an annoyance target"));
        }
        assert_eq!(targets.read().await.len(), 0);
        assert_eq!(store.get_settings(user(2)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn messages_are_written_through() {
        let (store, targets) = setup().await;
        set_target(&store, &targets, user(3)).await;

        let reply = set_messages(&store, &targets, user(3), Some("Dingus; \"a; b\"")).await;
        assert!(!reply.ephemeral);

        let expected = vec!["Dingus".to_owned(), "a; b".to_owned()];
        assert_eq!(
            targets.read().await.get(user(3)).unwrap().specific_replies,
            expected
        );
        assert_eq!(
            store.get_settings(user(3)).await.unwrap().unwrap().specific_replies,
            expected
        );

        let reply = set_messages(&store, &targets, user(3), None).await;
        assert!(reply.content.contains("cleared"));
        assert!(targets
            .read()
            .await
            .get(user(3))
            .unwrap()
            .specific_replies
            .is_empty());
    }

    #[tokio::test]
    async fn unparseable_reactions_are_rejected_without_changes() {
        let (store, targets) = setup().await;
        set_target(&store, &targets, user(4)).await;
        set_reactions(&store, &targets, user(4), Some("🐸")).await;

        let reply = set_reactions(&store, &targets, user(4), Some("frog, toad")).await;
        assert!(reply.ephemeral);
        assert_eq!(
            targets.read().await.get(user(4)).unwrap().specific_reactions,
            vec!["🐸".to_owned()]
        );
        assert_eq!(
            store.get_settings(user(4)).await.unwrap().unwrap().specific_reactions,
            vec!["🐸".to_owned()]
        );
    }

    #[tokio::test]
    async fn empty_reactions_clear() {
        let (store, targets) = setup().await;
        set_target(&store, &targets, user(4)).await;
        set_reactions(&store, &targets, user(4), Some("🐸, <:pepe:1>")).await;

        let reply = set_reactions(&store, &targets, user(4), Some("  ")).await;
        assert!(reply.content.contains("cleared"));
        assert!(targets
            .read()
            .await
            .get(user(4))
            .unwrap()
            .specific_reactions
            .is_empty());
    }

    #[tokio::test]
    async fn methods_must_not_be_empty() {
        let (store, targets) = setup().await;
        set_target(&store, &targets, user(5)).await;

        let reply = set_methods(&store, &targets, user(5), false, false).await;
        assert!(reply.ephemeral);
        assert_eq!(
            targets.read().await.get(user(5)).unwrap().annoy_methods,
            AnnoyMethods::default()
        );

        set_methods(&store, &targets, user(5), false, true).await;
        let cached = targets.read().await.get(user(5)).unwrap().annoy_methods.clone();
        assert_eq!(cached, AnnoyMethods::from_flags(false, true));
        assert_eq!(
            store.get_settings(user(5)).await.unwrap().unwrap().annoy_methods,
            cached
        );
    }

    #[tokio::test]
    async fn message_mode_is_written_through() {
        let (store, targets) = setup().await;
        set_target(&store, &targets, user(6)).await;

        let reply = set_message_mode(&store, &targets, user(6), MessageMode::SpecificOnly).await;
        assert!(reply.content.contains("Specific Message Only"));
        assert_eq!(
            targets.read().await.get(user(6)).unwrap().message_mode,
            MessageMode::SpecificOnly
        );
        assert_eq!(
            store.get_settings(user(6)).await.unwrap().unwrap().message_mode,
            MessageMode::SpecificOnly
        );
    }

    #[tokio::test]
    async fn store_miss_leaves_cache_untouched() {
        let (store, targets) = setup().await;
        set_target(&store, &targets, user(7)).await;
        // Deleted directly from the store, so the cache is stale.
        store.remove_target(user(7)).await.unwrap();

        let reply = set_message_mode(&store, &targets, user(7), MessageMode::RandomOnly).await;
        assert!(reply.content.starts_with("Failed"));
        assert_eq!(
            targets.read().await.get(user(7)).unwrap().message_mode,
            MessageMode::Both
        );
    }

    #[tokio::test]
    async fn remove_target_evicts_cache() {
        let (store, targets) = setup().await;
        set_target(&store, &targets, user(8)).await;

        let reply = remove_target(&store, &targets, user(8)).await;
        assert!(!reply.ephemeral);
        assert!(!targets.read().await.contains(user(8)));
        assert_eq!(store.get_settings(user(8)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn removing_unknown_target_changes_nothing() {
        let (store, targets) = setup().await;
        set_target(&store, &targets, user(1)).await;

        let reply = remove_target(&store, &targets, user(99)).await;
        assert!(reply.ephemeral);
        assert!(reply.content.contains("was not found"));
        assert_eq!(targets.read().await.len(), 1);
        assert!(targets.read().await.contains(user(1)));
    }

    #[tokio::test]
    async fn list_with_no_targets() {
        let (store, _targets) = setup().await;
        let reply = list_targets(&store, |id| async move { id.to_string() }).await;
        assert_eq!(reply.content, "No users are currently being annoyed.");
    }

    #[tokio::test]
    async fn list_describes_each_target() {
        let (store, targets) = setup().await;
        set_target(&store, &targets, user(1)).await;
        set_target(&store, &targets, user(2)).await;
        set_messages(&store, &targets, user(1), Some("hi")).await;
        set_reactions(&store, &targets, user(2), Some("🐸")).await;

        let reply = list_targets(&store, |id| async move { format!("name-{}", id) }).await;
        assert!(reply.ephemeral);
        assert!(reply.content.contains("**name-1** (`1`)"));
        assert!(reply.content.contains("Specific Messages: 'hi'"));
        assert!(reply.content.contains("**name-2** (`2`)"));
        assert!(reply.content.contains("Specific Reactions: 🐸"));
        assert!(reply.content.contains("Message Mode: both"));
    }

    #[tokio::test]
    async fn long_lists_are_truncated() {
        let (store, targets) = setup().await;
        let long = "a".repeat(300);
        for id in 1..=20 {
            set_target(&store, &targets, user(id)).await;
            set_messages(&store, &targets, user(id), Some(long.as_str())).await;
        }

        let reply = list_targets(&store, |id| async move { id.to_string() }).await;
        assert!(reply.content.chars().count() <= MESSAGE_CHAR_LIMIT);
        assert!(reply.content.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn short_replies_are_not_truncated() {
        let reply = Reply::public("x".repeat(MESSAGE_CHAR_LIMIT));
        assert_eq!(reply.content.len(), MESSAGE_CHAR_LIMIT);
    }
}
