//! Decides how, if at all, to annoy the author of a message.
//!
//! This is kept free of any Discord I/O so it can be driven by a seeded RNG in tests.

use crate::settings::{AnnoyMethod, MessageMode, TargetSettings};
use rand::{seq::SliceRandom, Rng};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SendMessage(String),
    AddReaction(String),
}

/// Pick an annoyance for one inbound message.  `None` when the author is not a target or no
/// enabled method has anything to work with.
pub fn decide<R: Rng + ?Sized>(
    settings: Option<&TargetSettings>,
    random_messages: &[String],
    random_emojis: &[String],
    rng: &mut R,
) -> Option<Action> {
    let settings = settings?;

    let available: Vec<AnnoyMethod> = settings
        .annoy_methods
        .iter()
        .filter(|method| match method {
            AnnoyMethod::Message => {
                settings.message_mode != MessageMode::SpecificOnly
                    || !settings.specific_replies.is_empty()
            }
            AnnoyMethod::Reaction => true,
        })
        .collect();

    match available.choose(rng)? {
        AnnoyMethod::Message => {
            let options: Vec<&String> = match settings.message_mode {
                MessageMode::SpecificOnly => settings.specific_replies.iter().collect(),
                MessageMode::RandomOnly => random_messages.iter().collect(),
                MessageMode::Both => settings
                    .specific_replies
                    .iter()
                    .chain(random_messages)
                    .collect(),
            };
            options
                .choose(rng)
                .map(|text| Action::SendMessage((*text).clone()))
        }
        AnnoyMethod::Reaction => {
            let pool = if settings.specific_reactions.is_empty() {
                random_emojis
            } else {
                settings.specific_reactions.as_slice()
            };
            pool.choose(rng).cloned().map(Action::AddReaction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AnnoyMethods;
    use rand::{rngs::StdRng, SeedableRng};
    use serenity::all::UserId;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn target(
        replies: &[&str],
        reactions: &[&str],
        methods: AnnoyMethods,
        mode: MessageMode,
    ) -> TargetSettings {
        TargetSettings {
            user_id: UserId::new(1),
            specific_replies: strings(replies),
            specific_reactions: strings(reactions),
            annoy_methods: methods,
            message_mode: mode,
        }
    }

    fn sample(settings: &TargetSettings, messages: &[String], emojis: &[String]) -> Vec<Option<Action>> {
        (0..200)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                decide(Some(settings), messages, emojis, &mut rng)
            })
            .collect()
    }

    #[test]
    fn untargeted_user_is_left_alone() {
        let mut rng = StdRng::seed_from_u64(7);
        let messages = strings(&["x"]);
        let emojis = strings(&["😂"]);
        assert_eq!(decide(None, &messages, &emojis, &mut rng), None);
    }

    #[test]
    fn both_mode_draws_from_specific_and_random() {
        let settings = target(
            &["hi"],
            &[],
            AnnoyMethods::from_flags(true, false),
            MessageMode::Both,
        );
        let messages = strings(&["x", "y"]);
        let emojis = strings(&["😂"]);

        let mut seen = std::collections::HashSet::new();
        for action in sample(&settings, &messages, &emojis) {
            match action {
                Some(Action::SendMessage(text)) => {
                    assert!(["hi", "x", "y"].contains(&text.as_str()));
                    seen.insert(text);
                }
                other => panic!("expected a message, got {:?}", other),
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn specific_only_without_replies_never_sends_a_message() {
        let settings = target(
            &[],
            &[],
            AnnoyMethods::from_flags(true, true),
            MessageMode::SpecificOnly,
        );
        let messages = strings(&["x", "y"]);
        let emojis = strings(&["😂", "🤡"]);

        for action in sample(&settings, &messages, &emojis) {
            assert!(matches!(action, Some(Action::AddReaction(_))));
        }
    }

    #[test]
    fn specific_only_without_replies_and_reactions_disabled_does_nothing() {
        let settings = target(
            &[],
            &["🐸"],
            AnnoyMethods::from_flags(true, false),
            MessageMode::SpecificOnly,
        );
        let messages = strings(&["x"]);
        let emojis = strings(&["😂"]);

        for action in sample(&settings, &messages, &emojis) {
            assert_eq!(action, None);
        }
    }

    #[test]
    fn specific_only_uses_only_specific_replies() {
        let settings = target(
            &["a", "b"],
            &[],
            AnnoyMethods::from_flags(true, false),
            MessageMode::SpecificOnly,
        );
        let messages = strings(&["x"]);
        let emojis = strings(&["😂"]);

        for action in sample(&settings, &messages, &emojis) {
            match action {
                Some(Action::SendMessage(text)) => assert!(text == "a" || text == "b"),
                other => panic!("expected a specific message, got {:?}", other),
            }
        }
    }

    #[test]
    fn random_only_ignores_specific_replies() {
        let settings = target(
            &["specific"],
            &[],
            AnnoyMethods::from_flags(true, false),
            MessageMode::RandomOnly,
        );
        let messages = strings(&["x", "y"]);
        let emojis = strings(&["😂"]);

        for action in sample(&settings, &messages, &emojis) {
            match action {
                Some(Action::SendMessage(text)) => assert_ne!(text, "specific"),
                other => panic!("expected a random message, got {:?}", other),
            }
        }
    }

    #[test]
    fn specific_reactions_are_preferred_over_the_pool() {
        let settings = target(
            &[],
            &["🐸", "<:pepe:1234>"],
            AnnoyMethods::from_flags(false, true),
            MessageMode::Both,
        );
        let messages = strings(&["x"]);
        let emojis = strings(&["😂", "🤡"]);

        for action in sample(&settings, &messages, &emojis) {
            match action {
                Some(Action::AddReaction(emoji)) => {
                    assert!(emoji == "🐸" || emoji == "<:pepe:1234>")
                }
                other => panic!("expected a specific reaction, got {:?}", other),
            }
        }
    }

    #[test]
    fn reactions_fall_back_to_the_pool() {
        let settings = target(
            &[],
            &[],
            AnnoyMethods::from_flags(false, true),
            MessageMode::Both,
        );
        let messages = strings(&["x"]);
        let emojis = strings(&["😂", "🤡"]);

        for action in sample(&settings, &messages, &emojis) {
            match action {
                Some(Action::AddReaction(emoji)) => assert!(emojis.contains(&emoji)),
                other => panic!("expected a pool reaction, got {:?}", other),
            }
        }
    }

    #[test]
    fn no_enabled_methods_does_nothing() {
        let settings = target(&["hi"], &["🐸"], AnnoyMethods::empty(), MessageMode::Both);
        let messages = strings(&["x"]);
        let emojis = strings(&["😂"]);

        for action in sample(&settings, &messages, &emojis) {
            assert_eq!(action, None);
        }
    }

    #[test]
    fn both_methods_are_chosen_over_many_draws() {
        let settings = target(
            &["hi"],
            &["🐸"],
            AnnoyMethods::from_flags(true, true),
            MessageMode::Both,
        );
        let messages = strings(&["x"]);
        let emojis = strings(&["😂"]);

        let actions = sample(&settings, &messages, &emojis);
        assert!(actions
            .iter()
            .any(|a| matches!(a, Some(Action::SendMessage(_)))));
        assert!(actions
            .iter()
            .any(|a| matches!(a, Some(Action::AddReaction(_)))));
    }

    #[test]
    fn empty_pools_yield_nothing_rather_than_panicking() {
        let settings = target(
            &[],
            &[],
            AnnoyMethods::from_flags(true, true),
            MessageMode::RandomOnly,
        );
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(decide(Some(&settings), &[], &[], &mut rng), None);
    }
}
