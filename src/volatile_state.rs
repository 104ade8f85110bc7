use crate::settings::TargetSettings;
use serenity::all::UserId;
use std::collections::HashMap;

/// In-memory mirror of the settings store.
///
/// Filled once at startup and afterwards only updated by the command handlers, which write to the
/// store first and mirror the change here only once the store accepted it.  Shared between
/// serenity's worker threads behind a `tokio::sync::RwLock`.
#[derive(Default)]
pub struct SettingsCache(HashMap<UserId, TargetSettings>);

impl SettingsCache {
    pub fn load(targets: impl IntoIterator<Item = (UserId, TargetSettings)>) -> Self {
        Self(targets.into_iter().collect())
    }

    pub fn get(&self, user_id: UserId) -> Option<&TargetSettings> {
        self.0.get(&user_id)
    }

    pub fn get_mut(&mut self, user_id: UserId) -> Option<&mut TargetSettings> {
        self.0.get_mut(&user_id)
    }

    pub fn contains(&self, user_id: UserId) -> bool {
        self.0.contains_key(&user_id)
    }

    pub fn insert(&mut self, settings: TargetSettings) {
        self.0.insert(settings.user_id, settings);
    }

    pub fn remove(&mut self, user_id: UserId) -> Option<TargetSettings> {
        self.0.remove(&user_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
