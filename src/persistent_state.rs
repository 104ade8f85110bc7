//! Target settings which persist across sessions, backed by SQLite.

use crate::{
    log_error, log_internal,
    settings::{AnnoyMethods, MessageMode, TargetSettings},
};
use anyhow::{anyhow, Result};
use serenity::all::UserId;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::{collections::BTreeMap, str::FromStr};

/// Columns added after the original `targets(user_id, specific_reply)` layout, with the values
/// existing rows receive when the column is introduced.
const OPTIONAL_COLUMNS: &[(&str, &str)] = &[
    ("specific_replies", "'[]'"),
    ("specific_reactions", "'[]'"),
    ("annoy_methods", "'message,reaction'"),
    ("message_mode", "'both'"),
];

/// Single-value columns written by early versions of the bot, and the list column that replaced
/// each of them.
const LEGACY_COLUMNS: &[(&str, &str)] = &[
    ("specific_reply", "specific_replies"),
    ("specific_reaction", "specific_reactions"),
];

type TargetRow = (
    i64,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

const SELECT_TARGET: &str = "SELECT user_id, specific_replies, specific_reactions, annoy_methods, message_mode FROM targets";

/// Result of adding a target
#[derive(Debug, PartialEq, Eq)]
pub enum Upsert {
    Created,
    AlreadyExists,
}

/// Durable store of every target's settings.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct SettingsStore {
    pool: SqlitePool,
}

impl SettingsStore {
    /// Open (creating if needed) the database at `url` and bring its schema up to date.
    pub async fn open(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| anyhow!("Invalid database url `{}`: {}", url, e))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| anyhow!("Could not open database `{}`: {}", url, e))?;

        log_internal!("Connected to database {}", url);
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating and migrating the schema.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("CREATE TABLE IF NOT EXISTS targets (user_id INTEGER PRIMARY KEY)")
            .execute(&mut *tx)
            .await
            .map_err(|e| anyhow!("Could not create table `targets`: {}", e))?;

        let existing: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM pragma_table_info('targets')")
                .fetch_all(&mut *tx)
                .await?;
        let existing: Vec<String> = existing.into_iter().map(|(name,)| name).collect();

        let mut added = Vec::new();
        for (column, default) in OPTIONAL_COLUMNS {
            if existing.iter().any(|name| name == column) {
                continue;
            }
            let sql = format!(
                "ALTER TABLE targets ADD COLUMN {} TEXT NOT NULL DEFAULT {}",
                column, default
            );
            sqlx::query(&sql)
                .execute(&mut *tx)
                .await
                .map_err(|e| anyhow!("Could not add column `{}`: {}", column, e))?;
            log_internal!("Added column `{}` to `targets`", column);
            added.push(*column);
        }

        // Carry single values from old layouts into the list columns that just appeared.
        for (legacy, replacement) in LEGACY_COLUMNS {
            if !existing.iter().any(|name| name == legacy) || !added.contains(replacement) {
                continue;
            }

            let sql = format!("SELECT user_id, {} FROM targets", legacy);
            let rows: Vec<(i64, Option<String>)> = sqlx::query_as(&sql).fetch_all(&mut *tx).await?;

            let mut carried = 0;
            for (user_id, value) in rows {
                let Some(value) = value.filter(|v| !v.is_empty()) else {
                    continue;
                };
                let encoded = serde_json::to_string(&[value])?;
                let sql = format!("UPDATE targets SET {} = ? WHERE user_id = ?", replacement);
                sqlx::query(&sql)
                    .bind(encoded)
                    .bind(user_id)
                    .execute(&mut *tx)
                    .await?;
                carried += 1;
            }
            log_internal!(
                "Carried {} value(s) from `{}` into `{}`",
                carried,
                legacy,
                replacement
            );
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn upsert_target(&self, user_id: UserId) -> Result<Upsert> {
        let affected = sqlx::query("INSERT INTO targets (user_id) VALUES (?) ON CONFLICT(user_id) DO NOTHING")
            .bind(user_id.get() as i64)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Could not add target {}: {}", user_id, e))?
            .rows_affected();

        if affected > 0 {
            log_internal!("Added target {}", user_id);
            Ok(Upsert::Created)
        } else {
            Ok(Upsert::AlreadyExists)
        }
    }

    /// Returns whether a target was actually removed.
    pub async fn remove_target(&self, user_id: UserId) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM targets WHERE user_id = ?")
            .bind(user_id.get() as i64)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Could not remove target {}: {}", user_id, e))?
            .rows_affected();

        if affected > 0 {
            log_internal!("Removed target {}", user_id);
        }
        Ok(affected > 0)
    }

    pub async fn set_specific_replies(&self, user_id: UserId, replies: &[String]) -> Result<bool> {
        self.update_column(user_id, "specific_replies", serde_json::to_string(replies)?)
            .await
    }

    pub async fn set_specific_reactions(
        &self,
        user_id: UserId,
        reactions: &[String],
    ) -> Result<bool> {
        self.update_column(user_id, "specific_reactions", serde_json::to_string(reactions)?)
            .await
    }

    pub async fn set_methods(&self, user_id: UserId, methods: &AnnoyMethods) -> Result<bool> {
        self.update_column(user_id, "annoy_methods", methods.encode())
            .await
    }

    pub async fn set_message_mode(&self, user_id: UserId, mode: MessageMode) -> Result<bool> {
        self.update_column(user_id, "message_mode", mode.as_str().to_owned())
            .await
    }

    /// Overwrite one column of an existing target.  `Ok(false)` if there is no such target.
    async fn update_column(&self, user_id: UserId, column: &'static str, value: String) -> Result<bool> {
        let sql = format!("UPDATE targets SET {} = ? WHERE user_id = ?", column);
        let affected = sqlx::query(&sql)
            .bind(value)
            .bind(user_id.get() as i64)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Could not update `{}` for {}: {}", column, user_id, e))?
            .rows_affected();

        Ok(affected > 0)
    }

    pub async fn get_settings(&self, user_id: UserId) -> Result<Option<TargetSettings>> {
        let sql = format!("{} WHERE user_id = ?", SELECT_TARGET);
        let row: Option<TargetRow> = sqlx::query_as(&sql)
            .bind(user_id.get() as i64)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Could not fetch target {}: {}", user_id, e))?;

        Ok(row.and_then(row_to_settings))
    }

    pub async fn get_all(&self) -> Result<BTreeMap<UserId, TargetSettings>> {
        let rows: Vec<TargetRow> = sqlx::query_as(SELECT_TARGET)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Could not fetch targets: {}", e))?;

        Ok(rows
            .into_iter()
            .filter_map(row_to_settings)
            .map(|settings| (settings.user_id, settings))
            .collect())
    }
}

fn row_to_settings(row: TargetRow) -> Option<TargetSettings> {
    let (raw_id, replies, reactions, methods, mode) = row;

    if raw_id == 0 {
        log_error!("Skipping target row with invalid user id 0");
        return None;
    }
    let user_id = UserId::new(raw_id as u64);

    let annoy_methods = match methods.as_deref() {
        None => AnnoyMethods::default(),
        Some(methods) => {
            let (annoy_methods, unknown) = AnnoyMethods::decode(methods);
            if !unknown.is_empty() {
                log_error!(
                    "Ignoring unknown annoy method(s) {:?} for target {}",
                    unknown,
                    user_id
                );
            }
            annoy_methods
        }
    };

    let message_mode = match mode.as_deref() {
        None => MessageMode::default(),
        Some(mode) => mode.parse().unwrap_or_else(|e| {
            log_error!("{} for target {}, using default", e, user_id);
            MessageMode::default()
        }),
    };

    Some(TargetSettings {
        user_id,
        specific_replies: decode_list(user_id, "specific_replies", replies),
        specific_reactions: decode_list(user_id, "specific_reactions", reactions),
        annoy_methods,
        message_mode,
    })
}

/// Lists are stored as JSON arrays.  Anything else is treated as a single plain-text entry.
fn decode_list(user_id: UserId, column: &str, raw: Option<String>) -> Vec<String> {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(list) => list,
        Err(_) => {
            log_error!(
                "`{}` for target {} is not a JSON list, reading it as one entry",
                column,
                user_id
            );
            vec![raw]
        }
    }
}
