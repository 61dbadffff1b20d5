// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The SQLite-backed [`SettingsRepository`].
//!
//! One row per chat. Engine sets are stored as JSON arrays of engine ids
//! so adding an engine variant never needs a schema migration.

use std::collections::BTreeSet;

use async_trait::async_trait;
use rusqlite::params;
use rusqlite::types::Type;

use pixtrace_core::error::PixtraceError;
use pixtrace_core::traits::SettingsRepository;
use pixtrace_core::types::{ChatId, ChatSettings, EngineId};

use crate::database::{map_tr_err, Database};

/// Persists [`ChatSettings`] in the `chat_settings` table.
#[derive(Clone)]
pub struct SqliteSettingsRepository {
    db: Database,
}

impl SqliteSettingsRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn engines_to_json(engines: &BTreeSet<EngineId>) -> Result<String, PixtraceError> {
    serde_json::to_string(engines).map_err(|e| PixtraceError::Storage {
        source: Box::new(e),
    })
}

fn engines_from_json(column: usize, json: &str) -> Result<BTreeSet<EngineId>, rusqlite::Error> {
    serde_json::from_str(json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepository {
    async fn load(&self, chat_id: ChatId) -> Result<Option<ChatSettings>, PixtraceError> {
        self.db
            .connection()
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT auto_search_enabled, show_buttons_enabled, auto_search_engines,
                            button_engines, show_best_match_button, show_go_to_image_button
                     FROM chat_settings WHERE chat_id = ?1",
                )?;
                let result = stmt.query_row(params![chat_id.0], |row| {
                    let auto_json: String = row.get(2)?;
                    let button_json: String = row.get(3)?;
                    Ok(ChatSettings {
                        auto_search_enabled: row.get(0)?,
                        show_buttons_enabled: row.get(1)?,
                        auto_search_engines: engines_from_json(2, &auto_json)?,
                        button_engines: engines_from_json(3, &button_json)?,
                        show_best_match_button: row.get(4)?,
                        show_go_to_image_button: row.get(5)?,
                    })
                });
                match result {
                    Ok(settings) => Ok(Some(settings)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(map_tr_err::<rusqlite::Error>)
    }

    async fn save(&self, chat_id: ChatId, settings: &ChatSettings) -> Result<(), PixtraceError> {
        let auto_json = engines_to_json(&settings.auto_search_engines)?;
        let button_json = engines_to_json(&settings.button_engines)?;
        let settings = settings.clone();
        self.db
            .connection()
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO chat_settings (chat_id, auto_search_enabled, show_buttons_enabled,
                            auto_search_engines, button_engines, show_best_match_button,
                            show_go_to_image_button, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, datetime('now'))
                     ON CONFLICT(chat_id) DO UPDATE SET
                            auto_search_enabled = excluded.auto_search_enabled,
                            show_buttons_enabled = excluded.show_buttons_enabled,
                            auto_search_engines = excluded.auto_search_engines,
                            button_engines = excluded.button_engines,
                            show_best_match_button = excluded.show_best_match_button,
                            show_go_to_image_button = excluded.show_go_to_image_button,
                            updated_at = excluded.updated_at",
                    params![
                        chat_id.0,
                        settings.auto_search_enabled,
                        settings.show_buttons_enabled,
                        auto_json,
                        button_json,
                        settings.show_best_match_button,
                        settings.show_go_to_image_button,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err::<rusqlite::Error>)
    }
}
