// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User settings. Loaded once from the `settings` table in `main` and handed
//! to the commands that need them.

use anyhow::{Context, Result};
use chrono::NaiveTime;
use log::warn;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

const KEY_BASE_CURRENCY: &str = "base_currency";
const KEY_NOTIFICATIONS: &str = "notification_settings";

pub const DEFAULT_CURRENCY: &str = "KRW";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub daily_reminder: bool,
    pub reminder_time: String, // HH:MM
    pub budget_alerts: bool,
    pub savings_goal: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            enabled: false,
            daily_reminder: false,
            reminder_time: "18:00".to_string(),
            budget_alerts: false,
            savings_goal: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub base_currency: String,
    pub notifications: NotificationSettings,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_currency: DEFAULT_CURRENCY.to_string(),
            notifications: NotificationSettings::default(),
        }
    }
}

impl Config {
    pub fn load(conn: &Connection) -> Result<Self> {
        let mut cfg = Config::default();
        if let Some(ccy) = read_setting(conn, KEY_BASE_CURRENCY)? {
            cfg.base_currency = ccy;
        }
        if let Some(raw) = read_setting(conn, KEY_NOTIFICATIONS)? {
            // Unreadable blob: keep defaults.
            match serde_json::from_str::<NotificationSettings>(&raw) {
                Ok(n) => cfg.notifications = n,
                Err(e) => warn!("ignoring unreadable notification settings: {}", e),
            }
        }
        Ok(cfg)
    }

    pub fn save(&self, conn: &Connection) -> Result<()> {
        write_setting(conn, KEY_BASE_CURRENCY, &self.base_currency)?;
        let blob = serde_json::to_string(&self.notifications)
            .context("Serialize notification settings")?;
        write_setting(conn, KEY_NOTIFICATIONS, &blob)?;
        Ok(())
    }
}

pub fn parse_reminder_time(s: &str) -> Result<String, LedgerError> {
    let t = s.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .map(|v| v.format("%H:%M").to_string())
        .map_err(|_| LedgerError::InvalidReminderTime(s.to_string()))
}

fn read_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()
        .with_context(|| format!("Read setting '{}'", key))?;
    Ok(v)
}

fn write_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}
