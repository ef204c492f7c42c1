// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::debug;
use once_cell::sync::Lazy;
use rusqlite::{Connection, params};

use crate::utils::new_id;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Daybook", "daybook"));

/// Overrides the platform data dir when set.
pub const DB_ENV: &str = "DAYBOOK_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("daybook.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    debug!("opening ledger at {}", path.display());
    let conn = Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Idempotent. `entries.kind` carries no CHECK so rows written by other
/// clients still load; the app validates kinds on write and `doctor`
/// reports the rest.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS accounts(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        type TEXT NOT NULL DEFAULT 'cash' CHECK(type IN ('cash','card','bank','other')),
        is_default INTEGER NOT NULL DEFAULT 0,
        archived INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS categories(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('income','expense','savings')),
        emoji TEXT,
        color TEXT,
        sort INTEGER NOT NULL DEFAULT 0,
        archived INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(name, kind)
    );

    CREATE TABLE IF NOT EXISTS entries(
        id TEXT PRIMARY KEY,
        account_id TEXT,
        category_id TEXT,
        kind TEXT NOT NULL,
        amount TEXT NOT NULL,
        memo TEXT,
        entry_date TEXT NOT NULL,
        tags TEXT,
        deleted_at TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(account_id) REFERENCES accounts(id),
        FOREIGN KEY(category_id) REFERENCES categories(id)
    );
    CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(entry_date);

    CREATE TABLE IF NOT EXISTS savings_goals(
        month TEXT PRIMARY KEY, -- YYYY-MM-01
        goal_amount TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

/// Starter categories created on first `init`: (name, kind, emoji).
const STARTER_CATEGORIES: [(&str, &str, &str); 9] = [
    ("Salary", "income", "💼"),
    ("Side income", "income", "💵"),
    ("Food", "expense", "🍚"),
    ("Transport", "expense", "🚌"),
    ("Housing", "expense", "🏠"),
    ("Shopping", "expense", "🛍️"),
    ("Health", "expense", "💊"),
    ("Other", "expense", "📦"),
    ("Savings", "savings", "🏦"),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Seeded {
    pub accounts: usize,
    pub categories: usize,
}

/// Onboarding data: a default cash account and a starter category set.
/// Each table is seeded only while it is empty, so repeat runs add nothing.
pub fn seed_defaults(conn: &Connection) -> Result<Seeded> {
    let tx = conn.unchecked_transaction()?;
    let mut seeded = Seeded::default();

    let accounts: i64 = tx.query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))?;
    if accounts == 0 {
        tx.execute(
            "INSERT INTO accounts(id, name, type, is_default) VALUES (?1, 'Cash', 'cash', 1)",
            params![new_id()],
        )?;
        seeded.accounts = 1;
    }

    let categories: i64 = tx.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
    if categories == 0 {
        for (sort, (name, kind, emoji)) in STARTER_CATEGORIES.iter().enumerate() {
            tx.execute(
                "INSERT INTO categories(id, name, kind, emoji, sort) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![new_id(), name, kind, emoji, sort as i64],
            )?;
        }
        seeded.categories = STARTER_CATEGORIES.len();
    }

    tx.commit()?;
    if seeded != Seeded::default() {
        debug!(
            "seeded {} account(s) and {} categories",
            seeded.accounts, seeded.categories
        );
    }
    Ok(seeded)
}
