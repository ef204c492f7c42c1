// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Entry repository: range-filtered reads that feed the aggregator, plus the
//! writes behind `entry add/edit/rm` and `goal set`.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use rusqlite::{Connection, OptionalExtension, ToSql, params};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::LedgerError;
use crate::models::{AccountRef, CategoryRef, Entry, EntryKind, SavingsGoal};

/// A stored row that could not be turned into an [`Entry`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub id: String,
    pub date: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct LoadedEntries {
    pub entries: Vec<Entry>,
    pub skipped: Vec<SkippedRow>,
}

const SELECT_ENTRIES: &str = "SELECT e.id, e.entry_date, e.kind, e.amount, e.memo, e.tags, e.deleted_at,
        c.id, c.name, c.emoji, a.id, a.name
 FROM entries e
 LEFT JOIN categories c ON e.category_id=c.id
 LEFT JOIN accounts a ON e.account_id=a.id
 WHERE e.deleted_at IS NULL";

/// Live entries dated `start..=end`, oldest first.
pub fn entries_between(conn: &Connection, start: NaiveDate, end: NaiveDate) -> Result<LoadedEntries> {
    load(
        conn,
        " AND e.entry_date BETWEEN ?1 AND ?2 ORDER BY e.entry_date, e.created_at, e.rowid",
        &[&start.to_string(), &end.to_string()],
    )
}

pub fn all_entries(conn: &Connection) -> Result<LoadedEntries> {
    load(conn, " ORDER BY e.entry_date, e.created_at, e.rowid", &[])
}

/// Live entries on one date, most recently created first.
pub fn entries_on(conn: &Connection, date: NaiveDate) -> Result<LoadedEntries> {
    load(
        conn,
        " AND e.entry_date=?1 ORDER BY e.created_at DESC, e.rowid DESC",
        &[&date.to_string()],
    )
}

fn load(conn: &Connection, tail: &str, args: &[&dyn ToSql]) -> Result<LoadedEntries> {
    let sql = format!("{}{}", SELECT_ENTRIES, tail);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(args)?;

    let mut out = LoadedEntries::default();
    while let Some(r) = rows.next()? {
        let id: String = r.get(0)?;
        let date_s: String = r.get(1)?;
        let kind_s: String = r.get(2)?;
        let amount_s: String = r.get(3)?;
        let memo: Option<String> = r.get(4)?;
        let tags_s: Option<String> = r.get(5)?;
        let deleted_at: Option<NaiveDateTime> = r.get(6)?;
        let cat_id: Option<String> = r.get(7)?;
        let cat_name: Option<String> = r.get(8)?;
        let cat_emoji: Option<String> = r.get(9)?;
        let acct_id: Option<String> = r.get(10)?;
        let acct_name: Option<String> = r.get(11)?;

        let kind = match kind_s.parse::<EntryKind>() {
            Ok(k) => k,
            Err(e) => {
                warn!("skipping entry {}: {}", id, e);
                out.skipped.push(SkippedRow {
                    id,
                    date: date_s,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let date = match parse_entry_date(&date_s) {
            Ok(d) => d,
            Err(e) => {
                warn!("skipping entry {}: bad date '{}': {}", id, date_s, e);
                out.skipped.push(SkippedRow {
                    id,
                    reason: format!("Invalid date '{}'", date_s),
                    date: date_s,
                });
                continue;
            }
        };
        let amount = match amount_s.trim().parse::<Decimal>() {
            Ok(a) => a,
            Err(e) => {
                warn!("skipping entry {}: bad amount '{}': {}", id, amount_s, e);
                out.skipped.push(SkippedRow {
                    id,
                    date: date_s,
                    reason: format!("Invalid amount '{}'", amount_s),
                });
                continue;
            }
        };
        let tags = match parse_tags(tags_s.as_deref()) {
            Ok(t) => t,
            Err(e) => {
                warn!("skipping entry {}: bad tags: {}", id, e);
                out.skipped.push(SkippedRow {
                    id,
                    date: date_s,
                    reason: format!("Invalid tags '{}'", tags_s.unwrap_or_default()),
                });
                continue;
            }
        };

        out.entries.push(Entry {
            id,
            date,
            kind,
            amount,
            category: cat_id.map(|id| CategoryRef {
                id,
                name: cat_name.unwrap_or_default(),
                emoji: cat_emoji,
            }),
            account: acct_id.map(|id| AccountRef {
                id,
                name: acct_name.unwrap_or_default(),
            }),
            memo,
            tags,
            deleted_at,
        });
    }
    Ok(out)
}

/// `entry_date` is stored as a bare `YYYY-MM-DD`.
pub fn parse_entry_date(s: &str) -> chrono::ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}

/// Tags are stored as a JSON array of strings; NULL or empty means none.
pub fn parse_tags(raw: Option<&str>) -> serde_json::Result<Vec<String>> {
    match raw {
        None | Some("") => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw),
    }
}

/// Fields accepted by `insert_entry` and `update_entry`; validated upstream.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub category_id: Option<String>,
    pub account_id: Option<String>,
    pub memo: Option<String>,
    pub tags: Vec<String>,
}

fn tags_json(tags: &[String]) -> Result<Option<String>> {
    if tags.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(tags)?))
}

pub fn insert_entry(conn: &Connection, draft: &EntryDraft) -> Result<String> {
    let id = crate::utils::new_id();
    conn.execute(
        "INSERT INTO entries(id, account_id, category_id, kind, amount, memo, entry_date, tags)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            draft.account_id,
            draft.category_id,
            draft.kind.as_str(),
            draft.amount.to_string(),
            draft.memo,
            draft.date.to_string(),
            tags_json(&draft.tags)?,
        ],
    )?;
    Ok(id)
}

pub fn update_entry(conn: &Connection, id: &str, draft: &EntryDraft) -> Result<()> {
    let n = conn.execute(
        "UPDATE entries SET account_id=?2, category_id=?3, kind=?4, amount=?5, memo=?6,
                entry_date=?7, tags=?8, updated_at=datetime('now')
         WHERE id=?1 AND deleted_at IS NULL",
        params![
            id,
            draft.account_id,
            draft.category_id,
            draft.kind.as_str(),
            draft.amount.to_string(),
            draft.memo,
            draft.date.to_string(),
            tags_json(&draft.tags)?,
        ],
    )?;
    if n == 0 {
        return Err(LedgerError::EntryNotFound(id.to_string()).into());
    }
    Ok(())
}

/// Current stored values of a live entry, as a draft for partial edits.
pub fn draft_for(conn: &Connection, id: &str) -> Result<EntryDraft> {
    let row = conn
        .query_row(
            "SELECT entry_date, kind, amount, category_id, account_id, memo, tags
             FROM entries WHERE id=?1 AND deleted_at IS NULL",
            params![id],
            |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, Option<String>>(3)?,
                    r.get::<_, Option<String>>(4)?,
                    r.get::<_, Option<String>>(5)?,
                    r.get::<_, Option<String>>(6)?,
                ))
            },
        )
        .optional()?;
    let Some((date_s, kind_s, amount_s, category_id, account_id, memo, tags_s)) = row else {
        return Err(LedgerError::EntryNotFound(id.to_string()).into());
    };
    Ok(EntryDraft {
        date: crate::utils::parse_date(&date_s)?,
        kind: kind_s.parse::<EntryKind>()?,
        amount: crate::utils::parse_decimal(&amount_s)?,
        category_id,
        account_id,
        memo,
        tags: parse_tags(tags_s.as_deref())
            .with_context(|| format!("Invalid tags on entry {}", id))?,
    })
}

pub fn soft_delete_entry(conn: &Connection, id: &str) -> Result<()> {
    let n = conn.execute(
        "UPDATE entries SET deleted_at=datetime('now'), updated_at=datetime('now')
         WHERE id=?1 AND deleted_at IS NULL",
        params![id],
    )?;
    if n == 0 {
        return Err(LedgerError::EntryNotFound(id.to_string()).into());
    }
    Ok(())
}

pub fn savings_goal(conn: &Connection, month_start: NaiveDate) -> Result<Option<SavingsGoal>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT goal_amount FROM savings_goals WHERE month=?1",
            params![month_start.to_string()],
            |r| r.get(0),
        )
        .optional()?;
    match v {
        Some(s) => {
            let goal_amount = s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid goal amount '{}' for {}", s, month_start))?;
            Ok(Some(SavingsGoal {
                month: month_start,
                goal_amount,
            }))
        }
        None => Ok(None),
    }
}

pub fn set_savings_goal(conn: &Connection, goal: &SavingsGoal) -> Result<()> {
    if goal.goal_amount < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount(goal.goal_amount).into());
    }
    conn.execute(
        "INSERT INTO savings_goals(month, goal_amount) VALUES (?1, ?2)
         ON CONFLICT(month) DO UPDATE SET goal_amount=excluded.goal_amount, updated_at=datetime('now')",
        params![goal.month.to_string(), goal.goal_amount.to_string()],
    )?;
    Ok(())
}
