// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::error::LedgerError;
use crate::models::EntryKind;
use crate::store::{self, EntryDraft, LoadedEntries};
use crate::utils::{
    account_by_name, category_by_name, check_memo, default_account, fmt_money, maybe_print_json,
    month_bounds, parse_amount, parse_date, parse_month, pretty_table,
};
use anyhow::Result;
use log::debug;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

pub fn handle(conn: &Connection, config: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            store::soft_delete_entry(conn, id)?;
            println!("Deleted entry {}", id);
        }
        Some(("list", sub)) => list(conn, config, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let draft = draft_from_args(conn, sub, None)?;
    let id = store::insert_entry(conn, &draft)?;
    println!(
        "Recorded {} {} on {} ({})",
        draft.kind, draft.amount, draft.date, id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let current = store::draft_for(conn, id)?;
    let draft = draft_from_args(conn, sub, Some(current))?;
    store::update_entry(conn, id, &draft)?;
    println!("Updated entry {}", id);
    Ok(())
}

/// Builds a validated draft from `entry add`/`entry edit` arguments. For
/// edits, `base` supplies every field the user did not pass.
pub fn draft_from_args(
    conn: &Connection,
    sub: &clap::ArgMatches,
    base: Option<EntryDraft>,
) -> Result<EntryDraft> {
    let arg = |name: &str| sub.get_one::<String>(name).map(|s| s.trim().to_string());

    let date = match (arg("date"), base.as_ref()) {
        (Some(d), _) => parse_date(&d)?,
        (None, Some(b)) => b.date,
        (None, None) => anyhow::bail!("--date is required"),
    };
    let kind = match (arg("kind"), base.as_ref()) {
        (Some(k), _) => k.parse::<EntryKind>()?,
        (None, Some(b)) => b.kind,
        (None, None) => anyhow::bail!("--kind is required"),
    };
    let amount = match (arg("amount"), base.as_ref()) {
        (Some(a), _) => parse_amount(&a)?,
        (None, Some(b)) => b.amount,
        (None, None) => anyhow::bail!("--amount is required"),
    };

    let category_id = match arg("category").filter(|s| !s.is_empty()) {
        Some(name) => {
            let cat = category_by_name(conn, &name, Some(kind))?;
            if cat.archived {
                return Err(LedgerError::Archived {
                    what: "Category",
                    name: cat.name,
                }
                .into());
            }
            check_category_kind(&cat.name, cat.kind, kind)?;
            Some(cat.id)
        }
        None => match base.as_ref().and_then(|b| b.category_id.clone()) {
            Some(id) => {
                // Kept category must still match a possibly changed kind.
                if let Some((name, k)) = category_kind(conn, &id)? {
                    check_category_kind(&name, k, kind)?;
                }
                Some(id)
            }
            None => None,
        },
    };

    let account_id = match arg("account").filter(|s| !s.is_empty()) {
        Some(name) => {
            let acct = account_by_name(conn, &name)?;
            if acct.archived {
                return Err(LedgerError::Archived {
                    what: "Account",
                    name: acct.name,
                }
                .into());
            }
            Some(acct.id)
        }
        None => match base.as_ref() {
            Some(b) => b.account_id.clone(),
            None => default_account(conn)?.map(|a| {
                debug!("using default account '{}'", a.name);
                a.id
            }),
        },
    };

    let memo = match (arg("memo"), base.as_ref()) {
        (Some(m), _) if m.is_empty() => None,
        (Some(m), _) => {
            check_memo(&m)?;
            Some(m)
        }
        (None, Some(b)) => b.memo.clone(),
        (None, None) => None,
    };

    let given_tags: Vec<String> = sub
        .get_many::<String>("tag")
        .map(|vals| {
            vals.map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();
    let tags = if given_tags.is_empty() {
        base.as_ref().map(|b| b.tags.clone()).unwrap_or_default()
    } else {
        given_tags
    };

    Ok(EntryDraft {
        date,
        kind,
        amount,
        category_id,
        account_id,
        memo,
        tags,
    })
}

fn check_category_kind(name: &str, actual: EntryKind, expected: EntryKind) -> Result<()> {
    if actual != expected {
        return Err(LedgerError::KindMismatch {
            name: name.to_string(),
            expected,
            actual,
        }
        .into());
    }
    Ok(())
}

fn category_kind(conn: &Connection, id: &str) -> Result<Option<(String, EntryKind)>> {
    let row: Option<(String, String)> = conn
        .query_row(
            "SELECT name, kind FROM categories WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    match row {
        Some((name, k)) => Ok(Some((name, k.parse::<EntryKind>()?))),
        None => Ok(None),
    }
}

#[derive(Debug, Serialize)]
pub struct EntryRow {
    pub id: String,
    pub date: String,
    pub kind: EntryKind,
    pub amount: String,
    pub category: String,
    pub account: String,
    pub memo: String,
    pub tags: Vec<String>,
}

/// `--date` lists one day newest first; otherwise `--month` (default: the
/// current month) lists oldest first.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<(Vec<EntryRow>, usize)> {
    let LoadedEntries { entries, skipped } = if let Some(d) = sub.get_one::<String>("date") {
        store::entries_on(conn, parse_date(d)?)?
    } else {
        let month = match sub.get_one::<String>("month") {
            Some(m) => parse_month(m)?,
            None => parse_month(&chrono::Local::now().format("%Y-%m").to_string())?,
        };
        let (start, end) = month_bounds(month);
        store::entries_between(conn, start, end)?
    };

    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    let rows = entries
        .into_iter()
        .take(limit)
        .map(|e| EntryRow {
            id: e.id,
            date: e.date.to_string(),
            kind: e.kind,
            amount: e.amount.to_string(),
            category: e
                .category
                .map(|c| match c.emoji {
                    Some(emoji) => format!("{} {}", emoji, c.name),
                    None => c.name,
                })
                .unwrap_or_default(),
            account: e.account.map(|a| a.name).unwrap_or_default(),
            memo: e.memo.unwrap_or_default(),
            tags: e.tags,
        })
        .collect();
    Ok((rows, skipped.len()))
}

fn list(conn: &Connection, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (data, skipped) = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let amount = r
                    .amount
                    .parse::<rust_decimal::Decimal>()
                    .map(|d| fmt_money(&d, &config.base_currency))
                    .unwrap_or_else(|_| r.amount.clone());
                vec![
                    r.date.clone(),
                    r.kind.to_string(),
                    amount,
                    r.category.clone(),
                    r.account.clone(),
                    r.memo.clone(),
                    r.tags.join(", "),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Kind", "Amount", "Category", "Account", "Memo", "Tags", "ID"],
                rows,
            )
        );
        if skipped > 0 {
            println!("{} stored rows could not be read; run `daybook doctor`", skipped);
        }
    }
    Ok(())
}
