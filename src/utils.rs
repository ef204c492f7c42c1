// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::error::LedgerError;
use crate::models::{Account, AccountType, Category, EntryKind};

pub const MEMO_MAX_CHARS: usize = 200;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .replace(',', "")
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Amounts are magnitudes; direction comes from the entry kind.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(LedgerError::NegativeAmount(d).into());
    }
    Ok(d)
}

pub fn check_memo(memo: &str) -> Result<(), LedgerError> {
    let len = memo.chars().count();
    if len > MEMO_MAX_CHARS {
        return Err(LedgerError::MemoTooLong {
            len,
            max: MEMO_MAX_CHARS,
        });
    }
    Ok(())
}

pub fn month_end(month_start: NaiveDate) -> NaiveDate {
    let (y, m) = if month_start.month() == 12 {
        (month_start.year() + 1, 1)
    } else {
        (month_start.year(), month_start.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(month_start)
}

/// Inclusive first and last day of the month containing `month_start`.
pub fn month_bounds(month_start: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = month_start.with_day(1).unwrap_or(month_start);
    (first, month_end(first))
}

pub fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .with_context(|| format!("Invalid year {}", year))?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)
        .with_context(|| format!("Invalid year {}", year))?;
    Ok((start, end))
}

pub fn days_in_month(month_start: NaiveDate) -> u32 {
    month_end(month_start).day()
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

/// `part` as a percentage of `whole`; zero when `whole` is zero.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    match part.checked_div(whole) {
        Some(r) => r.saturating_mul(Decimal::ONE_HUNDRED),
        None => Decimal::MAX,
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

fn account_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<(String, String, String, bool, bool)> {
    Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?))
}

fn build_account(row: (String, String, String, bool, bool)) -> Result<Account> {
    let (id, name, typ, is_default, archived) = row;
    let r#type = typ.parse::<AccountType>()?;
    Ok(Account {
        id,
        name,
        r#type,
        is_default,
        archived,
    })
}

pub fn account_by_name(conn: &Connection, name: &str) -> Result<Account> {
    let row = conn
        .query_row(
            "SELECT id, name, type, is_default, archived FROM accounts WHERE name=?1",
            params![name.trim()],
            account_from_row,
        )
        .with_context(|| format!("Account '{}' not found", name.trim()))?;
    build_account(row)
}

pub fn default_account(conn: &Connection) -> Result<Option<Account>> {
    let row = conn
        .query_row(
            "SELECT id, name, type, is_default, archived FROM accounts
             WHERE is_default=1 AND archived=0 LIMIT 1",
            [],
            account_from_row,
        )
        .optional()?;
    row.map(build_account).transpose()
}

/// Categories are unique per (name, kind); `kind` disambiguates when the
/// same label exists for several kinds.
pub fn category_by_name(conn: &Connection, name: &str, kind: Option<EntryKind>) -> Result<Category> {
    let name = name.trim();
    let mut stmt = conn.prepare(
        "SELECT id, name, kind, emoji, color, sort, archived FROM categories
         WHERE name=?1 ORDER BY sort, created_at",
    )?;
    let rows = stmt.query_map(params![name], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, Option<String>>(4)?,
            r.get::<_, i64>(5)?,
            r.get::<_, bool>(6)?,
        ))
    })?;
    let mut found = Vec::new();
    for row in rows {
        let (id, name, k, emoji, color, sort_order, archived) = row?;
        found.push(Category {
            id,
            name,
            kind: k.parse::<EntryKind>()?,
            emoji,
            color,
            sort_order,
            archived,
        });
    }
    // Without a same-kind match the first hit is returned so callers can
    // report the mismatch rather than "not found".
    let pick = kind
        .and_then(|k| found.iter().position(|c| c.kind == k))
        .or_else(|| (!found.is_empty()).then_some(0));
    match pick {
        Some(i) => Ok(found.swap_remove(i)),
        None => Err(anyhow::anyhow!("Category '{}' not found", name)),
    }
}
