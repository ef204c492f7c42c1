// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{month_bounds, parse_month};
use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("entries", sub)) => export_entries(conn, sub),
        _ => Ok(()),
    }
}

fn export_entries(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let loaded = match sub.get_one::<String>("month") {
        Some(m) => {
            let (start, end) = month_bounds(parse_month(m)?);
            store::entries_between(conn, start, end)?
        }
        None => store::all_entries(conn)?,
    };

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create export file {}", out))?;
            wtr.write_record([
                "date", "kind", "amount", "category", "account", "memo", "tags",
            ])?;
            for e in &loaded.entries {
                wtr.write_record([
                    e.date.to_string(),
                    e.kind.to_string(),
                    e.amount.to_string(),
                    e.category.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
                    e.account.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
                    e.memo.clone().unwrap_or_default(),
                    e.tags.join(";"),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = loaded
                .entries
                .iter()
                .map(|e| {
                    json!({
                        "date": e.date.to_string(),
                        "kind": e.kind,
                        "amount": e.amount.to_string(),
                        "category": e.category.as_ref().map(|c| c.name.clone()),
                        "account": e.account.as_ref().map(|a| a.name.clone()),
                        "memo": e.memo,
                        "tags": e.tags,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write export file {}", out))?;
        }
    }
    println!("Exported {} entries to {}", loaded.entries.len(), out);
    Ok(())
}
