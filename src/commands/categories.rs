// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::EntryKind;
use crate::utils::{category_by_name, new_id, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let kind = sub.get_one::<String>("kind").unwrap().parse::<EntryKind>()?;
            let emoji = sub
                .get_one::<String>("emoji")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty());
            let color = sub
                .get_one::<String>("color")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty());
            let sort = *sub.get_one::<i64>("sort").unwrap_or(&0);
            conn.execute(
                "INSERT INTO categories(id, name, kind, emoji, color, sort) VALUES (?1,?2,?3,?4,?5,?6)",
                params![new_id(), name, kind.as_str(), emoji, color, sort],
            )?;
            println!("Added {} category '{}'", kind, name);
        }
        Some(("list", sub)) => {
            let kind = sub
                .get_one::<String>("kind")
                .map(|s| s.parse::<EntryKind>())
                .transpose()?;
            let mut sql = String::from("SELECT name, kind, IFNULL(emoji,''), archived FROM categories WHERE 1=1");
            if !sub.get_flag("all") {
                sql.push_str(" AND archived=0");
            }
            if kind.is_some() {
                sql.push_str(" AND kind=?1");
            }
            sql.push_str(" ORDER BY kind, sort, name");
            let mut stmt = conn.prepare(&sql)?;
            let map_row = |r: &rusqlite::Row<'_>| -> rusqlite::Result<(String, String, String, bool)> {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, bool>(3)?,
                ))
            };
            let rows: Vec<_> = match kind {
                Some(k) => stmt
                    .query_map(params![k.as_str()], map_row)?
                    .collect::<rusqlite::Result<_>>()?,
                None => stmt.query_map([], map_row)?.collect::<rusqlite::Result<_>>()?,
            };
            let data = rows
                .into_iter()
                .map(|(n, k, e, a)| {
                    vec![
                        e,
                        n,
                        k,
                        if a { "archived".into() } else { String::new() },
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["", "Category", "Kind", "Status"], data));
        }
        Some(("archive", sub)) => {
            let kind = sub
                .get_one::<String>("kind")
                .map(|s| s.parse::<EntryKind>())
                .transpose()?;
            let cat = category_by_name(conn, sub.get_one::<String>("name").unwrap(), kind)?;
            conn.execute(
                "UPDATE categories SET archived=1, updated_at=datetime('now') WHERE id=?1",
                params![cat.id],
            )?;
            println!("Archived {} category '{}'", cat.kind, cat.name);
        }
        _ => {}
    }
    Ok(())
}
