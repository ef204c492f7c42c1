// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::AccountType;
use crate::utils::{account_by_name, new_id, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let typ = sub.get_one::<String>("type").unwrap().parse::<AccountType>()?;
            let make_default = sub.get_flag("default");
            let tx = conn.unchecked_transaction()?;
            if make_default {
                tx.execute("UPDATE accounts SET is_default=0 WHERE is_default=1", [])?;
            }
            tx.execute(
                "INSERT INTO accounts(id, name, type, is_default) VALUES (?1, ?2, ?3, ?4)",
                params![new_id(), name, typ.as_str(), make_default],
            )?;
            tx.commit()?;
            println!("Added account '{}' ({})", name, typ);
        }
        Some(("list", sub)) => {
            let sql = if sub.get_flag("all") {
                "SELECT name, type, is_default, archived FROM accounts ORDER BY is_default DESC, name"
            } else {
                "SELECT name, type, is_default, archived FROM accounts WHERE archived=0 ORDER BY is_default DESC, name"
            };
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt.query_map([], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, bool>(2)?,
                    r.get::<_, bool>(3)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (n, t, d, a) = row?;
                data.push(vec![
                    n,
                    t,
                    if d { "*".into() } else { String::new() },
                    if a { "archived".into() } else { String::new() },
                ]);
            }
            println!(
                "{}",
                pretty_table(&["Name", "Type", "Default", "Status"], data)
            );
        }
        Some(("archive", sub)) => {
            let acct = account_by_name(conn, sub.get_one::<String>("name").unwrap())?;
            conn.execute(
                "UPDATE accounts SET archived=1, is_default=0, updated_at=datetime('now') WHERE id=?1",
                params![acct.id],
            )?;
            println!("Archived account '{}'", acct.name);
        }
        Some(("default", sub)) => {
            let acct = account_by_name(conn, sub.get_one::<String>("name").unwrap())?;
            if acct.archived {
                return Err(crate::error::LedgerError::Archived {
                    what: "Account",
                    name: acct.name,
                }
                .into());
            }
            let tx = conn.unchecked_transaction()?;
            tx.execute("UPDATE accounts SET is_default=0 WHERE is_default=1", [])?;
            tx.execute(
                "UPDATE accounts SET is_default=1, updated_at=datetime('now') WHERE id=?1",
                params![acct.id],
            )?;
            tx.commit()?;
            println!("'{}' is now the default account", acct.name);
        }
        _ => {}
    }
    Ok(())
}
