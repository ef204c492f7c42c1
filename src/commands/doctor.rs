// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::EntryKind;
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub code: &'static str,
    pub entry_id: String,
    pub detail: String,
}

/// Live entries the statistics either drop or count suspiciously.
pub fn find_issues(conn: &Connection) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();

    let mut stmt = conn.prepare(
        "SELECT e.id, e.entry_date, e.kind, e.amount, e.tags, c.name, c.kind
         FROM entries e LEFT JOIN categories c ON e.category_id=c.id
         WHERE e.deleted_at IS NULL
         ORDER BY e.entry_date, e.rowid",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: String = r.get(0)?;
        let date: String = r.get(1)?;
        let kind_s: String = r.get(2)?;
        let amount_s: String = r.get(3)?;
        let tags_s: Option<String> = r.get(4)?;
        let cat_name: Option<String> = r.get(5)?;
        let cat_kind: Option<String> = r.get(6)?;

        // 1) Kinds outside income/expense/savings never reach any total
        let kind = match kind_s.parse::<EntryKind>() {
            Ok(k) => Some(k),
            Err(_) => {
                issues.push(Issue {
                    code: "unknown_kind",
                    entry_id: id.clone(),
                    detail: format!("{} kind '{}'", date, kind_s),
                });
                None
            }
        };

        // 2) Amounts are magnitudes
        match amount_s.trim().parse::<Decimal>() {
            Ok(a) if a < Decimal::ZERO => issues.push(Issue {
                code: "negative_amount",
                entry_id: id.clone(),
                detail: format!("{} amount {}", date, a),
            }),
            Ok(_) => {}
            Err(_) => issues.push(Issue {
                code: "invalid_amount",
                entry_id: id.clone(),
                detail: format!("{} amount '{}'", date, amount_s),
            }),
        }

        // 3) Dates and tags the repository cannot read
        if store::parse_entry_date(&date).is_err() {
            issues.push(Issue {
                code: "invalid_date",
                entry_id: id.clone(),
                detail: format!("date '{}'", date),
            });
        }
        if store::parse_tags(tags_s.as_deref()).is_err() {
            issues.push(Issue {
                code: "invalid_tags",
                entry_id: id.clone(),
                detail: format!("{} tags '{}'", date, tags_s.unwrap_or_default()),
            });
        }

        // 4) Category filed under a different kind
        if let (Some(k), Some(name), Some(ck)) = (kind, cat_name, cat_kind) {
            if ck != k.as_str() {
                issues.push(Issue {
                    code: "category_kind_mismatch",
                    entry_id: id.clone(),
                    detail: format!("{} {} entry in {} category '{}'", date, k, ck, name),
                });
            }
        }
    }
    Ok(issues)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = find_issues(conn)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.code.to_string(), i.entry_id, i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Entry", "Detail"], rows));
    }
    Ok(())
}
