// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use daybook::{cli, commands::exporter, db};
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO accounts(id, name, type) VALUES ('a1', 'Checking', 'bank');
        INSERT INTO categories(id, name, kind) VALUES ('c1', 'Groceries', 'expense');
        INSERT INTO entries(id, account_id, category_id, kind, amount, memo, entry_date, tags)
            VALUES ('e1', 'a1', 'c1', 'expense', '12.34', 'Weekly run', '2025-01-02', '["food","home"]');
        INSERT INTO entries(id, kind, amount, entry_date)
            VALUES ('e2', 'income', '500', '2025-02-01');
        INSERT INTO entries(id, kind, amount, entry_date, deleted_at)
            VALUES ('e3', 'expense', '1', '2025-01-03', '2025-01-04 09:00:00');
        "#,
    )
    .unwrap();
    conn
}

fn export(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["daybook", "export", "entries"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_entries_writes_pretty_json() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(&conn, &["--format", "json", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2025-01-02",
                "kind": "expense",
                "amount": "12.34",
                "category": "Groceries",
                "account": "Checking",
                "memo": "Weekly run",
                "tags": ["food", "home"]
            },
            {
                "date": "2025-02-01",
                "kind": "income",
                "amount": "500",
                "category": null,
                "account": null,
                "memo": null,
                "tags": []
            }
        ])
    );
}

#[test]
fn export_entries_csv_for_one_month() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("jan.csv");
    let out_str = out_path.to_string_lossy().to_string();

    export(&conn, &["--out", &out_str, "--month", "2025-01"]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            "date,kind,amount,category,account,memo,tags",
            "2025-01-02,expense,12.34,Groceries,Checking,Weekly run,food;home",
        ]
    );
}

#[test]
fn export_entries_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(export(&conn, &["--format", "xml", "--out", &out_str]).is_err());
    assert!(!out_path.exists());
}
