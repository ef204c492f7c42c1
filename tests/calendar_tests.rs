// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use daybook::aggregate::DayMarkers;
use daybook::commands::calendar::{marker_text, month_grid, month_markers};
use daybook::commands::goals::progress_bar;
use daybook::db;
use rusqlite::Connection;
use rust_decimal_macros::dec;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn markers_cover_only_days_with_live_entries() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO entries(id, kind, amount, entry_date) VALUES ('a', 'income', '10', '2025-02-03');
        INSERT INTO entries(id, kind, amount, entry_date) VALUES ('b', 'savings', '4', '2025-02-03');
        INSERT INTO entries(id, kind, amount, entry_date) VALUES ('c', 'expense', '2', '2025-02-14');
        INSERT INTO entries(id, kind, amount, entry_date, deleted_at) VALUES ('d', 'expense', '1', '2025-02-20', '2025-02-21 08:00:00');
        INSERT INTO entries(id, kind, amount, entry_date) VALUES ('e', 'expense', '1', '2025-03-01');
        "#,
    )
    .unwrap();

    let markers = month_markers(&conn, d("2025-02-01")).unwrap();
    assert_eq!(markers.len(), 2);
    assert_eq!(
        markers[&d("2025-02-03")],
        DayMarkers {
            has_income: true,
            has_expense: false,
            has_savings: true,
        }
    );
    assert_eq!(marker_text(&markers[&d("2025-02-03")]), "+*");
    assert_eq!(marker_text(&markers[&d("2025-02-14")]), "-");
}

#[test]
fn grid_starts_on_sunday_and_pads_weeks() {
    // 2025-02-01 is a Saturday; February 2025 has 28 days.
    let markers = std::collections::BTreeMap::new();
    let grid = month_grid(d("2025-02-01"), &markers);
    assert_eq!(grid.len(), 5);
    assert!(grid.iter().all(|w| w.len() == 7));
    assert_eq!(grid[0][5], "");
    assert_eq!(grid[0][6], " 1");
    assert_eq!(grid[1][0], " 2");
    assert_eq!(grid[4][6], "");
    assert_eq!(grid[4][5], "28");
}

#[test]
fn progress_bar_fills_by_ratio() {
    assert_eq!(progress_bar(dec!(0)), format!("[{}]", ".".repeat(20)));
    assert_eq!(
        progress_bar(dec!(0.5)),
        format!("[{}{}]", "#".repeat(10), ".".repeat(10))
    );
    assert_eq!(progress_bar(dec!(1)), format!("[{}]", "#".repeat(20)));
}
