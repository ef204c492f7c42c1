// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use crate::aggregate::{DayMarkers, calendar_presence_map};
use crate::store;
use crate::utils::{maybe_print_json, month_bounds, parse_month, pretty_table};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let month = parse_month(m.get_one::<String>("month").unwrap())?;
    let markers = month_markers(conn, month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &markers)? {
        println!("{}", pretty_table(&WEEKDAYS, month_grid(month, &markers)));
        println!("+ income  - expense  * savings");
    }
    Ok(())
}

pub fn month_markers(conn: &Connection, month: NaiveDate) -> Result<BTreeMap<NaiveDate, DayMarkers>> {
    let (start, end) = month_bounds(month);
    let loaded = store::entries_between(conn, start, end)?;
    Ok(calendar_presence_map(&loaded.entries))
}

pub fn marker_text(m: &DayMarkers) -> String {
    let mut s = String::new();
    if m.has_income {
        s.push('+');
    }
    if m.has_expense {
        s.push('-');
    }
    if m.has_savings {
        s.push('*');
    }
    s
}

/// Sunday-first weeks; blank cells pad the first and last week.
pub fn month_grid(month: NaiveDate, markers: &BTreeMap<NaiveDate, DayMarkers>) -> Vec<Vec<String>> {
    let (start, end) = month_bounds(month);
    let lead = start.weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<String> = vec![String::new(); lead];
    for day in start.iter_days().take_while(|d| *d <= end) {
        let cell = match markers.get(&day) {
            Some(m) => format!("{:>2} {}", day.day(), marker_text(m)),
            None => format!("{:>2}", day.day()),
        };
        cells.push(cell);
    }
    while cells.len() % 7 != 0 {
        cells.push(String::new());
    }
    cells.chunks(7).map(|w| w.to_vec()).collect()
}
