// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use crate::aggregate::{
    CategoryBreakdown, GoalProgress, Summary, Verdict, category_breakdown, savings_goal_progress,
    summarize_window, year_total, yearly_rollup,
};
use crate::config::Config;
use crate::models::EntryKind;
use crate::store;
use crate::utils::{
    days_in_month, fmt_money, maybe_print_json, month_bounds, parse_month, percent_of,
    pretty_table, year_bounds,
};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, config: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(conn, config, sub)?,
        Some(("categories", sub)) => categories(conn, config, sub)?,
        Some(("year", sub)) => year(conn, config, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct GoalStatus {
    pub goal_amount: Decimal,
    #[serde(flatten)]
    pub progress: GoalProgress,
}

#[derive(Debug, Serialize)]
pub struct MonthReport {
    pub month: String,
    pub summary: Summary,
    pub daily_average: Summary,
    pub verdict: Verdict,
    pub goal: Option<GoalStatus>,
    pub skipped: usize,
}

pub fn month_report(conn: &Connection, month: NaiveDate) -> Result<MonthReport> {
    let (start, end) = month_bounds(month);
    let loaded = store::entries_between(conn, start, end)?;
    let summary = summarize_window(&loaded.entries, start, end);
    let goal = store::savings_goal(conn, start)?.map(|g| GoalStatus {
        goal_amount: g.goal_amount,
        progress: savings_goal_progress(&g, &summary),
    });
    Ok(MonthReport {
        month: start.format("%Y-%m").to_string(),
        summary,
        daily_average: summary.daily_average(days_in_month(start)),
        verdict: summary.verdict(),
        goal,
        skipped: loaded.skipped.len(),
    })
}

/// One-line verdict for the month; `None` when nothing was recorded.
pub fn verdict_line(report: &MonthReport, ccy: &str) -> Option<String> {
    let s = &report.summary;
    if s.income.is_zero() && s.expense.is_zero() && s.savings.is_zero() {
        return None;
    }
    let b = s.balance;
    Some(match report.verdict {
        Verdict::Surplus => format!("Saved {} this month.", fmt_money(&b, ccy)),
        Verdict::Deficit => format!("Over by {} this month.", fmt_money(&b.abs(), ccy)),
        Verdict::Even => "Income and outflow are balanced this month.".to_string(),
    })
}

fn month(conn: &Connection, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let report = month_report(conn, month)?;
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    let ccy = &config.base_currency;
    let s = &report.summary;
    let avg = &report.daily_average;
    let rows = vec![
        vec!["Income".into(), fmt_money(&s.income, ccy), fmt_money(&avg.income, ccy)],
        vec!["Expense".into(), fmt_money(&s.expense, ccy), fmt_money(&avg.expense, ccy)],
        vec!["Savings".into(), fmt_money(&s.savings, ccy), fmt_money(&avg.savings, ccy)],
        vec!["Balance".into(), fmt_money(&s.balance, ccy), fmt_money(&avg.balance, ccy)],
    ];
    println!("{}", report.month);
    println!("{}", pretty_table(&["", "Total", "Per day"], rows));
    println!("Balance = income - expense - savings");
    if let Some(line) = verdict_line(&report, ccy) {
        println!("{}", line);
    }
    match &report.goal {
        Some(g) => {
            println!(
                "Savings goal: {} / {} ({:.1}%)",
                fmt_money(&s.savings, ccy),
                fmt_money(&g.goal_amount, ccy),
                g.progress.raw_ratio.saturating_mul(Decimal::ONE_HUNDRED)
            );
            if g.progress.achieved {
                println!("Savings goal reached.");
            }
        }
        None => println!("No savings goal set; use `daybook goal set`."),
    }
    if report.skipped > 0 {
        println!(
            "{} stored rows were left out; run `daybook doctor`",
            report.skipped
        );
    }
    Ok(())
}

/// Window totals plus the per-category breakdown for one month.
pub fn category_report(conn: &Connection, month: NaiveDate) -> Result<(Summary, CategoryBreakdown)> {
    let (start, end) = month_bounds(month);
    let loaded = store::entries_between(conn, start, end)?;
    Ok((
        summarize_window(&loaded.entries, start, end),
        category_breakdown(&loaded.entries),
    ))
}

#[derive(Debug, Serialize)]
struct CategoryLine {
    kind: EntryKind,
    category: String,
    emoji: Option<String>,
    total: Decimal,
    count: u64,
    percent: Decimal,
}

fn categories(conn: &Connection, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let only = sub
        .get_one::<String>("kind")
        .map(|s| s.parse::<EntryKind>())
        .transpose()?;
    let (summary, breakdown) = category_report(conn, month)?;

    let kinds: Vec<EntryKind> = match only {
        Some(k) => vec![k],
        None => vec![EntryKind::Expense, EntryKind::Income, EntryKind::Savings],
    };
    let mut lines = Vec::new();
    for kind in kinds {
        for stat in breakdown.for_kind(kind) {
            lines.push(CategoryLine {
                kind,
                category: stat.name.clone(),
                emoji: stat.emoji.clone(),
                total: stat.total,
                count: stat.count,
                percent: percent_of(stat.total, summary.total(kind)).round_dp(1),
            });
        }
    }
    if !maybe_print_json(json_flag, jsonl_flag, &lines)? {
        let data = lines
            .into_iter()
            .map(|l| {
                vec![
                    l.kind.to_string(),
                    match l.emoji {
                        Some(e) => format!("{} {}", e, l.category),
                        None => l.category,
                    },
                    fmt_money(&l.total, &config.base_currency),
                    l.count.to_string(),
                    format!("{:.1}%", l.percent),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Kind", "Category", "Total", "Entries", "Share"], data)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct YearReport {
    pub year: i32,
    pub months: BTreeMap<u32, Summary>,
    pub total: Summary,
    pub skipped: usize,
}

pub fn year_report(conn: &Connection, year: i32) -> Result<YearReport> {
    let (start, end) = year_bounds(year)?;
    let loaded = store::entries_between(conn, start, end)?;
    let months = yearly_rollup(&loaded.entries, year);
    let total = year_total(&months);
    Ok(YearReport {
        year,
        months,
        total,
        skipped: loaded.skipped.len(),
    })
}

fn year(conn: &Connection, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = *sub.get_one::<i32>("year").unwrap();
    let report = year_report(conn, year)?;
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }
    let ccy = &config.base_currency;
    let row = |label: String, s: &Summary| {
        vec![
            label,
            fmt_money(&s.income, ccy),
            fmt_money(&s.expense, ccy),
            fmt_money(&s.savings, ccy),
            fmt_money(&s.balance, ccy),
        ]
    };
    let mut data: Vec<Vec<String>> = report
        .months
        .iter()
        .map(|(m, s)| row(format!("{}-{:02}", year, m), s))
        .collect();
    data.push(row("Total".to_string(), &report.total));
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Savings", "Balance"], data)
    );
    if report.skipped > 0 {
        println!(
            "{} stored rows were left out; run `daybook doctor`",
            report.skipped
        );
    }
    Ok(())
}
