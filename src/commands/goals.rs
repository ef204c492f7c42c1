// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::reports::month_report;
use crate::config::Config;
use crate::models::SavingsGoal;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_month};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const BAR_WIDTH: usize = 20;

pub fn handle(conn: &Connection, config: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let month = parse_month(sub.get_one::<String>("month").unwrap())?;
            let goal_amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
            store::set_savings_goal(conn, &SavingsGoal { month, goal_amount })?;
            println!(
                "Savings goal for {} set to {}",
                month.format("%Y-%m"),
                fmt_money(&goal_amount, &config.base_currency)
            );
        }
        Some(("show", sub)) => show(conn, config, sub)?,
        _ => {}
    }
    Ok(())
}

/// Text progress bar for a ratio already clamped to `[0, 1]`.
pub fn progress_bar(ratio: Decimal) -> String {
    let filled = (ratio * Decimal::from(BAR_WIDTH))
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn show(conn: &Connection, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let report = month_report(conn, month)?;
    if maybe_print_json(json_flag, jsonl_flag, &report.goal)? {
        return Ok(());
    }
    let ccy = &config.base_currency;
    match report.goal {
        Some(g) => {
            println!(
                "{} {} / {} ({:.1}%)",
                progress_bar(g.progress.ratio),
                fmt_money(&report.summary.savings, ccy),
                fmt_money(&g.goal_amount, ccy),
                g.progress.raw_ratio.saturating_mul(Decimal::ONE_HUNDRED)
            );
            if g.progress.achieved {
                println!("Goal reached for {}.", report.month);
            }
        }
        None => println!("No savings goal set for {}", report.month),
    }
    Ok(())
}
