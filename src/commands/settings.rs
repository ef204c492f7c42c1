// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Config, parse_reminder_time};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, config: &mut Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &*config)? {
                let n = &config.notifications;
                let rows = vec![
                    vec!["base_currency".into(), config.base_currency.clone()],
                    vec!["notifications".into(), n.enabled.to_string()],
                    vec!["daily_reminder".into(), n.daily_reminder.to_string()],
                    vec!["reminder_time".into(), n.reminder_time.clone()],
                    vec!["budget_alerts".into(), n.budget_alerts.to_string()],
                    vec!["savings_goal_alerts".into(), n.savings_goal.to_string()],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            apply(config, sub)?;
            config.save(conn)?;
            println!("Settings saved");
        }
        _ => {}
    }
    Ok(())
}

/// Applies `settings set` arguments to `config` without persisting.
pub fn apply(config: &mut Config, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(ccy) = sub.get_one::<String>("currency") {
        let ccy = ccy.trim().to_uppercase();
        if ccy.is_empty() {
            anyhow::bail!("Currency must not be empty");
        }
        config.base_currency = ccy;
    }
    let n = &mut config.notifications;
    if let Some(v) = sub.get_one::<bool>("notifications") {
        n.enabled = *v;
    }
    if let Some(v) = sub.get_one::<bool>("daily_reminder") {
        n.daily_reminder = *v;
    }
    if let Some(t) = sub.get_one::<String>("reminder_time") {
        n.reminder_time = parse_reminder_time(t)?;
    }
    if let Some(v) = sub.get_one::<bool>("budget_alerts") {
        n.budget_alerts = *v;
    }
    if let Some(v) = sub.get_one::<bool>("savings_goal_alerts") {
        n.savings_goal = *v;
    }
    Ok(())
}
