// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use daybook::{cli, commands, config::Config, db};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let mut config = Config::load(&conn)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            let seeded = db::seed_defaults(&conn)?;
            println!("Database initialized at {}", db::db_path()?.display());
            if seeded.accounts > 0 {
                println!("Added default account 'Cash'");
            }
            if seeded.categories > 0 {
                println!("Added {} starter categories", seeded.categories);
            }
        }
        Some(("account", sub)) => commands::accounts::handle(&conn, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, sub)?,
        Some(("entry", sub)) => commands::entries::handle(&conn, &config, sub)?,
        Some(("calendar", sub)) => commands::calendar::handle(&conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, &config, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&conn, &config, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, &mut config, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
