// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn month_arg(required: bool) -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .required(required)
}

fn entry_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("date").long("date").value_name("YYYY-MM-DD").required(required))
        .arg(
            Arg::new("kind")
                .long("kind")
                .value_name("income|expense|savings")
                .required(required),
        )
        .arg(Arg::new("amount").long("amount").required(required))
        .arg(Arg::new("category").long("category"))
        .arg(Arg::new("account").long("account"))
        .arg(Arg::new("memo").long("memo"))
        .arg(
            Arg::new("tag")
                .long("tag")
                .action(ArgAction::Append)
                .help("Repeat for several tags"),
        )
}

pub fn build_cli() -> Command {
    Command::new("daybook")
        .version(crate_version!())
        .about("Household ledger: income, expense and savings with monthly and yearly statistics")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the ledger database and seed a default account and categories"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("cash|card|bank|other")
                                .default_value("cash"),
                        )
                        .arg(
                            Arg::new("default")
                                .long("default")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("list").arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include archived accounts"),
                    ),
                )
                .subcommand(
                    Command::new("archive").arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("default").arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_name("income|expense|savings")
                                .required(true),
                        )
                        .arg(Arg::new("emoji").long("emoji"))
                        .arg(Arg::new("color").long("color"))
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .value_parser(value_parser!(i64))
                                .default_value("0"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("kind").long("kind"))
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .help("Include archived categories"),
                        ),
                )
                .subcommand(
                    Command::new("archive")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("kind").long("kind")),
                ),
        )
        .subcommand(
            Command::new("entry")
                .about("Record and browse entries")
                .subcommand(entry_fields(Command::new("add"), true))
                .subcommand(entry_fields(
                    Command::new("edit").arg(Arg::new("id").long("id").required(true)),
                    false,
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true)))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .conflicts_with("month"),
                        )
                        .arg(month_arg(false))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(json_flags(
            Command::new("calendar")
                .about("Month grid with income/expense/savings markers")
                .arg(month_arg(true)),
        ))
        .subcommand(
            Command::new("report")
                .about("Statistics")
                .subcommand(json_flags(Command::new("month").arg(month_arg(true))))
                .subcommand(json_flags(
                    Command::new("categories")
                        .arg(month_arg(true))
                        .arg(Arg::new("kind").long("kind")),
                ))
                .subcommand(json_flags(
                    Command::new("year").arg(
                        Arg::new("year")
                            .long("year")
                            .required(true)
                            .value_parser(value_parser!(i32)),
                    ),
                )),
        )
        .subcommand(
            Command::new("goal")
                .about("Monthly savings goal")
                .subcommand(
                    Command::new("set")
                        .arg(month_arg(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(Command::new("show").arg(month_arg(true)))),
        )
        .subcommand(
            Command::new("export")
                .about("Export entries")
                .subcommand(
                    Command::new("entries")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_name("csv|json")
                                .default_value("csv"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(month_arg(false)),
                ),
        )
        .subcommand(Command::new("doctor").about("Find rows the statistics cannot count"))
        .subcommand(
            Command::new("settings")
                .about("View or change settings")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("currency").long("currency"))
                        .arg(
                            Arg::new("notifications")
                                .long("notifications")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(
                            Arg::new("daily_reminder")
                                .long("daily-reminder")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(
                            Arg::new("reminder_time")
                                .long("reminder-time")
                                .value_name("HH:MM"),
                        )
                        .arg(
                            Arg::new("budget_alerts")
                                .long("budget-alerts")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(
                            Arg::new("savings_goal_alerts")
                                .long("savings-goal-alerts")
                                .value_parser(value_parser!(bool)),
                        ),
                ),
        )
}
