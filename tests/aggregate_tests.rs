// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use daybook::aggregate::{
    Summary, UNCATEGORIZED, Verdict, calendar_presence_map, category_breakdown,
    savings_goal_progress, summarize_window, year_total, yearly_rollup,
};
use daybook::models::{CategoryRef, Entry, EntryKind, SavingsGoal};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn entry(date: &str, kind: EntryKind, amount: Decimal, category: Option<&str>) -> Entry {
    Entry {
        id: format!("{}-{}-{}", date, kind, amount),
        date: d(date),
        kind,
        amount,
        category: category.map(|c| CategoryRef {
            id: format!("cat-{}", c),
            name: c.to_string(),
            emoji: None,
        }),
        account: None,
        memo: None,
        tags: Vec::new(),
        deleted_at: None,
    }
}

fn deleted(mut e: Entry) -> Entry {
    e.deleted_at = Some(d("2025-08-20").and_hms_opt(9, 0, 0).unwrap());
    e
}

fn goal(amount: Decimal) -> SavingsGoal {
    SavingsGoal {
        month: d("2025-08-01"),
        goal_amount: amount,
    }
}

fn savings(amount: Decimal) -> Summary {
    Summary::new(Decimal::ZERO, Decimal::ZERO, amount)
}

const AUG_START: &str = "2025-08-01";
const AUG_END: &str = "2025-08-31";

#[test]
fn summary_balance_subtracts_savings() {
    let entries = vec![
        entry("2025-08-01", EntryKind::Income, dec!(1000), None),
        entry("2025-08-02", EntryKind::Expense, dec!(300), None),
        entry("2025-08-03", EntryKind::Savings, dec!(200), None),
    ];
    let s = summarize_window(&entries, d(AUG_START), d(AUG_END));
    assert_eq!(s.income, dec!(1000));
    assert_eq!(s.expense, dec!(300));
    assert_eq!(s.savings, dec!(200));
    assert_eq!(s.balance, dec!(500));
}

#[test]
fn summary_of_nothing_is_zero() {
    let s = summarize_window(&[], d(AUG_START), d(AUG_END));
    assert_eq!(s, Summary::default());
    assert_eq!(s.balance, Decimal::ZERO);
}

#[test]
fn summary_sums_cents_exactly() {
    let entries: Vec<Entry> = (0..10)
        .map(|_| entry("2025-08-05", EntryKind::Expense, dec!(0.1), None))
        .collect();
    let s = summarize_window(&entries, d(AUG_START), d(AUG_END));
    assert_eq!(s.expense, dec!(1.0));
    assert_eq!(format!("{:.2}", s.balance), "-1.00");
}

#[test]
fn summary_does_not_refilter_by_window() {
    let entries = vec![
        entry("2025-08-31", EntryKind::Income, dec!(10), None),
        entry("2025-09-01", EntryKind::Income, dec!(5), None),
    ];
    let s = summarize_window(&entries, d(AUG_START), d(AUG_END));
    assert_eq!(s.income, dec!(15));
}

#[test]
fn soft_deleted_entries_count_nowhere() {
    let entries = vec![
        entry("2025-08-01", EntryKind::Income, dec!(100), Some("Salary")),
        deleted(entry("2025-08-01", EntryKind::Income, dec!(900), Some("Salary"))),
        deleted(entry("2025-08-07", EntryKind::Expense, dec!(50), Some("Food"))),
    ];

    let s = summarize_window(&entries, d(AUG_START), d(AUG_END));
    assert_eq!(s, Summary::new(dec!(100), Decimal::ZERO, Decimal::ZERO));

    let b = category_breakdown(&entries);
    assert_eq!(b.income.len(), 1);
    assert_eq!(b.income[0].total, dec!(100));
    assert_eq!(b.income[0].count, 1);
    assert!(b.expense.is_empty());

    let map = calendar_presence_map(&entries);
    assert_eq!(map.len(), 1);
    assert!(!map.contains_key(&d("2025-08-07")));

    let year = yearly_rollup(&entries, 2025);
    assert_eq!(year[&8].income, dec!(100));
    assert_eq!(year[&8].expense, Decimal::ZERO);

    let only_deleted = vec![deleted(entry(
        "2025-08-01",
        EntryKind::Savings,
        dec!(10),
        None,
    ))];
    assert!(calendar_presence_map(&only_deleted).is_empty());
}

#[test]
fn category_totals_add_up_to_summary() {
    let entries = vec![
        entry("2025-08-01", EntryKind::Expense, dec!(12.50), Some("Food")),
        entry("2025-08-02", EntryKind::Expense, dec!(40), Some("Transport")),
        entry("2025-08-03", EntryKind::Expense, dec!(7.25), None),
        entry("2025-08-04", EntryKind::Expense, dec!(3), Some("Food")),
        entry("2025-08-05", EntryKind::Income, dec!(2500), Some("Salary")),
        entry("2025-08-06", EntryKind::Income, dec!(30), None),
        entry("2025-08-07", EntryKind::Savings, dec!(100), Some("Emergency")),
    ];
    let s = summarize_window(&entries, d(AUG_START), d(AUG_END));
    let b = category_breakdown(&entries);
    for kind in EntryKind::ALL {
        let sum: Decimal = b.for_kind(kind).iter().map(|c| c.total).sum();
        assert_eq!(sum, s.total(kind), "kind {}", kind);
    }
}

#[test]
fn categories_sorted_by_total_descending() {
    let entries = vec![
        entry("2025-08-01", EntryKind::Expense, dec!(10), Some("Coffee")),
        entry("2025-08-02", EntryKind::Expense, dec!(300), Some("Rent")),
        entry("2025-08-03", EntryKind::Expense, dec!(45), Some("Food")),
        entry("2025-08-04", EntryKind::Expense, dec!(5), Some("Coffee")),
    ];
    let names: Vec<_> = category_breakdown(&entries)
        .expense
        .iter()
        .map(|c| c.name.clone())
        .collect();
    assert_eq!(names, vec!["Rent", "Food", "Coffee"]);
}

#[test]
fn equal_totals_keep_encounter_order() {
    let entries = vec![
        entry("2025-08-01", EntryKind::Expense, dec!(20), Some("Books")),
        entry("2025-08-02", EntryKind::Expense, dec!(50), Some("Rent")),
        entry("2025-08-03", EntryKind::Expense, dec!(20), Some("Games")),
    ];
    let names: Vec<_> = category_breakdown(&entries)
        .expense
        .iter()
        .map(|c| c.name.clone())
        .collect();
    assert_eq!(names, vec!["Rent", "Books", "Games"]);

    let mut reversed = entries.clone();
    reversed.swap(0, 2);
    let names: Vec<_> = category_breakdown(&reversed)
        .expense
        .iter()
        .map(|c| c.name.clone())
        .collect();
    assert_eq!(names, vec!["Rent", "Games", "Books"]);
}

#[test]
fn uncategorized_entries_get_one_bucket_per_kind() {
    let entries = vec![
        entry("2025-08-01", EntryKind::Expense, dec!(8), None),
        entry("2025-08-02", EntryKind::Income, dec!(60), None),
        entry("2025-08-03", EntryKind::Expense, dec!(4), Some("Food")),
    ];
    let b = category_breakdown(&entries);

    let exp_uncat: Vec<_> = b.expense.iter().filter(|c| c.category_id.is_none()).collect();
    assert_eq!(exp_uncat.len(), 1);
    assert_eq!(exp_uncat[0].name, UNCATEGORIZED);
    assert_eq!(exp_uncat[0].total, dec!(8));
    assert_eq!(exp_uncat[0].count, 1);

    assert_eq!(b.income.len(), 1);
    assert_eq!(b.income[0].category_id, None);
    assert_eq!(b.income[0].total, dec!(60));
    assert!(b.savings.is_empty());
}

#[test]
fn same_category_id_counts_entries() {
    let entries = vec![
        entry("2025-08-01", EntryKind::Expense, dec!(3.5), Some("Coffee")),
        entry("2025-08-09", EntryKind::Expense, dec!(4), Some("Coffee")),
        entry("2025-08-19", EntryKind::Expense, dec!(4.25), Some("Coffee")),
    ];
    let b = category_breakdown(&entries);
    assert_eq!(b.expense.len(), 1);
    assert_eq!(b.expense[0].category_id.as_deref(), Some("cat-Coffee"));
    assert_eq!(b.expense[0].count, 3);
    assert_eq!(b.expense[0].total, dec!(11.75));
}

#[test]
fn presence_map_ignores_magnitude() {
    let entries = vec![
        entry("2025-08-10", EntryKind::Income, dec!(1), None),
        entry("2025-08-10", EntryKind::Income, dec!(1000000), None),
        entry("2025-08-11", EntryKind::Expense, dec!(0), None),
    ];
    let map = calendar_presence_map(&entries);
    let day = map[&d("2025-08-10")];
    assert!(day.has_income);
    assert!(!day.has_expense);
    assert!(!day.has_savings);

    let zero_day = map[&d("2025-08-11")];
    assert!(zero_day.has_expense);
    assert_eq!(map.len(), 2);
}

#[test]
fn presence_map_marks_every_kind_on_a_day() {
    let entries = vec![
        entry("2025-08-15", EntryKind::Savings, dec!(5), None),
        entry("2025-08-15", EntryKind::Expense, dec!(5), None),
        entry("2025-08-15", EntryKind::Income, dec!(5), None),
    ];
    let day = calendar_presence_map(&entries)[&d("2025-08-15")];
    assert!(day.has_income && day.has_expense && day.has_savings);
}

#[test]
fn yearly_rollup_has_all_twelve_months() {
    let entries = vec![entry("2025-03-14", EntryKind::Expense, dec!(42), None)];
    let year = yearly_rollup(&entries, 2025);
    assert_eq!(year.len(), 12);
    assert_eq!(year.keys().copied().collect::<Vec<_>>(), (1..=12).collect::<Vec<u32>>());
    assert_eq!(year[&3].expense, dec!(42));
    assert_eq!(year[&3].balance, dec!(-42));
    for m in [1, 2, 4, 5, 6, 7, 8, 9, 10, 11, 12] {
        assert_eq!(year[&m], Summary::default(), "month {}", m);
    }

    let empty = yearly_rollup(&[], 2024);
    assert_eq!(empty.len(), 12);
}

#[test]
fn year_total_uses_savings_inclusive_balance() {
    let entries = vec![
        entry("2025-01-25", EntryKind::Income, dec!(3000), None),
        entry("2025-01-26", EntryKind::Savings, dec!(500), None),
        entry("2025-06-02", EntryKind::Expense, dec!(1200), None),
        entry("2025-12-31", EntryKind::Savings, dec!(300), None),
    ];
    let rollup = yearly_rollup(&entries, 2025);
    assert_eq!(rollup[&1].balance, dec!(2500));
    let total = year_total(&rollup);
    assert_eq!(total.income, dec!(3000));
    assert_eq!(total.expense, dec!(1200));
    assert_eq!(total.savings, dec!(800));
    assert_eq!(total.balance, dec!(1000));
}

#[test]
fn goal_zero_never_divides() {
    let p = savings_goal_progress(&goal(Decimal::ZERO), &savings(Decimal::ZERO));
    assert_eq!(p.ratio, Decimal::ZERO);
    assert_eq!(p.raw_ratio, Decimal::ZERO);
    assert!(!p.achieved);

    let p = savings_goal_progress(&goal(Decimal::ZERO), &savings(dec!(50)));
    assert_eq!(p.ratio, Decimal::ZERO);
    assert!(p.achieved);
}

#[test]
fn goal_threshold_is_inclusive() {
    let p = savings_goal_progress(&goal(dec!(1000)), &savings(dec!(1000)));
    assert!(p.achieved);
    assert_eq!(p.ratio, Decimal::ONE);

    let p = savings_goal_progress(&goal(dec!(1000)), &savings(dec!(999)));
    assert!(!p.achieved);
    assert_eq!(p.ratio, dec!(0.999));
}

#[test]
fn goal_ratio_clamps_but_raw_does_not() {
    let p = savings_goal_progress(&goal(dec!(1000)), &savings(dec!(1050)));
    assert_eq!(p.ratio, Decimal::ONE);
    assert_eq!(p.raw_ratio, dec!(1.05));
    assert!(p.achieved);
}

#[test]
fn daily_average_and_verdict() {
    let s = Summary::new(dec!(3100), dec!(620), Decimal::ZERO);
    let avg = s.daily_average(31);
    assert_eq!(avg.income, dec!(100));
    assert_eq!(avg.expense, dec!(20));
    assert_eq!(avg.balance, dec!(80));
    assert_eq!(s.daily_average(0), Summary::default());

    assert_eq!(s.verdict(), Verdict::Surplus);
    assert_eq!(Summary::new(dec!(10), dec!(5), dec!(5)).verdict(), Verdict::Even);
    assert_eq!(Summary::new(dec!(10), dec!(5), dec!(6)).verdict(), Verdict::Deficit);
}

#[test]
fn summaries_add_field_wise() {
    let a = Summary::new(dec!(100), dec!(30), dec!(20));
    let b = Summary::new(dec!(50), dec!(80), Decimal::ZERO);
    let c = a + b;
    assert_eq!(c, Summary::new(dec!(150), dec!(110), dec!(20)));
    assert_eq!(c.balance, dec!(20));
    let total: Summary = vec![a, b].into_iter().sum();
    assert_eq!(total, c);
}

#[test]
fn tiny_goal_saturates_instead_of_overflowing() {
    let tiny = dec!(0.0000000000000000000000000001);
    let p = savings_goal_progress(&goal(tiny), &savings(dec!(10)));
    assert_eq!(p.raw_ratio, Decimal::MAX);
    assert_eq!(p.ratio, Decimal::ONE);
    assert!(p.achieved);

    let none_saved = savings_goal_progress(&goal(tiny), &savings(Decimal::ZERO));
    assert_eq!(none_saved.raw_ratio, Decimal::ZERO);
    assert!(!none_saved.achieved);
}

#[test]
fn huge_amounts_saturate_totals() {
    let entries = vec![
        entry("2025-08-01", EntryKind::Income, Decimal::MAX, Some("Pay")),
        entry("2025-08-02", EntryKind::Income, Decimal::MAX, Some("Pay")),
        entry("2025-08-03", EntryKind::Expense, Decimal::MAX, None),
        entry("2025-08-04", EntryKind::Savings, Decimal::MAX, None),
    ];
    let s = summarize_window(&entries, d(AUG_START), d(AUG_END));
    assert_eq!(s.income, Decimal::MAX);
    assert_eq!(s.expense, Decimal::MAX);
    assert_eq!(s.savings, Decimal::MAX);
    assert_eq!(s.balance, Decimal::MIN);

    let b = category_breakdown(&entries);
    assert_eq!(b.income[0].total, Decimal::MAX);
    assert_eq!(b.income[0].count, 2);

    let rollup = yearly_rollup(&entries, 2025);
    let mut doubled = rollup.clone();
    doubled.insert(13, rollup[&8]);
    assert_eq!(year_total(&doubled).income, Decimal::MAX);
}
