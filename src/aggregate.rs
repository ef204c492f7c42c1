// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-side views over ledger entries: window totals, category breakdowns,
//! calendar markers, yearly rollups and savings-goal progress.
//!
//! Every function here is pure and total. Soft-deleted entries are skipped
//! everywhere. Callers are expected to pass entries already scoped to the
//! window they ask about; nothing is re-filtered by date.

use std::collections::{BTreeMap, HashMap};
use std::iter::Sum;
use std::ops::Add;

use chrono::{Datelike, NaiveDate};
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Entry, EntryKind, SavingsGoal};

pub const UNCATEGORIZED: &str = "(uncategorized)";

/// Totals for a window. `balance` is always `income - expense - savings`:
/// money set aside as savings leaves the spendable balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expense: Decimal,
    pub savings: Decimal,
    pub balance: Decimal,
}

impl Summary {
    pub fn new(income: Decimal, expense: Decimal, savings: Decimal) -> Self {
        Summary {
            income,
            expense,
            savings,
            balance: income.saturating_sub(expense).saturating_sub(savings),
        }
    }

    pub fn total(&self, kind: EntryKind) -> Decimal {
        match kind {
            EntryKind::Income => self.income,
            EntryKind::Expense => self.expense,
            EntryKind::Savings => self.savings,
        }
    }

    // Totals saturate at the Decimal range instead of overflowing.
    fn record(&mut self, kind: EntryKind, amount: Decimal) {
        *self = match kind {
            EntryKind::Income => {
                Summary::new(self.income.saturating_add(amount), self.expense, self.savings)
            }
            EntryKind::Expense => {
                Summary::new(self.income, self.expense.saturating_add(amount), self.savings)
            }
            EntryKind::Savings => {
                Summary::new(self.income, self.expense, self.savings.saturating_add(amount))
            }
        };
    }

    /// Per-day figures for a window of `days` days. Zero days yields zeros.
    pub fn daily_average(&self, days: u32) -> Summary {
        if days == 0 {
            return Summary::default();
        }
        let d = Decimal::from(days);
        Summary {
            income: self.income / d,
            expense: self.expense / d,
            savings: self.savings / d,
            balance: self.balance / d,
        }
    }

    pub fn verdict(&self) -> Verdict {
        if self.balance > Decimal::ZERO {
            Verdict::Surplus
        } else if self.balance < Decimal::ZERO {
            Verdict::Deficit
        } else {
            Verdict::Even
        }
    }
}

impl Add for Summary {
    type Output = Summary;

    fn add(self, rhs: Summary) -> Summary {
        Summary::new(
            self.income.saturating_add(rhs.income),
            self.expense.saturating_add(rhs.expense),
            self.savings.saturating_add(rhs.savings),
        )
    }
}

impl Sum for Summary {
    fn sum<I: Iterator<Item = Summary>>(iter: I) -> Summary {
        iter.fold(Summary::default(), Add::add)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Surplus,
    Deficit,
    Even,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    /// `None` for the synthetic uncategorized bucket.
    pub category_id: Option<String>,
    pub name: String,
    pub emoji: Option<String>,
    pub total: Decimal,
    pub count: u64,
}

impl CategoryStat {
    fn empty_for(entry: &Entry) -> Self {
        match &entry.category {
            Some(c) => CategoryStat {
                category_id: Some(c.id.clone()),
                name: c.name.clone(),
                emoji: c.emoji.clone(),
                total: Decimal::ZERO,
                count: 0,
            },
            None => CategoryStat {
                category_id: None,
                name: UNCATEGORIZED.to_string(),
                emoji: None,
                total: Decimal::ZERO,
                count: 0,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub income: Vec<CategoryStat>,
    pub expense: Vec<CategoryStat>,
    pub savings: Vec<CategoryStat>,
}

impl CategoryBreakdown {
    pub fn for_kind(&self, kind: EntryKind) -> &[CategoryStat] {
        match kind {
            EntryKind::Income => &self.income,
            EntryKind::Expense => &self.expense,
            EntryKind::Savings => &self.savings,
        }
    }

    fn for_kind_mut(&mut self, kind: EntryKind) -> &mut Vec<CategoryStat> {
        match kind {
            EntryKind::Income => &mut self.income,
            EntryKind::Expense => &mut self.expense,
            EntryKind::Savings => &mut self.savings,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayMarkers {
    pub has_income: bool,
    pub has_expense: bool,
    pub has_savings: bool,
}

impl DayMarkers {
    fn mark(&mut self, kind: EntryKind) {
        match kind {
            EntryKind::Income => self.has_income = true,
            EntryKind::Expense => self.has_expense = true,
            EntryKind::Savings => self.has_savings = true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    /// Clamped to `[0, 1]` for progress bars.
    pub ratio: Decimal,
    /// Unclamped, for labels such as "105% achieved".
    pub raw_ratio: Decimal,
    pub achieved: bool,
}

fn live(entries: &[Entry]) -> impl Iterator<Item = &Entry> {
    entries.iter().filter(|e| e.is_live())
}

/// Sums live entries per kind. `start..=end` documents the window the caller
/// filtered on; entries outside it are still counted but logged.
pub fn summarize_window(entries: &[Entry], start: NaiveDate, end: NaiveDate) -> Summary {
    let mut summary = Summary::default();
    let mut outside = 0usize;
    for e in live(entries) {
        if e.date < start || e.date > end {
            outside += 1;
        }
        summary.record(e.kind, e.amount);
    }
    if outside > 0 {
        debug!(
            "summarize_window: {} entries fall outside {}..={}",
            outside, start, end
        );
    }
    summary
}

/// Groups live entries by kind and category. Each list is ordered by total,
/// largest first; equal totals keep the order they were first seen in.
pub fn category_breakdown(entries: &[Entry]) -> CategoryBreakdown {
    let mut buckets: Vec<(EntryKind, CategoryStat)> = Vec::new();
    let mut index: HashMap<(EntryKind, Option<&str>), usize> = HashMap::new();

    for e in live(entries) {
        let key = (e.kind, e.category.as_ref().map(|c| c.id.as_str()));
        let slot = *index.entry(key).or_insert_with(|| {
            buckets.push((e.kind, CategoryStat::empty_for(e)));
            buckets.len() - 1
        });
        let stat = &mut buckets[slot].1;
        stat.total = stat.total.saturating_add(e.amount);
        stat.count += 1;
    }

    let mut out = CategoryBreakdown::default();
    for (kind, stat) in buckets {
        out.for_kind_mut(kind).push(stat);
    }
    for kind in EntryKind::ALL {
        // sort_by is stable
        out.for_kind_mut(kind).sort_by(|a, b| b.total.cmp(&a.total));
    }
    out
}

/// Which kinds occur on each date. Dates with no live entry are absent.
pub fn calendar_presence_map(entries: &[Entry]) -> BTreeMap<NaiveDate, DayMarkers> {
    let mut map: BTreeMap<NaiveDate, DayMarkers> = BTreeMap::new();
    for e in live(entries) {
        map.entry(e.date).or_default().mark(e.kind);
    }
    map
}

/// Month-by-month summaries keyed 1..=12; every month is present.
pub fn yearly_rollup(entries: &[Entry], year: i32) -> BTreeMap<u32, Summary> {
    let mut months: BTreeMap<u32, Summary> = (1..=12).map(|m| (m, Summary::default())).collect();
    let mut outside = 0usize;
    for e in live(entries) {
        if e.date.year() != year {
            outside += 1;
        }
        months.entry(e.date.month()).or_default().record(e.kind, e.amount);
    }
    if outside > 0 {
        debug!("yearly_rollup: {} entries are not dated {}", outside, year);
    }
    months
}

pub fn year_total(rollup: &BTreeMap<u32, Summary>) -> Summary {
    rollup.values().copied().sum()
}

pub fn savings_goal_progress(goal: &SavingsGoal, month: &Summary) -> GoalProgress {
    if goal.goal_amount.is_zero() {
        return GoalProgress {
            ratio: Decimal::ZERO,
            raw_ratio: Decimal::ZERO,
            achieved: month.savings > Decimal::ZERO,
        };
    }
    // A tiny goal can push the quotient past the Decimal range.
    let raw_ratio = month.savings.checked_div(goal.goal_amount).unwrap_or(
        if month.savings.is_sign_negative() == goal.goal_amount.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        },
    );
    GoalProgress {
        ratio: raw_ratio.clamp(Decimal::ZERO, Decimal::ONE),
        raw_ratio,
        achieved: month.savings >= goal.goal_amount,
    }
}
