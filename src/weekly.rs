//! Weekly dispatch aggregation.
//!
//! Groups the dispatch log by calendar day over a trailing seven-day window
//! ending today. Every day in the window appears exactly once, oldest first,
//! even when nothing shipped.

use std::collections::BTreeMap;

use jiff::{Span, civil::Date, civil::Weekday};
use serde::Serialize;

use crate::{board::Board, model::DispatchRecord};

/// Number of days in the trailing window.
pub const WINDOW_DAYS: i64 = 7;

/// Units shipped on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayOutput {
    pub date: Date,

    /// Short weekday name, e.g. "Mon".
    pub day: &'static str,

    pub output: u64,
}

/// Seven consecutive days of dispatch totals, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyDispatch {
    pub days: Vec<DayOutput>,
}

impl WeeklyDispatch {
    /// Sum of output over the whole window.
    pub fn total(&self) -> u64 {
        self.days.iter().map(|d| d.output).sum()
    }
}

/// Builds the trailing window ending on `today`, inclusive.
///
/// A record counts toward a day only if its date equals that day.
/// The result does not depend on the order of `records`.
pub fn weekly_dispatch(records: &[DispatchRecord], today: Date) -> WeeklyDispatch {
    let first = today.saturating_sub(Span::new().days(WINDOW_DAYS - 1));

    let mut totals: BTreeMap<Date, u64> = BTreeMap::new();
    for record in records.iter().filter(|r| r.date >= first && r.date <= today) {
        *totals.entry(record.date).or_default() += u64::from(record.quantity);
    }

    let days = (0..WINDOW_DAYS)
        .map(|offset| {
            let date = first.saturating_add(Span::new().days(offset));
            DayOutput {
                date,
                day: short_weekday(date.weekday()),
                output: totals.get(&date).copied().unwrap_or(0),
            }
        })
        .collect();

    WeeklyDispatch { days }
}

fn short_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Jobs in the pipeline: neither completed nor on hold.
    pub active_jobs: usize,
    pub on_hold_jobs: usize,
    pub weekly: WeeklyDispatch,
    pub total_weekly_units: u64,
}

impl Summary {
    pub fn build(board: &Board, today: Date) -> Self {
        let weekly = weekly_dispatch(&board.dispatches, today);
        let total_weekly_units = weekly.total();
        Self {
            active_jobs: board.active_jobs().count(),
            on_hold_jobs: board.on_hold_jobs().count(),
            weekly,
            total_weekly_units,
        }
    }
}
