//! Hold types: the spans during which a job sat on hold.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// One contiguous span of a job being on hold.
///
/// An interval without `end_date` is open: the job is still on hold.
/// `duration_days` is frozen when the interval closes and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldInterval {
    pub start_date: Date,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
}

impl HoldInterval {
    /// Opens a new interval starting on `start`.
    pub fn open(start: Date) -> Self {
        Self {
            start_date: start,
            end_date: None,
            duration_days: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_date.is_none()
    }

    /// Days on hold as of `today`.
    ///
    /// Closed intervals report their frozen duration. Open intervals are
    /// measured up to `today` without writing anything back.
    pub fn days_as_of(&self, today: Date) -> u32 {
        if let Some(days) = self.duration_days {
            return days;
        }
        hold_days(self.start_date, self.end_date.unwrap_or(today))
    }
}

/// Calendar days between two dates, ignoring direction.
///
/// Not inclusive of both endpoints: a same-day span is 0.
pub fn hold_days(start: Date, end: Date) -> u32 {
    (end - start).get_days().unsigned_abs()
}

/// A job's hold intervals in chronological order.
///
/// At most one interval is open, and when present it is the last one.
/// Building a history from raw intervals repairs anything that breaks this,
/// so a value of this type can always be trusted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<HoldInterval>", into = "Vec<HoldInterval>")]
pub struct HoldHistory {
    intervals: Vec<HoldInterval>,
}

impl HoldHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intervals(&self) -> &[HoldInterval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// The currently open interval, if any.
    pub fn open_interval(&self) -> Option<&HoldInterval> {
        self.intervals.last().filter(|i| i.is_open())
    }

    /// Sum of all interval durations as of `today`, open interval included.
    pub fn total_days(&self, today: Date) -> u32 {
        self.intervals.iter().map(|i| i.days_as_of(today)).sum()
    }

    /// Appends an open interval starting on `start`.
    ///
    /// Returns `false` and leaves the history alone if one is already open.
    pub(crate) fn open(&mut self, start: Date) -> bool {
        if self.open_interval().is_some() {
            return false;
        }
        self.intervals.push(HoldInterval::open(start));
        true
    }

    /// Closes the open interval on `end`, freezing its duration.
    ///
    /// Returns the frozen duration, or `None` if nothing was open.
    pub(crate) fn close(&mut self, end: Date) -> Option<u32> {
        let interval = self.intervals.last_mut().filter(|i| i.is_open())?;
        let days = hold_days(interval.start_date, end);
        interval.end_date = Some(end);
        interval.duration_days = Some(days);
        Some(days)
    }
}

impl From<Vec<HoldInterval>> for HoldHistory {
    /// Keeps the first open interval in sequence order and moves it to the
    /// end. Later open intervals are dropped with a warning.
    fn from(raw: Vec<HoldInterval>) -> Self {
        let mut intervals = Vec::with_capacity(raw.len());
        let mut open = None;

        for mut interval in raw {
            if interval.is_open() {
                if open.is_none() {
                    open = Some(interval);
                } else {
                    tracing::warn!(
                        start = %interval.start_date,
                        "dropping extra open hold interval"
                    );
                }
                continue;
            }
            // Older records may carry a closed interval without a frozen duration.
            if interval.duration_days.is_none()
                && let Some(end) = interval.end_date
            {
                interval.duration_days = Some(hold_days(interval.start_date, end));
            }
            intervals.push(interval);
        }

        intervals.extend(open);
        Self { intervals }
    }
}

impl From<HoldHistory> for Vec<HoldInterval> {
    fn from(history: HoldHistory) -> Self {
        history.intervals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    #[test]
    fn same_day_is_zero() {
        let d = date(2023, 10, 28);
        assert_eq!(hold_days(d, d), 0);
    }

    #[test]
    fn days_ignore_direction() {
        assert_eq!(hold_days(date(2023, 10, 28), date(2023, 10, 30)), 2);
        assert_eq!(hold_days(date(2023, 10, 30), date(2023, 10, 28)), 2);
    }

    #[test]
    fn days_cross_month_boundary() {
        assert_eq!(hold_days(date(2024, 2, 27), date(2024, 3, 2)), 4);
    }

    #[test]
    fn open_interval_is_measured_live() {
        let interval = HoldInterval::open(date(2023, 10, 28));
        assert_eq!(interval.days_as_of(date(2023, 11, 4)), 7);
        assert!(interval.duration_days.is_none());
    }

    #[test]
    fn frozen_duration_wins_over_dates() {
        let interval = HoldInterval {
            start_date: date(2023, 10, 1),
            end_date: Some(date(2023, 10, 10)),
            duration_days: Some(3),
        };
        assert_eq!(interval.days_as_of(date(2024, 1, 1)), 3);
    }

    #[test]
    fn open_then_close_freezes_duration() {
        let mut history = HoldHistory::new();
        assert!(history.open(date(2023, 10, 28)));
        assert!(!history.open(date(2023, 10, 29)));
        assert_eq!(history.close(date(2023, 10, 30)), Some(2));
        assert!(history.open_interval().is_none());
        assert_eq!(history.close(date(2023, 11, 1)), None);
        assert_eq!(history.intervals()[0].duration_days, Some(2));
    }

    #[test]
    fn keeps_first_of_two_open_intervals() {
        let raw = vec![
            HoldInterval::open(date(2023, 10, 1)),
            HoldInterval::open(date(2023, 10, 5)),
        ];
        let history = HoldHistory::from(raw);
        assert_eq!(history.intervals(), &[HoldInterval::open(date(2023, 10, 1))]);
    }

    #[test]
    fn open_interval_moves_to_the_end() {
        let raw = vec![
            HoldInterval::open(date(2023, 10, 20)),
            HoldInterval {
                start_date: date(2023, 10, 1),
                end_date: Some(date(2023, 10, 4)),
                duration_days: Some(3),
            },
        ];
        let history = HoldHistory::from(raw);
        assert_eq!(history.len(), 2);
        assert_eq!(
            history.open_interval().map(|i| i.start_date),
            Some(date(2023, 10, 20))
        );
    }

    #[test]
    fn fills_missing_duration_on_load() {
        let json = r#"[{"startDate":"2023-10-01","endDate":"2023-10-06"}]"#;
        let history: HoldHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.intervals()[0].duration_days, Some(5));
    }

    #[test]
    fn serializes_as_plain_list() {
        let json = r#"[{"startDate":"2023-10-28"}]"#;
        let history: HoldHistory = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&history).unwrap(), json);
    }

    #[test]
    fn deserialize_repairs_broken_invariant() {
        let json = r#"[
            {"startDate":"2023-09-01","endDate":"2023-09-03"},
            {"startDate":"2023-10-01"},
            {"startDate":"2023-10-02"}
        ]"#;
        let history: HoldHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.intervals()[0].duration_days, Some(2));
        assert_eq!(
            history.open_interval().map(|i| i.start_date),
            Some(date(2023, 10, 1))
        );
    }

    #[test]
    fn total_days_includes_open_interval() {
        let json = r#"[
            {"startDate":"2023-10-01","endDate":"2023-10-03","durationDays":2},
            {"startDate":"2023-10-10"}
        ]"#;
        let history: HoldHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.total_days(date(2023, 10, 15)), 7);
    }
}
