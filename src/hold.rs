//! On-hold transition processing.
//!
//! A job's status change decides what happens to its hold history:
//!
//! | previous    | next        | effect                           |
//! |-------------|-------------|----------------------------------|
//! | On Hold     | On Hold     | nothing                          |
//! | not On Hold | On Hold     | open a new interval today        |
//! | On Hold     | not On Hold | close the open interval today    |
//! | not On Hold | not On Hold | nothing                          |
//!
//! "Not On Hold" includes a job that is being created.
//! When a stored history had more than one open interval, loading keeps only
//! the first (see [`HoldHistory`]), so leaving hold closes that one.
//! Nothing here touches any other job field or reads the clock.

use jiff::civil::Date;

use crate::model::{HoldHistory, JobStatus};

/// Which edge of the hold state a status change crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Both statuses are on hold.
    Stay,
    /// Entering hold from any other status, or creating a job on hold.
    Enter,
    /// Leaving hold for any other status.
    Leave,
    /// Neither status is on hold.
    Pass,
}

impl Edge {
    pub fn of(previous: Option<JobStatus>, next: JobStatus) -> Self {
        let was = previous == Some(JobStatus::OnHold);
        let is = next == JobStatus::OnHold;
        match (was, is) {
            (true, true) => Self::Stay,
            (false, true) => Self::Enter,
            (true, false) => Self::Leave,
            (false, false) => Self::Pass,
        }
    }
}

/// What a transition did to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Opened,
    Closed { days: u32 },
    /// Entered hold while an interval was already open; kept the existing one.
    AlreadyOpen,
    /// Left hold but no interval was open; nothing to close.
    NothingOpen,
}

/// Applies a status change to a validated hold history.
pub fn apply(
    previous: Option<JobStatus>,
    next: JobStatus,
    history: &HoldHistory,
    today: Date,
) -> (HoldHistory, Outcome) {
    let mut updated = history.clone();
    let outcome = match Edge::of(previous, next) {
        Edge::Stay | Edge::Pass => Outcome::Unchanged,
        Edge::Enter => {
            if updated.open(today) {
                Outcome::Opened
            } else {
                tracing::warn!(%today, "job entered hold with an interval already open");
                Outcome::AlreadyOpen
            }
        }
        Edge::Leave => match updated.close(today) {
            Some(days) => Outcome::Closed { days },
            None => {
                tracing::warn!(%today, "job left hold with no open interval");
                Outcome::NothingOpen
            }
        },
    };
    tracing::debug!(?previous, %next, ?outcome, "hold transition");
    (updated, outcome)
}
