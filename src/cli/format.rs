//! Output formatting for CLI display.

use jiff::civil::Date;
use uuid::Uuid;

use crate::{
    hold::Outcome,
    model::{DispatchRecord, Gauge, HoldHistory, Job, Material, StatusColor},
    weekly::WeeklyDispatch,
};

/// Widest bar in the weekly chart.
const BAR_WIDTH: u64 = 40;

/// The first eight characters of an ID, enough to address it by prefix.
pub(super) fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// One line per job for `job list`.
pub(super) fn format_job_row(job: &Job, today: Date) -> String {
    let qty = job
        .po_quantity
        .map_or_else(|| "-".to_string(), |q| q.to_string());
    let held = match job.hold_history.open_interval() {
        Some(interval) => format!("  (on hold {}d)", interval.days_as_of(today)),
        None => String::new(),
    };
    format!(
        "{}  [{}] [{}]  {}  {}  qty {}  due {}{held}",
        short_id(job.id),
        job.status,
        job.priority,
        job.name,
        job.client,
        qty,
        job.end_date,
    )
}

/// Full detail for `job show`.
pub(super) fn format_job_detail(job: &Job, today: Date) -> String {
    let mut lines = vec![
        format!("{}  {}", job.id, job.name),
        format!("  Client:       {}", job.client),
        format!("  Part:         {}", job.part_name),
        format!("  Quote:        {}", job.quote_id),
        format!("  PO date:      {}", job.po_date),
        format!(
            "  PO quantity:  {}",
            job.po_quantity
                .map_or_else(|| "-".to_string(), |q| q.to_string())
        ),
        format!("  Material:     {}", job.material),
        format!("  Status:       {}", job.status),
        format!("  Priority:     {}", job.priority),
        format!("  Progress:     {}%", job.progress),
        format!("  Started:      {}", job.start_date),
        format!("  Due:          {}", job.end_date),
    ];
    if let Some(date) = job.dispatched_date {
        lines.push(format!("  Dispatched:   {date}"));
    }
    if let Some(density) = job.nesting_density {
        lines.push(format!("  Nesting:      {density}%"));
    }
    if let Some(notes) = &job.notes {
        lines.push(format!("  Notes:        {notes}"));
    }
    if !job.hold_history.is_empty() {
        lines.push("  On hold history:".to_string());
        lines.extend(format_hold_history(&job.hold_history, today));
    }
    lines.join("\n")
}

/// One line per hold interval, with frozen or live durations.
pub(super) fn format_hold_history(history: &HoldHistory, today: Date) -> Vec<String> {
    history
        .intervals()
        .iter()
        .map(|interval| {
            let days = interval.days_as_of(today);
            match interval.end_date {
                Some(end) => format!("    {} → {end}  {days} days", interval.start_date),
                None => format!(
                    "    {} → current  {days} days (ongoing)",
                    interval.start_date
                ),
            }
        })
        .collect()
}

/// What a job edit did to its hold state, if worth telling the operator.
pub(super) fn format_hold_outcome(outcome: Outcome, job: &Job) -> Option<String> {
    let since = || job.hold_history.open_interval().map(|i| i.start_date);
    match outcome {
        Outcome::Opened | Outcome::Unchanged => since().map(|d| format!("On hold since {d}")),
        Outcome::AlreadyOpen => since().map(|d| format!("Already on hold since {d}")),
        Outcome::Closed { days } => Some(format!("Released from hold after {days} days")),
        Outcome::NothingOpen => None,
    }
}

pub(super) fn format_dispatch_row(record: &DispatchRecord) -> String {
    format!(
        "{}  {}  {}  {}  {} units",
        short_id(record.id),
        record.date,
        record.batch_name,
        record.client,
        record.quantity,
    )
}

pub(super) fn format_material_row(material: &Material) -> String {
    let gauge = match material.gauge {
        Gauge::Level { percentage } => format!("{percentage}%"),
        Gauge::Status { color } => color_name(color).to_string(),
    };
    format!(
        "{}  {}  {}  [{gauge}]",
        short_id(material.id),
        material.name,
        material.value
    )
}

fn color_name(color: StatusColor) -> &'static str {
    match color {
        StatusColor::Emerald => "emerald",
        StatusColor::Amber => "amber",
        StatusColor::Red => "red",
        StatusColor::Slate => "slate",
    }
}

/// Horizontal bar chart of the week, one row per day, with the total.
pub(super) fn format_weekly(weekly: &WeeklyDispatch) -> String {
    let peak = weekly.days.iter().map(|d| d.output).max().unwrap_or(0);
    let mut out = String::new();
    for day in &weekly.days {
        let width = if peak == 0 {
            0
        } else {
            day.output * BAR_WIDTH / peak
        };
        let bar = "#".repeat(usize::try_from(width).unwrap_or(0));
        out.push_str(&format!(
            "{} {}  {:>6}  {bar}\n",
            day.day, day.date, day.output
        ));
    }
    out.push_str(&format!("Total: {} units\n", weekly.total()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    use crate::{
        model::{HoldInterval, JobStatus},
        weekly::weekly_dispatch,
    };

    #[test]
    fn hold_history_marks_open_interval() {
        let history = HoldHistory::from(vec![
            HoldInterval {
                start_date: date(2023, 10, 1),
                end_date: Some(date(2023, 10, 3)),
                duration_days: Some(2),
            },
            HoldInterval::open(date(2023, 10, 28)),
        ]);

        let lines = format_hold_history(&history, date(2023, 10, 30));
        assert_eq!(lines[0], "    2023-10-01 → 2023-10-03  2 days");
        assert_eq!(lines[1], "    2023-10-28 → current  2 days (ongoing)");
    }

    #[test]
    fn job_row_shows_live_hold() {
        let mut job = Job::new("Proto Batch", "Skydio", date(2023, 10, 27));
        job.status = JobStatus::OnHold;
        job.hold_history = HoldHistory::from(vec![HoldInterval::open(date(2023, 10, 28))]);

        let row = format_job_row(&job, date(2023, 11, 1));
        assert!(row.contains("[On Hold]"));
        assert!(row.ends_with("(on hold 4d)"));
    }

    #[test]
    fn hold_outcome_notes() {
        let mut job = Job::new("Proto Batch", "Skydio", date(2023, 10, 27));
        assert_eq!(format_hold_outcome(Outcome::Unchanged, &job), None);
        assert_eq!(
            format_hold_outcome(Outcome::Closed { days: 2 }, &job).as_deref(),
            Some("Released from hold after 2 days")
        );

        job.hold_history = HoldHistory::from(vec![HoldInterval::open(date(2023, 10, 28))]);
        assert_eq!(
            format_hold_outcome(Outcome::Opened, &job).as_deref(),
            Some("On hold since 2023-10-28")
        );
    }

    #[test]
    fn weekly_chart_scales_to_peak() {
        let today = date(2023, 10, 30);
        let records = vec![
            DispatchRecord::logged("B1", "Tesla", 400, today),
            DispatchRecord::logged("B2", "Ford", 200, date(2023, 10, 29)),
        ];
        let chart = format_weekly(&weekly_dispatch(&records, today));
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 8);
        assert!(lines[6].ends_with(&"#".repeat(40)));
        assert!(lines[5].ends_with(&"#".repeat(20)));
        assert!(lines[0].ends_with("     0  "));
        assert_eq!(lines[7], "Total: 600 units");
    }
}
