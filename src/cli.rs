//! CLI interface for proplan.
//!
//! Each subcommand is non-interactive: arguments in, plain text out.
//! Commands that change the board run the board operation first and then
//! commit its single change to storage.
//!
//! IDs are accepted as a full UUID or any unambiguous prefix.

mod dispatch;
mod format;
mod job;
mod material;

use clap::{Parser, Subcommand, ValueEnum};
use jiff::civil::Date;
use uuid::Uuid;

use crate::{
    board::{Board, Change},
    model::{JobStatus, Priority, StatusColor},
    storage::Storage,
    weekly::{Summary, weekly_dispatch},
};

pub use dispatch::DispatchCommand;
pub use job::{JobCommand, JobFields};
pub use material::MaterialCommand;

/// proplan: production planning for the post-processing floor.
#[derive(Debug, Parser)]
#[command(name = "proplan", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Treat this date as today (YYYY-MM-DD). Defaults to the local date.
    #[arg(long, global = true)]
    today: Option<Date>,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Workflow: a job through the line
  1. proplan job new --client Tesla --part 'Mounting Brackets' --qty 1500
     → prints a job ID (e.g. a3b0fc12)
  2. proplan job edit a3b --status on-hold
  3. proplan job edit a3b --status rework      (closes the hold interval)
  4. proplan job edit a3b --status completed   (moves it to the dispatch log)

Reports:
  proplan report weekly
  proplan report summary --json";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Track jobs through priming, painting, QC and holds.
    Job {
        #[command(subcommand)]
        command: JobCommand,
    },

    /// Log and review shipped parts.
    Dispatch {
        #[command(subcommand)]
        command: DispatchCommand,
    },

    /// Keep the material inventory current.
    Material {
        #[command(subcommand)]
        command: MaterialCommand,
    },

    /// Dispatch totals and dashboard numbers.
    Report {
        #[command(subcommand)]
        report: ReportKind,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReportKind {
    /// Units dispatched per day over the last seven days.
    Weekly {
        /// Print JSON instead of a chart.
        #[arg(long)]
        json: bool,
    },

    /// Active and on-hold job counts with the weekly total.
    Summary {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// CLI-facing job status, mapped to the domain `JobStatus`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Pending,
    Primer,
    FirstPaint,
    FinalPaint,
    Rework,
    Qc,
    OnHold,
    Completed,
}

impl StatusArg {
    fn to_domain(self) -> JobStatus {
        match self {
            Self::Pending => JobStatus::Pending,
            Self::Primer => JobStatus::Primer,
            Self::FirstPaint => JobStatus::FirstPaint,
            Self::FinalPaint => JobStatus::FinalPaint,
            Self::Rework => JobStatus::Rework,
            Self::Qc => JobStatus::Qc,
            Self::OnHold => JobStatus::OnHold,
            Self::Completed => JobStatus::Completed,
        }
    }
}

/// CLI-facing priority, mapped to the domain `Priority`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityArg {
    fn to_domain(self) -> Priority {
        match self {
            Self::Low => Priority::Low,
            Self::Medium => Priority::Medium,
            Self::High => Priority::High,
            Self::Critical => Priority::Critical,
        }
    }
}

/// CLI-facing material status colour.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorArg {
    Emerald,
    Amber,
    Red,
    Slate,
}

impl ColorArg {
    fn to_domain(self) -> StatusColor {
        match self {
            Self::Emerald => StatusColor::Emerald,
            Self::Amber => StatusColor::Amber,
            Self::Red => StatusColor::Red,
            Self::Slate => StatusColor::Slate,
        }
    }
}

impl Cli {
    /// The date commands treat as today: `--today`, or the local date.
    pub fn today(&self) -> Date {
        self.today.unwrap_or_else(local_today)
    }
}

/// Run a parsed command, returning an error message on failure.
///
/// With `seed_demo_data`, a database that was never seeded gets the demo
/// board first, dated relative to the command's today.
pub fn run(storage: &Storage, cli: Cli, seed_demo_data: bool) -> Result<(), String> {
    let today = cli.today();

    if seed_demo_data {
        storage
            .seed_if_new(today)
            .map_err(|e| format!("failed to seed demo data: {e}"))?;
    }

    let board = storage
        .load_board()
        .map_err(|e| format!("failed to load board: {e}"))?;

    match cli.command {
        Command::Job { command } => job::run(storage, board, command, today),
        Command::Dispatch { command } => dispatch::run(storage, board, command, today),
        Command::Material { command } => material::run(storage, board, command),
        Command::Report { report } => cmd_report(&board, &report, today),
    }
}

/// Today's date in the local time zone.
fn local_today() -> Date {
    jiff::Zoned::now().date()
}

fn cmd_report(board: &Board, report: &ReportKind, today: Date) -> Result<(), String> {
    match report {
        ReportKind::Weekly { json } => {
            let weekly = weekly_dispatch(&board.dispatches, today);
            if *json {
                print_json(&weekly)?;
            } else {
                print!("{}", format::format_weekly(&weekly));
            }
        }
        ReportKind::Summary { json } => {
            let summary = Summary::build(board, today);
            if *json {
                print_json(&summary)?;
            } else {
                println!("Active jobs:    {}", summary.active_jobs);
                println!("On hold:        {}", summary.on_hold_jobs);
                println!("Units (7 days): {}", summary.total_weekly_units);
            }
        }
    }
    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize report: {e}"))?;
    println!("{json}");
    Ok(())
}

/// Commit a board change, with context on failure.
fn persist(storage: &Storage, change: &Change) -> Result<(), String> {
    storage
        .commit(change)
        .map_err(|e| format!("failed to save: {e}"))
}

/// Refuse a destructive command unless the operator confirmed it.
fn require_confirmation(yes: bool, what: &str) -> Result<(), String> {
    if yes {
        Ok(())
    } else {
        Err(format!("refusing to delete {what} without --yes"))
    }
}

/// Resolve an ID reference (full UUID or unambiguous prefix) against `items`.
fn resolve<'a, T>(
    items: &'a [T],
    id_of: impl Fn(&T) -> Uuid,
    reference: &str,
    kind: &str,
) -> Result<&'a T, String> {
    // Try full UUID first.
    if let Ok(id) = reference.parse::<Uuid>() {
        return items
            .iter()
            .find(|item| id_of(item) == id)
            .ok_or_else(|| format!("{kind} not found: {id}"));
    }

    let matches: Vec<&T> = items
        .iter()
        .filter(|item| id_of(item).to_string().starts_with(reference))
        .collect();

    match matches.len() {
        0 => Err(format!("no {kind} matching '{reference}'")),
        1 => Ok(matches[0]),
        n => {
            let ids: Vec<String> = matches
                .iter()
                .map(|item| format::short_id(id_of(item)))
                .collect();
            Err(format!(
                "'{reference}' is ambiguous: matches {n} {kind}s: {}",
                ids.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_today() {
        let cli = Cli::try_parse_from(["proplan", "report", "weekly", "--today", "2023-10-30"])
            .unwrap();
        assert_eq!(cli.today, Some(jiff::civil::date(2023, 10, 30)));
    }

    #[test]
    fn resolve_by_prefix() {
        let ids = [
            "a3b0fc12-0000-4000-8000-000000000000".parse::<Uuid>().unwrap(),
            "a3c11111-0000-4000-8000-000000000000".parse::<Uuid>().unwrap(),
        ];
        let found = resolve(&ids, |id| *id, "a3b", "job").unwrap();
        assert_eq!(*found, ids[0]);

        let err = resolve(&ids, |id| *id, "a3", "job").unwrap_err();
        assert!(err.contains("ambiguous"));

        let err = resolve(&ids, |id| *id, "ff", "job").unwrap_err();
        assert!(err.contains("no job matching"));
    }

    #[test]
    fn resolve_by_full_uuid() {
        let id = Uuid::new_v4();
        let ids = [id];
        let found = resolve(&ids, |id| *id, &id.to_string(), "job").unwrap();
        assert_eq!(*found, id);
    }

    #[test]
    fn seeding_follows_the_today_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let cli = Cli::try_parse_from(["proplan", "--today", "2023-10-30", "report", "summary"])
            .unwrap();

        run(&storage, cli, true).unwrap();

        let board = storage.load_board().unwrap();
        let today = jiff::civil::date(2023, 10, 30);
        assert_eq!(board.jobs.len(), 5);
        assert_eq!(weekly_dispatch(&board.dispatches, today).total(), 1510);
    }

    #[test]
    fn run_without_seeding_leaves_storage_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let cli = Cli::try_parse_from(["proplan", "report", "weekly"]).unwrap();

        run(&storage, cli, false).unwrap();

        assert_eq!(storage.load_board().unwrap(), Board::default());
    }

    #[test]
    fn deletion_needs_confirmation() {
        assert!(require_confirmation(false, "job a3b0fc12").is_err());
        assert!(require_confirmation(true, "job a3b0fc12").is_ok());
    }
}
