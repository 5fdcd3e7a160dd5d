//! `proplan job …`: create, edit, inspect and delete jobs.

use clap::{Args, Subcommand};
use jiff::civil::Date;

use crate::{
    board::{Board, Change, SaveMode},
    model::Job,
    storage::Storage,
};

use super::{
    PriorityArg, StatusArg,
    format::{format_hold_outcome, format_job_detail, format_job_row, short_id},
    persist, require_confirmation, resolve,
};

#[derive(Debug, Subcommand)]
pub enum JobCommand {
    /// Create a job. Prints the job ID.
    New {
        #[command(flatten)]
        fields: JobFields,
    },

    /// Edit a job. Changing the status drives hold tracking and completion.
    Edit {
        /// Job ID or unambiguous prefix.
        id: String,

        #[command(flatten)]
        fields: JobFields,
    },

    /// List active jobs.
    List,

    /// Show one job with its hold history.
    Show {
        /// Job ID or unambiguous prefix.
        id: String,
    },

    /// Delete a job without dispatching it.
    Delete {
        /// Job ID or unambiguous prefix.
        id: String,

        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

/// Job fields settable from the command line. Unset fields are left alone.
#[derive(Debug, Default, Args)]
pub struct JobFields {
    /// Batch name, e.g. "Batch 204". Generated when omitted on create.
    #[arg(long)]
    name: Option<String>,

    /// Part description.
    #[arg(long)]
    part: Option<String>,

    /// Client company. Required on create.
    #[arg(long)]
    client: Option<String>,

    #[arg(long)]
    quote: Option<String>,

    #[arg(long)]
    po_date: Option<Date>,

    /// PO quantity; becomes the dispatched quantity on completion.
    #[arg(long)]
    qty: Option<u32>,

    /// When work started.
    #[arg(long)]
    start: Option<Date>,

    /// When dispatch is scheduled.
    #[arg(long)]
    due: Option<Date>,

    /// Actual dispatch date; defaults to today on completion.
    #[arg(long)]
    dispatched: Option<Date>,

    #[arg(long)]
    material: Option<String>,

    #[arg(long, value_enum)]
    status: Option<StatusArg>,

    #[arg(long, value_enum)]
    priority: Option<PriorityArg>,

    /// Completion estimate, 0–100.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    progress: Option<u8>,

    #[arg(long)]
    notes: Option<String>,

    /// Nesting density in percent.
    #[arg(long)]
    nesting: Option<f64>,
}

impl JobFields {
    /// Overwrite every field that was given on the command line.
    fn apply_to(self, job: &mut Job) {
        if let Some(v) = self.name {
            job.name = v;
        }
        if let Some(v) = self.part {
            job.part_name = v;
        }
        if let Some(v) = self.client {
            job.client = v;
        }
        if let Some(v) = self.quote {
            job.quote_id = v;
        }
        if let Some(v) = self.po_date {
            job.po_date = v;
        }
        if let Some(v) = self.qty {
            job.po_quantity = Some(v);
        }
        if let Some(v) = self.start {
            job.start_date = v;
        }
        if let Some(v) = self.due {
            job.end_date = v;
        }
        if let Some(v) = self.dispatched {
            job.dispatched_date = Some(v);
        }
        if let Some(v) = self.material {
            job.material = v;
        }
        if let Some(v) = self.status {
            job.status = v.to_domain();
        }
        if let Some(v) = self.priority {
            job.priority = v.to_domain();
        }
        if let Some(v) = self.progress {
            job.progress = v;
        }
        if let Some(v) = self.notes {
            job.notes = Some(v);
        }
        if let Some(v) = self.nesting {
            job.nesting_density = Some(v);
        }
    }
}

pub(super) fn run(
    storage: &Storage,
    board: Board,
    command: JobCommand,
    today: Date,
) -> Result<(), String> {
    match command {
        JobCommand::New { fields } => cmd_new(storage, board, fields, today),
        JobCommand::Edit { id, fields } => cmd_edit(storage, board, &id, fields, today),
        JobCommand::List => {
            cmd_list(&board, today);
            Ok(())
        }
        JobCommand::Show { id } => {
            let job = resolve(&board.jobs, |j| j.id, &id, "job")?;
            println!("{}", format_job_detail(job, today));
            Ok(())
        }
        JobCommand::Delete { id, yes } => cmd_delete(storage, board, &id, yes),
    }
}

fn cmd_new(storage: &Storage, board: Board, fields: JobFields, today: Date) -> Result<(), String> {
    if fields.client.is_none() {
        return Err("--client is required when creating a job".to_string());
    }

    let mut job = Job::new(String::new(), String::new(), today);
    job.name = format!("Batch-{}", &short_id(job.id)[..4]);
    fields.apply_to(&mut job);

    let (_, change) = board
        .save_job(job, SaveMode::Create, today)
        .map_err(|e| format!("failed to create job: {e}"))?;
    persist(storage, &change)?;
    report_saved(&change);
    Ok(())
}

fn cmd_edit(
    storage: &Storage,
    board: Board,
    reference: &str,
    fields: JobFields,
    today: Date,
) -> Result<(), String> {
    let mut job = resolve(&board.jobs, |j| j.id, reference, "job")?.clone();
    fields.apply_to(&mut job);

    let (_, change) = board
        .save_job(job, SaveMode::Update, today)
        .map_err(|e| format!("failed to update job: {e}"))?;
    persist(storage, &change)?;
    report_saved(&change);
    Ok(())
}

fn report_saved(change: &Change) {
    match change {
        Change::JobCreated(job) => println!("{}", job.id),
        Change::JobUpdated { job, hold } => {
            eprintln!("Job {} updated [{}]", short_id(job.id), job.status);
            if let Some(note) = format_hold_outcome(*hold, job) {
                eprintln!("{note}");
            }
        }
        Change::JobArchived { record, .. } => {
            eprintln!(
                "Job \"{}\" marked as Completed and moved to dispatch history ({} units on {})",
                record.batch_name, record.quantity, record.date
            );
        }
        _ => {}
    }
}

fn cmd_list(board: &Board, today: Date) {
    if board.jobs.is_empty() {
        println!("No jobs");
        return;
    }
    for job in &board.jobs {
        println!("{}", format_job_row(job, today));
    }
}

fn cmd_delete(storage: &Storage, board: Board, reference: &str, yes: bool) -> Result<(), String> {
    let job = resolve(&board.jobs, |j| j.id, reference, "job")?;
    let (id, name) = (job.id, job.name.clone());
    require_confirmation(yes, &format!("job {} ({name})", short_id(id)))?;

    let (_, change) = board
        .delete_job(id)
        .map_err(|e| format!("failed to delete job: {e}"))?;
    persist(storage, &change)?;
    eprintln!("Job {} deleted", short_id(id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::Parser;
    use jiff::civil::date;

    use crate::{
        cli::{Cli, Command},
        model::{JobStatus, Priority},
    };

    fn parse_fields(args: &[&str]) -> JobFields {
        let mut argv = vec!["proplan", "job", "new"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Job {
                command: JobCommand::New { fields },
            } => fields,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn fields_overwrite_only_what_was_given() {
        let mut job = Job::new("Batch 204", "Tesla", date(2023, 10, 25));
        let fields = parse_fields(&[
            "--status",
            "on-hold",
            "--priority",
            "critical",
            "--qty",
            "50",
        ]);
        fields.apply_to(&mut job);

        assert_eq!(job.status, JobStatus::OnHold);
        assert_eq!(job.priority, Priority::Critical);
        assert_eq!(job.po_quantity, Some(50));
        assert_eq!(job.name, "Batch 204");
        assert_eq!(job.client, "Tesla");
    }

    #[test]
    fn parses_dates_and_status_names() {
        let fields = parse_fields(&[
            "--client",
            "Skydio",
            "--due",
            "2023-10-28",
            "--status",
            "first-paint",
        ]);
        let mut job = Job::new("x", "y", date(2023, 10, 20));
        fields.apply_to(&mut job);
        assert_eq!(job.end_date, date(2023, 10, 28));
        assert_eq!(job.status, JobStatus::FirstPaint);
    }

    #[test]
    fn progress_is_bounded() {
        let err = Cli::try_parse_from(["proplan", "job", "new", "--progress", "101"]);
        assert!(err.is_err());
    }
}
