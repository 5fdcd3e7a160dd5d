//! `proplan dispatch …`: the shipment log.

use clap::Subcommand;
use jiff::civil::Date;

use crate::{board::Board, model::DispatchRecord, storage::Storage};

use super::{
    format::{format_dispatch_row, short_id},
    persist, require_confirmation, resolve,
};

#[derive(Debug, Subcommand)]
pub enum DispatchCommand {
    /// Log a shipment. Prints the record ID.
    Log {
        /// Batch name.
        #[arg(long)]
        batch: String,

        #[arg(long)]
        client: String,

        /// Units shipped.
        #[arg(long)]
        qty: u32,

        /// Ship date; defaults to today.
        #[arg(long)]
        date: Option<Date>,
    },

    /// Correct a logged shipment.
    Edit {
        /// Record ID or unambiguous prefix.
        id: String,

        #[arg(long)]
        batch: Option<String>,

        #[arg(long)]
        client: Option<String>,

        #[arg(long)]
        qty: Option<u32>,

        #[arg(long)]
        date: Option<Date>,
    },

    /// List shipments, newest first.
    List,

    /// Delete a logged shipment.
    Delete {
        /// Record ID or unambiguous prefix.
        id: String,

        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

pub(super) fn run(
    storage: &Storage,
    board: Board,
    command: DispatchCommand,
    today: Date,
) -> Result<(), String> {
    match command {
        DispatchCommand::Log {
            batch,
            client,
            qty,
            date,
        } => {
            let record = DispatchRecord::logged(batch, client, qty, date.unwrap_or(today));
            let id = record.id;
            let (_, change) = board.log_dispatch(record);
            persist(storage, &change)?;
            println!("{id}");
            Ok(())
        }
        DispatchCommand::Edit {
            id,
            batch,
            client,
            qty,
            date,
        } => {
            let mut record = resolve(&board.dispatches, |d| d.id, &id, "dispatch record")?.clone();
            if let Some(v) = batch {
                record.batch_name = v;
            }
            if let Some(v) = client {
                record.client = v;
            }
            if let Some(v) = qty {
                record.quantity = v;
            }
            if let Some(v) = date {
                record.date = v;
            }
            let short = short_id(record.id);
            let (_, change) = board
                .edit_dispatch(record)
                .map_err(|e| format!("failed to edit dispatch: {e}"))?;
            persist(storage, &change)?;
            eprintln!("Dispatch {short} updated");
            Ok(())
        }
        DispatchCommand::List => {
            cmd_list(&board);
            Ok(())
        }
        DispatchCommand::Delete { id, yes } => {
            let record = resolve(&board.dispatches, |d| d.id, &id, "dispatch record")?;
            let id = record.id;
            require_confirmation(yes, &format!("dispatch record {}", short_id(id)))?;
            let (_, change) = board
                .delete_dispatch(id)
                .map_err(|e| format!("failed to delete dispatch: {e}"))?;
            persist(storage, &change)?;
            eprintln!("Dispatch {} deleted", short_id(id));
            Ok(())
        }
    }
}

fn cmd_list(board: &Board) {
    if board.dispatches.is_empty() {
        println!("No dispatched parts logged yet");
        return;
    }
    for record in newest_first(&board.dispatches) {
        println!("{}", format_dispatch_row(record));
    }
}

/// Records sorted by date, newest first; same-day records keep log order.
fn newest_first(records: &[DispatchRecord]) -> Vec<&DispatchRecord> {
    let mut sorted: Vec<&DispatchRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
