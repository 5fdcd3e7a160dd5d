//! `proplan material …`: the inventory list.

use clap::Subcommand;
use uuid::Uuid;

use crate::{
    board::Board,
    model::{Gauge, Material},
    storage::Storage,
};

use super::{
    ColorArg,
    format::{format_material_row, short_id},
    persist, resolve,
};

#[derive(Debug, Subcommand)]
pub enum MaterialCommand {
    /// Add an inventory item shown as a fill level or a status colour.
    Add {
        #[arg(long)]
        name: String,

        /// Text shown next to the gauge, e.g. "240 kg / 400 kg".
        #[arg(long)]
        value: String,

        /// Fill level in percent.
        #[arg(
            long,
            conflicts_with = "status",
            required_unless_present = "status",
            value_parser = clap::value_parser!(u8).range(0..=100)
        )]
        level: Option<u8>,

        /// Status colour.
        #[arg(long, value_enum)]
        status: Option<ColorArg>,
    },

    /// List inventory items.
    List,

    /// Remove an inventory item.
    Remove {
        /// Material ID or unambiguous prefix.
        id: String,
    },
}

pub(super) fn run(storage: &Storage, board: Board, command: MaterialCommand) -> Result<(), String> {
    match command {
        MaterialCommand::Add {
            name,
            value,
            level,
            status,
        } => {
            let gauge = gauge_from(level, status)?;
            let material = Material {
                id: Uuid::new_v4(),
                name,
                value,
                gauge,
            };
            let id = material.id;
            let (_, change) = board.add_material(material);
            persist(storage, &change)?;
            println!("{id}");
            Ok(())
        }
        MaterialCommand::List => {
            if board.materials.is_empty() {
                println!("No materials");
            }
            for material in &board.materials {
                println!("{}", format_material_row(material));
            }
            Ok(())
        }
        MaterialCommand::Remove { id } => {
            let id = resolve(&board.materials, |m| m.id, &id, "material")?.id;
            let (_, change) = board
                .remove_material(id)
                .map_err(|e| format!("failed to remove material: {e}"))?;
            persist(storage, &change)?;
            eprintln!("Material {} removed", short_id(id));
            Ok(())
        }
    }
}

fn gauge_from(level: Option<u8>, status: Option<ColorArg>) -> Result<Gauge, String> {
    match (level, status) {
        (Some(percentage), None) => Ok(Gauge::Level { percentage }),
        (None, Some(color)) => Ok(Gauge::Status {
            color: color.to_domain(),
        }),
        _ => Err("specify exactly one of --level or --status".to_string()),
    }
}
