//! Demo data for a fresh install.
//!
//! Seeding happens at most once per database: the `seeded` meta key records
//! the date it ran, and a database that already has it is left alone even if
//! every row has since been deleted.

use jiff::{Span, civil::Date, civil::date};
use uuid::Uuid;

use crate::{
    board::Board,
    model::{DispatchRecord, Gauge, HoldHistory, Job, JobStatus, Material, Priority, StatusColor},
};

use super::{Result, Storage, dispatches, jobs, materials};

const SEEDED_KEY: &str = "seeded";

impl Storage {
    /// Writes the demo board if this database has never been seeded.
    ///
    /// Returns whether seed data was written.
    pub fn seed_if_new(&self, today: Date) -> Result<bool> {
        if self.meta(SEEDED_KEY)?.is_some() {
            return Ok(false);
        }

        let board = demo_board(today);
        let tx = self.conn.unchecked_transaction()?;
        for job in &board.jobs {
            jobs::insert(&tx, job)?;
        }
        for record in &board.dispatches {
            dispatches::insert(&tx, record)?;
        }
        for material in &board.materials {
            materials::insert(&tx, material)?;
        }
        Self::set_meta(&tx, SEEDED_KEY, &today.to_string())?;
        tx.commit()?;

        tracing::info!(
            jobs = board.jobs.len(),
            dispatches = board.dispatches.len(),
            materials = board.materials.len(),
            "seeded demo data"
        );
        Ok(true)
    }
}

/// A small but realistic board: five jobs, one of them on hold,
/// four shipments in the past week and a handful of materials.
pub fn demo_board(today: Date) -> Board {
    let mut on_hold = HoldHistory::new();
    on_hold.open(date(2023, 10, 28));

    let jobs = vec![
        Job {
            part_name: "Mounting Brackets".into(),
            quote_id: "Q-2023-889".into(),
            po_date: date(2023, 10, 20),
            po_quantity: Some(1500),
            start_date: date(2023, 10, 25),
            end_date: date(2023, 10, 26),
            progress: 65,
            status: JobStatus::FirstPaint,
            priority: Priority::High,
            nesting_density: Some(12.5),
            notes: Some("Requires smoothing".into()),
            ..Job::new("Batch 204", "Tesla", today)
        },
        Job {
            part_name: "Hydraulic Connectors".into(),
            quote_id: "Q-2023-892".into(),
            po_date: date(2023, 10, 21),
            po_quantity: Some(200),
            start_date: date(2023, 10, 26),
            end_date: date(2023, 10, 27),
            material: "PA12 GB".into(),
            progress: 15,
            priority: Priority::Critical,
            nesting_density: Some(14.2),
            ..Job::new("Batch 205", "Boston Dynamics", today)
        },
        Job {
            part_name: "Drone Arms v2".into(),
            quote_id: "Q-2023-905".into(),
            po_date: date(2023, 10, 24),
            po_quantity: Some(50),
            start_date: date(2023, 10, 27),
            end_date: date(2023, 10, 28),
            material: "PA11".into(),
            status: JobStatus::OnHold,
            nesting_density: Some(8.0),
            hold_history: on_hold,
            ..Job::new("Proto Batch", "Skydio", today)
        },
        Job {
            part_name: "Internal Jigs".into(),
            quote_id: "N/A".into(),
            po_date: date(2023, 10, 20),
            po_quantity: Some(12),
            start_date: date(2023, 10, 25),
            end_date: date(2023, 10, 26),
            progress: 80,
            status: JobStatus::FinalPaint,
            nesting_density: Some(11.0),
            ..Job::new("Batch 203", "Internal", today)
        },
        Job {
            part_name: "Sensor Housings".into(),
            quote_id: "Q-2023-850".into(),
            po_date: date(2023, 10, 18),
            po_quantity: Some(3000),
            start_date: date(2023, 10, 28),
            end_date: date(2023, 11, 1),
            status: JobStatus::Qc,
            priority: Priority::High,
            notes: Some("Awaiting revised CAD".into()),
            ..Job::new("Order #4425", "Rivian", today)
        },
    ];

    let ago = |n: i64| today.saturating_sub(Span::new().days(n));
    let dispatches = vec![
        DispatchRecord::logged("Batch 201", "Tesla", 420, ago(3)),
        DispatchRecord::logged("Batch 202", "Ford", 510, ago(2)),
        DispatchRecord::logged("Batch 203", "Rivian", 380, ago(1)),
        DispatchRecord::logged("Batch 200", "SpaceX", 200, ago(4)),
    ];

    let material = |name: &str, value: &str, gauge| Material {
        id: Uuid::new_v4(),
        name: name.into(),
        value: value.into(),
        gauge,
    };
    let materials = vec![
        material(
            "PA12 Fresh Powder",
            "240 kg / 400 kg",
            Gauge::Level { percentage: 60 },
        ),
        material(
            "PA12 Recycled",
            "850 kg (Ready)",
            Gauge::Level { percentage: 85 },
        ),
        material(
            "Fusing Agent",
            "Good",
            Gauge::Status {
                color: StatusColor::Emerald,
            },
        ),
        material(
            "Detailing Agent",
            "Good",
            Gauge::Status {
                color: StatusColor::Emerald,
            },
        ),
        material(
            "Cleaning Rolls",
            "Low",
            Gauge::Status {
                color: StatusColor::Amber,
            },
        ),
    ];

    Board {
        jobs,
        dispatches,
        materials,
    }
}
