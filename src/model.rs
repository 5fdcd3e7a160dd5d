//! Core data model for proplan.
//!
//! These types represent what the planning board tracks:
//! jobs and their hold history, dispatched shipments, and material stock.

mod dispatch;
mod hold;
mod job;
mod material;

pub use dispatch::DispatchRecord;
pub use hold::{HoldHistory, HoldInterval, hold_days};
pub use job::{Job, JobStatus, Priority};
pub use material::{Gauge, Material, StatusColor};
