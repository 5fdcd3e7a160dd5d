//! The planning board: every job, dispatch and material the facility tracks.
//!
//! Each operation consumes the board and hands back the next one together
//! with the single [`Change`] it made. Nothing here persists anything;
//! callers commit the change after the operation succeeds.
//!
//! Saving a job always runs in two steps:
//!
//! 1. The hold transition (see [`crate::hold`]) updates the job's hold
//!    history from its previous and new status.
//! 2. The completion router decides where the job goes. A completed job
//!    leaves the board and becomes a dispatch record; anything else is
//!    created or replaced in place.

use jiff::civil::Date;
use uuid::Uuid;

use crate::{
    hold,
    model::{DispatchRecord, Job, JobStatus, Material},
};

/// Errors from board operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("job not found: {0}")]
    JobNotFound(Uuid),

    #[error("job already exists: {0}")]
    JobExists(Uuid),

    #[error("dispatch record not found: {0}")]
    DispatchNotFound(Uuid),

    #[error("material not found: {0}")]
    MaterialNotFound(Uuid),
}

pub type Result<T> = core::result::Result<T, BoardError>;

/// Whether a save creates a new job or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update,
}

/// The one state mutation an operation performed.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    JobCreated(Job),
    /// A job was edited in place; `hold` says what happened to its hold history.
    JobUpdated { job: Job, hold: hold::Outcome },
    /// A completed job left the board and was logged as a dispatch.
    JobArchived {
        job_id: Uuid,
        record: DispatchRecord,
    },
    JobDeleted(Uuid),
    DispatchLogged(DispatchRecord),
    DispatchEdited(DispatchRecord),
    DispatchDeleted(Uuid),
    MaterialAdded(Material),
    MaterialRemoved(Uuid),
}

/// Where a saved job ends up.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Stays on the board.
    Keep(Job),
    /// Leaves the board as this dispatch record.
    Archive(DispatchRecord),
}

/// Decides whether a job with its final status stays or ships.
///
/// A completed job becomes a dispatch record for its PO quantity (0 when
/// unset) on its dispatched date, or on `today` when that is unset.
/// The job's hold history travels with the record.
pub fn route(job: Job, today: Date) -> Route {
    if job.status != JobStatus::Completed {
        return Route::Keep(job);
    }
    Route::Archive(DispatchRecord {
        id: Uuid::new_v4(),
        batch_name: job.name,
        client: job.client,
        quantity: job.po_quantity.unwrap_or(0),
        date: job.dispatched_date.unwrap_or(today),
        job_id: Some(job.id),
        hold_history: job.hold_history,
    })
}

/// Full board state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    pub jobs: Vec<Job>,
    pub dispatches: Vec<DispatchRecord>,
    pub materials: Vec<Material>,
}

impl Board {
    pub fn job(&self, id: Uuid) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn dispatch(&self, id: Uuid) -> Option<&DispatchRecord> {
        self.dispatches.iter().find(|d| d.id == id)
    }

    /// Jobs in the pipeline: neither completed nor on hold.
    pub fn active_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs
            .iter()
            .filter(|j| !matches!(j.status, JobStatus::Completed | JobStatus::OnHold))
    }

    pub fn on_hold_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(|j| j.status == JobStatus::OnHold)
    }

    // ── Jobs ──

    /// Saves an edited or newly created job.
    ///
    /// On update, the stored job supplies the previous status and the hold
    /// history to build on; whatever history `job` carries is ignored.
    pub fn save_job(mut self, mut job: Job, mode: SaveMode, today: Date) -> Result<(Self, Change)> {
        let existing = self.jobs.iter().position(|j| j.id == job.id);

        let previous = match (mode, existing) {
            (SaveMode::Create, None) => None,
            (SaveMode::Create, Some(_)) => return Err(BoardError::JobExists(job.id)),
            (SaveMode::Update, Some(i)) => {
                job.hold_history = self.jobs[i].hold_history.clone();
                Some(self.jobs[i].status)
            }
            (SaveMode::Update, None) => return Err(BoardError::JobNotFound(job.id)),
        };

        let (history, outcome) = hold::apply(previous, job.status, &job.hold_history, today);
        job.hold_history = history;

        let job_id = job.id;
        let change = match route(job, today) {
            Route::Archive(record) => {
                if let Some(i) = existing {
                    self.jobs.remove(i);
                }
                tracing::info!(%job_id, quantity = record.quantity, date = %record.date, "job completed and archived");
                self.dispatches.push(record.clone());
                Change::JobArchived { job_id, record }
            }
            Route::Keep(job) => match existing {
                Some(i) => {
                    self.jobs[i] = job.clone();
                    Change::JobUpdated { job, hold: outcome }
                }
                None => {
                    self.jobs.push(job.clone());
                    Change::JobCreated(job)
                }
            },
        };

        Ok((self, change))
    }

    /// Removes a job outright. No dispatch record is created.
    pub fn delete_job(mut self, id: Uuid) -> Result<(Self, Change)> {
        let i = self
            .jobs
            .iter()
            .position(|j| j.id == id)
            .ok_or(BoardError::JobNotFound(id))?;
        self.jobs.remove(i);
        Ok((self, Change::JobDeleted(id)))
    }

    // ── Dispatches ──

    pub fn log_dispatch(mut self, record: DispatchRecord) -> (Self, Change) {
        self.dispatches.push(record.clone());
        (self, Change::DispatchLogged(record))
    }

    /// Replaces a dispatch record with the same id.
    pub fn edit_dispatch(mut self, record: DispatchRecord) -> Result<(Self, Change)> {
        let slot = self
            .dispatches
            .iter_mut()
            .find(|d| d.id == record.id)
            .ok_or(BoardError::DispatchNotFound(record.id))?;
        *slot = record.clone();
        Ok((self, Change::DispatchEdited(record)))
    }

    pub fn delete_dispatch(mut self, id: Uuid) -> Result<(Self, Change)> {
        let before = self.dispatches.len();
        self.dispatches.retain(|d| d.id != id);
        if self.dispatches.len() == before {
            return Err(BoardError::DispatchNotFound(id));
        }
        Ok((self, Change::DispatchDeleted(id)))
    }

    // ── Materials ──

    pub fn add_material(mut self, material: Material) -> (Self, Change) {
        self.materials.push(material.clone());
        (self, Change::MaterialAdded(material))
    }

    pub fn remove_material(mut self, id: Uuid) -> Result<(Self, Change)> {
        let before = self.materials.len();
        self.materials.retain(|m| m.id != id);
        if self.materials.len() == before {
            return Err(BoardError::MaterialNotFound(id));
        }
        Ok((self, Change::MaterialRemoved(id)))
    }
}
