//! Job types: a print batch moving through post-processing.

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::HoldHistory;

/// A production job tracked on the planning board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,

    /// Display name of the batch, e.g. "Batch 204".
    pub name: String,

    pub part_name: String,
    pub client: String,
    pub quote_id: String,
    pub po_date: Date,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub po_quantity: Option<u32>,

    /// When work started.
    pub start_date: Date,

    /// When dispatch is scheduled.
    pub end_date: Date,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatched_date: Option<Date>,

    pub material: String,

    /// Completion estimate, 0–100.
    pub progress: u8,

    pub status: JobStatus,
    pub priority: Priority,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nesting_density: Option<f64>,

    #[serde(default, rename = "onHoldHistory")]
    pub hold_history: HoldHistory,
}

impl Job {
    /// A fresh job with the defaults an operator starts from.
    pub fn new(name: impl Into<String>, client: impl Into<String>, today: Date) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            part_name: String::new(),
            client: client.into(),
            quote_id: String::new(),
            po_date: today,
            po_quantity: None,
            start_date: today,
            end_date: today,
            dispatched_date: None,
            material: "PA12".to_string(),
            progress: 0,
            status: JobStatus::Primer,
            priority: Priority::Medium,
            notes: None,
            nesting_density: None,
            hold_history: HoldHistory::new(),
        }
    }
}

/// Where a job sits in the post-processing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    /// Legacy default from before jobs started at primer.
    Pending,
    Primer,
    #[serde(rename = "1st Paint")]
    FirstPaint,
    #[serde(rename = "Final Paint")]
    FinalPaint,
    Rework,
    #[serde(rename = "QC")]
    Qc,
    #[serde(rename = "On Hold")]
    OnHold,
    Completed,
}

impl JobStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Primer => "Primer",
            Self::FirstPaint => "1st Paint",
            Self::FinalPaint => "Final Paint",
            Self::Rework => "Rework",
            Self::Qc => "QC",
            Self::OnHold => "On Hold",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        };
        f.write_str(s)
    }
}
