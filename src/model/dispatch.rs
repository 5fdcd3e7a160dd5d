//! Dispatch records: shipments that left the facility.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::HoldHistory;

/// One logged shipment of parts to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRecord {
    pub id: Uuid,
    pub batch_name: String,
    pub client: String,
    pub quantity: u32,
    pub date: Date,

    /// The job this record was archived from, if it came from a completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,

    /// Hold intervals the job went through before it shipped.
    #[serde(
        default,
        rename = "onHoldHistory",
        skip_serializing_if = "HoldHistory::is_empty"
    )]
    pub hold_history: HoldHistory,
}

impl DispatchRecord {
    /// A record logged by hand, not tied to any job.
    pub fn logged(
        batch_name: impl Into<String>,
        client: impl Into<String>,
        quantity: u32,
        date: Date,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            batch_name: batch_name.into(),
            client: client.into(),
            quantity,
            date,
            job_id: None,
            hold_history: HoldHistory::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    use crate::model::{HoldInterval, Job};

    #[test]
    fn hold_history_uses_the_job_key() {
        let mut record = DispatchRecord::logged("Proto Batch", "Skydio", 50, date(2023, 11, 2));
        record.hold_history = HoldHistory::from(vec![HoldInterval {
            start_date: date(2023, 10, 28),
            end_date: Some(date(2023, 11, 2)),
            duration_days: Some(5),
        }]);

        let json = serde_json::to_value(&record).unwrap();
        let job = serde_json::to_value(Job::new("Proto Batch", "Skydio", date(2023, 10, 27))).unwrap();
        assert!(job.get("onHoldHistory").is_some());
        assert_eq!(json["onHoldHistory"][0]["durationDays"], 5);
        assert!(json.get("holdHistory").is_none());
    }

    #[test]
    fn logged_record_omits_hold_history() {
        let record = DispatchRecord::logged("Batch 201", "Tesla", 420, date(2023, 10, 27));
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("onHoldHistory").is_none());
    }
}
