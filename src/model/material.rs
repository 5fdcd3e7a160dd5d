//! Material inventory: powders, agents and consumables on hand.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: Uuid,
    pub name: String,

    /// Free text shown next to the gauge, e.g. "240 kg / 400 kg" or "Good".
    pub value: String,

    #[serde(flatten)]
    pub gauge: Gauge,
}

/// How a material's state is shown: a fill level or a coloured status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Gauge {
    Level {
        /// Fill level, 0–100.
        percentage: u8,
    },
    Status {
        #[serde(rename = "statusColor")]
        color: StatusColor,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusColor {
    Emerald,
    Amber,
    Red,
    Slate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_gauge_reads_flat_record() {
        let json = r#"{
            "id": "0b5e1f8e-4c43-4d0f-8f55-2f0d7b6f2c01",
            "name": "PA12 Fresh Powder",
            "value": "240 kg / 400 kg",
            "type": "level",
            "percentage": 60
        }"#;
        let material: Material = serde_json::from_str(json).unwrap();
        assert_eq!(material.gauge, Gauge::Level { percentage: 60 });
    }

    #[test]
    fn status_gauge_reads_flat_record() {
        let json = r#"{
            "id": "0b5e1f8e-4c43-4d0f-8f55-2f0d7b6f2c02",
            "name": "Cleaning Rolls",
            "value": "Low",
            "type": "status",
            "statusColor": "amber"
        }"#;
        let material: Material = serde_json::from_str(json).unwrap();
        assert_eq!(
            material.gauge,
            Gauge::Status {
                color: StatusColor::Amber
            }
        );
    }
}
