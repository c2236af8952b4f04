// ── Warehouse domain types ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::record_id::RecordId;
use crate::status::{Status, StatusKind};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WarehouseStatus {
    Active,
    Inactive,
    #[default]
    Unknown,
}

impl Status for WarehouseStatus {
    fn kind(&self) -> StatusKind {
        match self {
            Self::Active => StatusKind::Active,
            Self::Inactive => StatusKind::Inactive,
            Self::Unknown => StatusKind::Unknown,
        }
    }
}

/// Storage capacity in units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub total: u64,
    pub used: u64,
}

impl Capacity {
    /// Percentage of capacity in use; 0 when the total is unknown.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn utilization_pct(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used as f64 / self.total as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: RecordId,
    pub name: String,
    pub code: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub capacity: Capacity,
    pub status: WarehouseStatus,
}

impl Warehouse {
    /// "City, Country" with whatever parts are known.
    pub fn location(&self) -> Option<String> {
        let parts: Vec<&str> = [self.city.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}
