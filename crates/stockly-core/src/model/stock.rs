// ── Stock domain types ──
//
// Stock levels are derived server-side from the movement ledger; the
// front end trusts them and never recomputes the sum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::record_id::RecordId;
use crate::status::{Status, StatusKind};

// ── Stock levels ────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StockStatus {
    Ok,
    Low,
    Critical,
    Overstock,
    #[default]
    Unknown,
}

impl StockStatus {
    /// Classify a quantity against its thresholds.
    ///
    /// Used when the server omits the status: zero is critical, at or
    /// below the minimum is low, above a positive maximum is overstock.
    pub fn derive(quantity: i64, min_level: i64, max_level: i64) -> Self {
        if quantity == 0 {
            Self::Critical
        } else if quantity <= min_level {
            Self::Low
        } else if max_level > 0 && quantity > max_level {
            Self::Overstock
        } else {
            Self::Ok
        }
    }
}

impl Status for StockStatus {
    fn kind(&self) -> StatusKind {
        match self {
            Self::Ok => StatusKind::Ok,
            Self::Low => StatusKind::Low,
            Self::Critical => StatusKind::Critical,
            Self::Overstock => StatusKind::Overstock,
            Self::Unknown => StatusKind::Unknown,
        }
    }
}

/// Quantity of one product held in one warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLevel {
    pub product_id: RecordId,
    pub product_name: Option<String>,
    pub sku: Option<String>,
    pub warehouse_name: Option<String>,
    pub quantity: i64,
    pub min_level: i64,
    pub max_level: i64,
    pub status: StockStatus,
    pub value: f64,
}

// ── Movements ───────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MovementKind {
    In,
    Out,
    Transfer,
    Adjustment,
    #[default]
    Unknown,
}

impl MovementKind {
    /// `+q` for receipts, `-q` for issues; other kinds carry no sign.
    pub fn signed_quantity(self, quantity: i64) -> i64 {
        match self {
            Self::Out => -quantity.abs(),
            Self::In => quantity.abs(),
            _ => quantity,
        }
    }

    /// Sign prefix shown next to the quantity.
    pub fn sign(self) -> &'static str {
        match self {
            Self::In => "+",
            Self::Out => "-",
            _ => "",
        }
    }
}

impl Status for MovementKind {
    fn kind(&self) -> StatusKind {
        match self {
            Self::In => StatusKind::In,
            Self::Out => StatusKind::Out,
            Self::Transfer => StatusKind::Transfer,
            Self::Adjustment => StatusKind::Adjustment,
            Self::Unknown => StatusKind::Unknown,
        }
    }
}

/// Append-only ledger entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: RecordId,
    pub product_name: Option<String>,
    pub kind: MovementKind,
    pub quantity: i64,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub reference: Option<String>,
    pub user_name: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

// ── Adjustments ─────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AdjustmentKind {
    Increase,
    Decrease,
    #[default]
    Unknown,
}

impl Status for AdjustmentKind {
    fn kind(&self) -> StatusKind {
        match self {
            Self::Increase => StatusKind::Increase,
            Self::Decrease => StatusKind::Decrease,
            Self::Unknown => StatusKind::Unknown,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    #[default]
    Unknown,
}

impl Status for ApprovalStatus {
    fn kind(&self) -> StatusKind {
        match self {
            Self::Pending => StatusKind::Pending,
            Self::Approved => StatusKind::Approved,
            Self::Rejected => StatusKind::Rejected,
            Self::Unknown => StatusKind::Unknown,
        }
    }
}

/// Manual correction to a stock level, subject to approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub id: RecordId,
    pub product_name: Option<String>,
    pub kind: AdjustmentKind,
    pub quantity: i64,
    pub reason: Option<String>,
    pub reference: Option<String>,
    pub approved_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub status: ApprovalStatus,
}

impl StockAdjustment {
    pub fn is_pending(&self) -> bool {
        self.status == ApprovalStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_stock_status() {
        assert_eq!(StockStatus::derive(0, 10, 100), StockStatus::Critical);
        assert_eq!(StockStatus::derive(10, 10, 100), StockStatus::Low);
        assert_eq!(StockStatus::derive(50, 10, 100), StockStatus::Ok);
        assert_eq!(StockStatus::derive(101, 10, 100), StockStatus::Overstock);
        // No maximum configured: never overstock.
        assert_eq!(StockStatus::derive(10_000, 10, 0), StockStatus::Ok);
    }

    #[test]
    fn movement_signs() {
        assert_eq!(MovementKind::In.signed_quantity(5), 5);
        assert_eq!(MovementKind::Out.signed_quantity(5), -5);
        assert_eq!(MovementKind::Transfer.signed_quantity(5), 5);
        assert_eq!(MovementKind::Out.sign(), "-");
    }
}
