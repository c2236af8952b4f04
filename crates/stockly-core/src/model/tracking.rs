// ── Serial and batch tracking ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::record_id::RecordId;
use crate::status::{Status, StatusKind};

const MS_PER_DAY: i64 = 86_400_000;

/// Batches expiring sooner than this many days get a warning.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SerialStatus {
    Available,
    Sold,
    Defective,
    Returned,
    #[default]
    Unknown,
}

impl Status for SerialStatus {
    fn kind(&self) -> StatusKind {
        match self {
            Self::Available => StatusKind::Available,
            Self::Sold => StatusKind::Sold,
            Self::Defective => StatusKind::Defective,
            Self::Returned => StatusKind::Returned,
            Self::Unknown => StatusKind::Unknown,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BatchStatus {
    Active,
    Expired,
    Recalled,
    #[default]
    Unknown,
}

impl Status for BatchStatus {
    fn kind(&self) -> StatusKind {
        match self {
            Self::Active => StatusKind::Active,
            Self::Expired => StatusKind::Expired,
            Self::Recalled => StatusKind::Recalled,
            Self::Unknown => StatusKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerialNumber {
    pub id: RecordId,
    pub serial_number: String,
    pub product_name: Option<String>,
    pub sku: Option<String>,
    pub status: SerialStatus,
    pub location: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub sold_at: Option<DateTime<Utc>>,
}

/// Expiry warning for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryNotice {
    DaysLeft(i64),
    Expired,
}

impl ExpiryNotice {
    pub fn status(self) -> StatusKind {
        match self {
            Self::DaysLeft(_) => StatusKind::Low,
            Self::Expired => StatusKind::Expired,
        }
    }
}

impl std::fmt::Display for ExpiryNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DaysLeft(days) => write!(f, "{days} days left"),
            Self::Expired => f.write_str("Expired"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchNumber {
    pub id: RecordId,
    pub batch_number: String,
    pub product_name: Option<String>,
    pub sku: Option<String>,
    pub quantity: i64,
    pub expiry_date: Option<DateTime<Utc>>,
    pub manufacturing_date: Option<DateTime<Utc>>,
    pub status: BatchStatus,
    pub location: Option<String>,
}

impl BatchNumber {
    /// Whole days from `now` until expiry, floored. Negative once past.
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        let expiry = self.expiry_date?;
        Some(
            (expiry - now)
                .num_milliseconds()
                .div_euclid(MS_PER_DAY),
        )
    }

    /// `Expired` at or below zero days, `DaysLeft` inside the warning window.
    pub fn expiry_notice(&self, now: DateTime<Utc>) -> Option<ExpiryNotice> {
        match self.days_until_expiry(now)? {
            days if days <= 0 => Some(ExpiryNotice::Expired),
            days if days < EXPIRY_WARNING_DAYS => Some(ExpiryNotice::DaysLeft(days)),
            _ => None,
        }
    }
}
