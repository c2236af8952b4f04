// ── Status → color lookup ──
//
// One closed enumeration spans every status domain (products, stock,
// movements, adjustments, tracking) so that all views color the same
// word the same way.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

/// Badge color for a status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatusColor {
    Green,
    Gray,
    Red,
    Yellow,
    Blue,
}

/// Every status word any entity can carry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    Active,
    Inactive,
    Discontinued,
    Ok,
    Low,
    Critical,
    Overstock,
    In,
    Out,
    Transfer,
    Adjustment,
    Increase,
    Decrease,
    Pending,
    Approved,
    Rejected,
    InProgress,
    Completed,
    Available,
    Sold,
    Defective,
    Returned,
    Expired,
    Recalled,
    Unknown,
}

impl StatusKind {
    /// The single status → color table.
    pub fn color(self) -> StatusColor {
        match self {
            Self::Active
            | Self::Ok
            | Self::Approved
            | Self::Available
            | Self::In
            | Self::Increase
            | Self::Completed => StatusColor::Green,
            Self::Inactive | Self::Sold | Self::Returned | Self::Adjustment | Self::Unknown => {
                StatusColor::Gray
            }
            Self::Discontinued
            | Self::Critical
            | Self::Rejected
            | Self::Expired
            | Self::Defective
            | Self::Recalled
            | Self::Out
            | Self::Decrease => StatusColor::Red,
            Self::Low | Self::Pending => StatusColor::Yellow,
            Self::InProgress | Self::Transfer | Self::Overstock => StatusColor::Blue,
        }
    }
}

/// Implemented by every per-domain status enum.
pub trait Status: AsRef<str> {
    fn kind(&self) -> StatusKind;

    fn color(&self) -> StatusColor {
        self.kind().color()
    }

    /// Label shown in badges; the wire word itself.
    fn label(&self) -> &str {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn documented_pairs() {
        assert_eq!(StatusKind::Active.color(), StatusColor::Green);
        assert_eq!(StatusKind::Inactive.color(), StatusColor::Gray);
        assert_eq!(StatusKind::Discontinued.color(), StatusColor::Red);
        assert_eq!(StatusKind::Critical.color(), StatusColor::Red);
        assert_eq!(StatusKind::Low.color(), StatusColor::Yellow);
        assert_eq!(StatusKind::Pending.color(), StatusColor::Yellow);
        assert_eq!(StatusKind::InProgress.color(), StatusColor::Blue);
        assert_eq!(StatusKind::Transfer.color(), StatusColor::Blue);
    }

    #[test]
    fn only_unknown_and_neutral_words_are_gray() {
        let gray: Vec<_> = StatusKind::iter()
            .filter(|k| k.color() == StatusColor::Gray)
            .map(|k| k.to_string())
            .collect();
        assert_eq!(
            gray,
            ["inactive", "adjustment", "sold", "returned", "unknown"]
        );
    }
}
