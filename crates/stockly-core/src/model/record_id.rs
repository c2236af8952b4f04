// ── Record identity ──
//
// The backend keys rows by integer, older front-end mocks by string.
// `RecordId` accepts both and prints back exactly what it was given.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stockly_api::types::WireId;

/// Canonical identifier for any inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(i64),
    Text(String),
}

impl RecordId {
    pub fn as_numeric(&self) -> Option<i64> {
        match self {
            Self::Numeric(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Numeric(n)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        match s.trim().parse::<i64>() {
            Ok(n) => Self::Numeric(n),
            Err(_) => Self::Text(s),
        }
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<WireId> for RecordId {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Int(n) => Self::Numeric(n),
            WireId::Str(s) => Self::Text(s),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_become_numeric_ids() {
        let id: RecordId = "42".parse().unwrap();
        assert_eq!(id, RecordId::Numeric(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn opaque_strings_stay_text() {
        let id = RecordId::from("prod-7");
        assert_eq!(id.as_numeric(), None);
        assert_eq!(id.to_string(), "prod-7");
    }

    #[test]
    fn wire_string_ids_are_kept_verbatim() {
        // "007" from the wire must round-trip as typed, not as 7.
        let id = RecordId::from(WireId::Str("007".into()));
        assert_eq!(id.to_string(), "007");
    }
}
