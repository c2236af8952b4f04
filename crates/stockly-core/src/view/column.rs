// ── Columns and cells ──

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::status::{Status, StatusColor};

/// Ambient inputs to cell rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    /// Reference instant for relative values such as days until expiry.
    pub now: DateTime<Utc>,
}

impl RenderContext {
    pub fn now() -> Self {
        Self { now: Utc::now() }
    }
}

/// One rendered table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    /// Color for the text (status badges, warnings).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<StatusColor>,
    /// Short flag appended after the text, e.g. "Low Stock".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    /// Dimmed second line, e.g. the SKU under a product name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn toned(text: impl Into<String>, tone: StatusColor) -> Self {
        Self {
            text: text.into(),
            tone: Some(tone),
            ..Self::default()
        }
    }

    /// Colored status label.
    pub fn badge(status: &impl Status) -> Self {
        Self::toned(status.label(), status.color())
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn with_secondary(mut self, secondary: Option<impl Into<String>>) -> Self {
        self.secondary = secondary.map(Into::into);
        self
    }

    /// Text plus marker, for outputs without styling.
    pub fn display_text(&self) -> String {
        match &self.marker {
            Some(marker) => format!("{} ({marker})", self.text),
            None => self.text.clone(),
        }
    }
}

/// How one field of `T` becomes a cell.
pub struct Column<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub render: fn(&T, &RenderContext) -> Cell,
}

impl<T> Column<T> {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        render: fn(&T, &RenderContext) -> Cell,
    ) -> Self {
        Self { key, label, render }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
