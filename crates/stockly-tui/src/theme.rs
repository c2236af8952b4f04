//! Palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

use stockly_core::StatusColor;

// ── Palette ───────────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(99, 132, 255); // #6384ff
pub const TEAL: Color = Color::Rgb(94, 234, 212); // #5eead4
pub const AMBER: Color = Color::Rgb(251, 191, 36); // #fbbf24
pub const GREEN: Color = Color::Rgb(74, 222, 128); // #4ade80
pub const RED: Color = Color::Rgb(248, 113, 113); // #f87171
pub const SKY: Color = Color::Rgb(96, 165, 250); // #60a5fa

pub const TEXT: Color = Color::Rgb(209, 213, 219); // #d1d5db
pub const MUTED: Color = Color::Rgb(107, 114, 128); // #6b7280
pub const BG_SELECTED: Color = Color::Rgb(31, 41, 55); // #1f2937
pub const BG_POPUP: Color = Color::Rgb(17, 24, 39); // #111827

/// Status tone → terminal color. Shared with every badge and marker.
pub fn tone(color: StatusColor) -> Color {
    match color {
        StatusColor::Green => GREEN,
        StatusColor::Gray => MUTED,
        StatusColor::Red => RED,
        StatusColor::Yellow => AMBER,
        StatusColor::Blue => SKY,
    }
}

pub fn toned(color: Option<StatusColor>) -> Style {
    color.map_or_else(table_row, |c| Style::default().fg(tone(c)))
}

// ── Semantic styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ACCENT)
}

pub fn border_default() -> Style {
    Style::default().fg(MUTED)
}

pub fn table_header() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

pub fn table_row() -> Style {
    Style::default().fg(TEXT)
}

pub fn table_selected() -> Style {
    Style::default()
        .bg(BG_SELECTED)
        .add_modifier(Modifier::BOLD)
}

pub fn secondary() -> Style {
    Style::default().fg(MUTED)
}

pub fn tab_active() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(TEXT)
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

pub fn error_text() -> Style {
    Style::default().fg(RED)
}
