//! Output formatting: table, JSON, YAML, plain.
//!
//! Table output renders a [`ViewState`] produced by the shared list views,
//! so the CLI shows the same columns, badges and markers as the TUI.
//! Structured formats serialize the underlying records via serde; plain
//! emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::{AnsiColors, OwoColorize};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use stockly_core::format::PageFooter;
use stockly_core::{Cell, Kpi, StatusColor, ViewState};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

fn ansi(tone: StatusColor) -> AnsiColors {
    match tone {
        StatusColor::Green => AnsiColors::Green,
        StatusColor::Gray => AnsiColors::BrightBlack,
        StatusColor::Red => AnsiColors::Red,
        StatusColor::Yellow => AnsiColors::Yellow,
        StatusColor::Blue => AnsiColors::Blue,
    }
}

fn paint(text: &str, tone: Option<StatusColor>, color: bool) -> String {
    match tone {
        Some(tone) if color => text.color(ansi(tone)).to_string(),
        _ => text.to_owned(),
    }
}

/// One table cell: toned text, an optional bold marker, and a dimmed
/// second line.
fn render_cell(cell: &Cell, color: bool) -> String {
    let mut out = paint(&cell.text, cell.tone, color);
    if let Some(ref marker) = cell.marker {
        out.push(' ');
        if color {
            out.push_str(&marker.color(ansi(cell.tone.unwrap_or(StatusColor::Red))).bold().to_string());
        } else {
            out.push_str(&format!("({marker})"));
        }
    }
    if let Some(ref secondary) = cell.secondary {
        out.push('\n');
        if color {
            out.push_str(&secondary.dimmed().to_string());
        } else {
            out.push_str(secondary);
        }
    }
    out
}

// ── View rendering ───────────────────────────────────────────────────

/// Render a list view state as a rounded table with its footer.
pub fn render_view(state: &ViewState, color: bool) -> String {
    match state {
        ViewState::Loading { text } => text.clone(),
        ViewState::Error {
            message,
            retry_hint,
        } => format!("{}\n{retry_hint}", paint(message, Some(StatusColor::Red), color)),
        ViewState::Empty {
            icon,
            title,
            description,
        } => {
            let title = if color {
                title.bold().to_string()
            } else {
                title.clone()
            };
            format!("{icon} {title}\n{description}")
        }
        ViewState::Table {
            headers,
            rows,
            footer,
        } => {
            let mut builder = Builder::default();
            builder.push_record(headers.iter().map(|h| (*h).to_owned()));
            for row in rows {
                builder.push_record(row.iter().map(|cell| render_cell(cell, color)));
            }
            let table = builder.build().with(Style::rounded()).to_string();
            match footer {
                Some(footer) => format!("{table}\n{}", render_footer(footer)),
                None => table,
            }
        }
    }
}

fn render_footer(footer: &PageFooter) -> String {
    format!("{}  ·  {}", footer.showing, footer.page)
}

/// Render headline figures as a two-column table.
pub fn render_kpis(kpis: &[Kpi], color: bool) -> String {
    let mut builder = Builder::default();
    for kpi in kpis {
        builder.push_record([kpi.label.to_owned(), paint(&kpi.value, kpi.tone, color)]);
    }
    builder.build().with(Style::rounded()).to_string()
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a fetched collection in the chosen format.
///
/// - `table`: the list view's rendering of the collection
/// - `json` / `json-compact` / `yaml`: serializes `data` via serde
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<D, T>(
    format: OutputFormat,
    view: &ViewState,
    data: &D,
    items: &[T],
    id_fn: impl Fn(&T) -> String,
    color: bool,
) -> Result<String, CliError>
where
    D: Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => Ok(render_view(view, color)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(items.iter().map(id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single item in the chosen format.
///
/// Table rendering uses `detail_fn`, since single-item detail views
/// don't go through a list view.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// `label: value` lines with aligned labels, for detail views.
pub fn detail_lines(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{k:<width$}  {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_json<T: Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

fn render_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Output(e.to_string()))
}
