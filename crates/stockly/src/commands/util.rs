//! Shared helpers for command handlers.

use std::future::Future;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use stockly_core::{Collection, Inventory, ListView, QueryState, Record, RecordId};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Refuses to prompt when stdin is not a terminal.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Parse a record identifier from the command line.
pub fn parse_id(raw: &str) -> Result<RecordId, CliError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::Validation {
            field: "id".into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(RecordId::from(trimmed))
}

/// Run `fut` behind a stderr spinner when stderr is interactive.
pub async fn with_spinner<F, T>(message: &str, quiet: bool, fut: F) -> T
where
    F: Future<Output = T>,
{
    if quiet || !std::io::stderr().is_terminal() {
        return fut.await;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = fut.await;
    spinner.finish_and_clear();
    result
}

/// Fetch the collection behind `view` and print it in the selected format.
///
/// Fetch failures surface as errors (and exit codes) rather than an
/// error table.
pub async fn list_view<T>(
    inventory: &Inventory,
    view: &ListView<T>,
    global: &GlobalOpts,
    id_fn: impl Fn(&T) -> String,
) -> Result<Arc<Collection<T>>, CliError>
where
    T: Record + Serialize,
{
    let message = format!("Fetching {}...", T::RESOURCE.as_ref().replace('_', " "));
    let collection = with_spinner(
        &message,
        global.quiet,
        inventory.list::<T>(view.filters().clone()),
    )
    .await?;

    let state = view.render(&QueryState::Ready(Arc::clone(&collection)));
    let out = output::render_list(
        global.output,
        &state,
        collection.as_ref(),
        &collection.items,
        id_fn,
        output::should_color(global.color),
    )?;
    output::print_output(&out, global.quiet);
    Ok(collection)
}

/// Print a one-line success message unless quiet.
pub fn done(message: &str, global: &GlobalOpts) {
    if global.quiet || global.output != OutputFormat::Table {
        return;
    }
    let color = output::should_color(global.color);
    let line = if color {
        format!("{} {message}", "✓".green())
    } else {
        message.to_owned()
    };
    output::print_output(&line, false);
}
