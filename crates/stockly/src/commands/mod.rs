pub mod categories;
pub mod config_cmd;
pub mod dashboard;
pub mod products;
pub mod stock;
pub mod tracking;
pub mod util;
pub mod warehouses;

use stockly_core::Inventory;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler. Config and completions are
/// handled before an `Inventory` exists.
pub async fn dispatch(
    cmd: Command,
    inventory: &Inventory,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Products(args) => products::handle(inventory, args, global).await,
        Command::Categories(args) => categories::handle(inventory, args, global).await,
        Command::Warehouses(args) => warehouses::handle(inventory, args, global).await,
        Command::Stock(args) => stock::handle_stock(inventory, args, global).await,
        Command::Movements(args) => stock::handle_movements(inventory, args, global).await,
        Command::Adjustments(args) => stock::handle_adjustments(inventory, args, global).await,
        Command::Serials(args) => tracking::handle_serials(inventory, args, global).await,
        Command::Batches(args) => tracking::handle_batches(inventory, args, global).await,
        Command::Dashboard => dashboard::handle(inventory, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "handled before connecting".into(),
        }),
    }
}
