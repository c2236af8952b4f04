use stockly_core::Inventory;
use stockly_core::view::views;

use crate::cli::{GlobalOpts, ListOnlyArgs, ListOnlyCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    inventory: &Inventory,
    args: ListOnlyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ListOnlyCommand::List => {
            util::list_view(inventory, &views::warehouses(), global, |w| w.id.to_string()).await?;
            Ok(())
        }
    }
}
