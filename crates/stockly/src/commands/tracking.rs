//! Serial and batch tracking lists.

use stockly_core::Inventory;
use stockly_core::view::views;

use crate::cli::{GlobalOpts, ListOnlyArgs, ListOnlyCommand};
use crate::error::CliError;

use super::util;

pub async fn handle_serials(
    inventory: &Inventory,
    args: ListOnlyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ListOnlyCommand::List => {
            util::list_view(inventory, &views::serial_numbers(), global, |s| {
                s.serial_number.clone()
            })
            .await?;
            Ok(())
        }
    }
}

pub async fn handle_batches(
    inventory: &Inventory,
    args: ListOnlyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ListOnlyCommand::List => {
            util::list_view(inventory, &views::batch_numbers(), global, |b| {
                b.batch_number.clone()
            })
            .await?;
            Ok(())
        }
    }
}
