use stockly_core::view::views;
use stockly_core::{CategoryPayload, Command, CommandResult, Inventory};

use crate::cli::{CategoriesArgs, CategoriesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    inventory: &Inventory,
    args: CategoriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CategoriesCommand::List => {
            util::list_view(inventory, &views::categories(), global, |c| c.name.clone()).await?;
            Ok(())
        }

        CategoriesCommand::Create {
            name,
            description,
            parent,
        } => {
            let cmd = Command::CreateCategory(CategoryPayload {
                name,
                description,
                parent_category: parent,
            });
            if let CommandResult::Category(category) = inventory.execute(cmd).await? {
                util::done(&format!("Created category {}", category.name), global);
                let out = output::render_single(
                    global.output,
                    &category,
                    |c| {
                        output::detail_lines(&[
                            ("ID", c.id.to_string()),
                            ("Name", c.name.clone()),
                            (
                                "Parent",
                                stockly_core::format::or_dash(c.parent_category.as_deref()),
                            ),
                        ])
                    },
                    |c| c.id.to_string(),
                )?;
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }
    }
}
