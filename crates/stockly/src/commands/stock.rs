//! Stock levels, the movement ledger, and adjustment review.

use owo_colors::OwoColorize;

use stockly_core::format;
use stockly_core::view::views;
use stockly_core::{Command, CommandResult, Filters, Inventory, StockLevel, StockStatus};

use crate::cli::{
    AdjustmentsArgs, AdjustmentsCommand, GlobalOpts, ListOnlyArgs, ListOnlyCommand, OutputFormat,
    StockArgs, StockCommand,
};
use crate::error::CliError;
use crate::output;

use super::util;

/// `(critical, low)` counts over one page of stock levels.
fn alert_counts(levels: &[StockLevel]) -> (usize, usize) {
    levels.iter().fold((0, 0), |(critical, low), s| match s.status {
        StockStatus::Critical => (critical + 1, low),
        StockStatus::Low => (critical, low + 1),
        _ => (critical, low),
    })
}

pub async fn handle_stock(
    inventory: &Inventory,
    args: StockArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        StockCommand::List {
            warehouse,
            status,
            product,
        } => {
            let mut filters = Filters::new();
            let given = [
                ("warehouse", warehouse),
                ("status", status),
                ("product_id", product),
            ];
            for (key, value) in given.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))) {
                filters.insert(key, value);
            }

            let view = views::stock_levels(filters);
            let levels =
                util::list_view(inventory, &view, global, |s| s.product_id.to_string()).await?;

            let show_alert = global.output == OutputFormat::Table && !global.quiet;
            let (critical, low) = alert_counts(&levels.items);
            if let Some(summary) = format::stock_alert_summary(critical, low).filter(|_| show_alert)
            {
                let line = if output::should_color(global.color) {
                    format!("{} {}", "⚠".yellow(), summary.yellow())
                } else {
                    format!("Alert: {summary}")
                };
                eprintln!("{line}");
            }
            Ok(())
        }
    }
}

pub async fn handle_movements(
    inventory: &Inventory,
    args: ListOnlyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ListOnlyCommand::List => {
            util::list_view(inventory, &views::movements(), global, |m| m.id.to_string()).await?;
            Ok(())
        }
    }
}

pub async fn handle_adjustments(
    inventory: &Inventory,
    args: AdjustmentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (cmd, verb) = match args.command {
        AdjustmentsCommand::List => {
            util::list_view(inventory, &views::adjustments(), global, |a| a.id.to_string())
                .await?;
            return Ok(());
        }
        AdjustmentsCommand::Approve { id } => (
            Command::ApproveAdjustment {
                id: util::parse_id(&id)?,
            },
            "Approved",
        ),
        AdjustmentsCommand::Reject { id } => (
            Command::RejectAdjustment {
                id: util::parse_id(&id)?,
            },
            "Rejected",
        ),
    };

    if let CommandResult::Adjustment(adjustment) = inventory.execute(cmd).await? {
        util::done(&format!("{verb} adjustment {}", adjustment.id), global);
        if global.output != OutputFormat::Table {
            let out = output::render_single(global.output, &adjustment, |_| String::new(), |a| {
                a.id.to_string()
            })?;
            output::print_output(&out, global.quiet);
        }
    }
    Ok(())
}
