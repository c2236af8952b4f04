//! Headline KPIs plus the overview and stock-alert panels.

use serde::Serialize;

use stockly_core::dashboard::{dashboard_kpis, overview_alerts, overview_summary};
use stockly_core::{Inventory, InventoryAnalytics, Kpi};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct DashboardOutput<'a> {
    analytics: &'a InventoryAnalytics,
    kpis: [Kpi; 4],
}

fn render_panels(analytics: &InventoryAnalytics, color: bool) -> String {
    let kpis = dashboard_kpis(Some(analytics));
    let summary = overview_summary(Some(analytics));
    let alerts = overview_alerts(Some(analytics));
    format!(
        "{}\n\nInventory Overview\n{}\n\nStock Alerts\n{}",
        output::render_kpis(&kpis, color),
        output::render_kpis(&summary, color),
        output::render_kpis(&alerts, color),
    )
}

pub async fn handle(inventory: &Inventory, global: &GlobalOpts) -> Result<(), CliError> {
    let analytics = util::with_spinner("Fetching analytics...", global.quiet, inventory.analytics())
        .await?;
    let color = output::should_color(global.color);

    let data = DashboardOutput {
        analytics: analytics.as_ref(),
        kpis: dashboard_kpis(Some(analytics.as_ref())),
    };
    let out = output::render_single(
        global.output,
        &data,
        |d| render_panels(d.analytics, color),
        |d| {
            d.kpis
                .iter()
                .map(|k| format!("{}={}", k.id, k.value))
                .collect::<Vec<_>>()
                .join("\n")
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panels_carry_every_figure() {
        let analytics = InventoryAnalytics {
            total_products: 42,
            low_stock_items: 3,
            total_stock_value: 12_500.0,
            warehouses_count: 2,
        };
        let out = render_panels(&analytics, false);
        for needle in [
            "Total Products",
            "42",
            "Low Stock Items",
            "3",
            "$12,500",
            "Warehouses",
            "Inventory Overview",
            "Stock Alerts",
        ] {
            assert!(out.contains(needle), "missing {needle}");
        }
    }
}
