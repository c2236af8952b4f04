//! Screen implementations. Each tab is a top-level Component.

pub mod dashboard;
pub mod list;
pub mod products;
pub mod stock_levels;

use stockly_core::TabId;

use crate::component::Component;

/// One screen per tab, in tab order.
pub fn create_screens(page_size: u32) -> Vec<(TabId, Box<dyn Component>)> {
    TabId::ALL
        .iter()
        .map(|&tab| {
            let screen: Box<dyn Component> = match tab {
                TabId::Dashboard => Box::new(dashboard::DashboardScreen::new()),
                TabId::Products => Box::new(products::ProductsScreen::new(page_size)),
                TabId::StockLevels => Box::new(stock_levels::StockLevelsScreen::new()),
                other => Box::new(list::ListScreen::new(other)),
            };
            (tab, screen)
        })
        .collect()
}
