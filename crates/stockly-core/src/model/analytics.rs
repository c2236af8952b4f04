use serde::{Deserialize, Serialize};

/// Headline counts and sums for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryAnalytics {
    pub total_products: u64,
    pub low_stock_items: u64,
    pub total_stock_value: f64,
    pub warehouses_count: u64,
}
