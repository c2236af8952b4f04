// ── Dashboard shell ──
//
// KPI tiles and the tab set that hosts the entity views.

use std::fmt;

use serde::Serialize;

use crate::format;
use crate::model::InventoryAnalytics;
use crate::query::Resource;
use crate::status::StatusColor;

/// One headline figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kpi {
    pub id: &'static str,
    pub label: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<StatusColor>,
}

impl Kpi {
    fn new(id: &'static str, label: &'static str, value: String, tone: Option<StatusColor>) -> Self {
        Self {
            id,
            label,
            value,
            tone,
        }
    }
}

/// Header tiles. Missing analytics read as zero.
pub fn dashboard_kpis(analytics: Option<&InventoryAnalytics>) -> [Kpi; 4] {
    let a = analytics.copied().unwrap_or_default();
    [
        Kpi::new(
            "products",
            "Total Products",
            a.total_products.to_string(),
            Some(StatusColor::Blue),
        ),
        Kpi::new(
            "low-stock",
            "Low Stock Items",
            a.low_stock_items.to_string(),
            Some(StatusColor::Red),
        ),
        Kpi::new(
            "stock-value",
            "Total Stock Value",
            format::currency_grouped(a.total_stock_value),
            Some(StatusColor::Green),
        ),
        Kpi::new(
            "warehouses",
            "Warehouses",
            a.warehouses_count.to_string(),
            None,
        ),
    ]
}

/// "Inventory Overview" panel.
pub fn overview_summary(analytics: Option<&InventoryAnalytics>) -> [Kpi; 2] {
    let a = analytics.copied().unwrap_or_default();
    [
        Kpi::new(
            "products",
            "Total Products",
            a.total_products.to_string(),
            Some(StatusColor::Blue),
        ),
        Kpi::new(
            "stock-value",
            "Stock Value",
            format::currency_grouped(a.total_stock_value),
            Some(StatusColor::Green),
        ),
    ]
}

/// "Stock Alerts" panel.
pub fn overview_alerts(analytics: Option<&InventoryAnalytics>) -> [Kpi; 2] {
    let a = analytics.copied().unwrap_or_default();
    [
        Kpi::new(
            "low-stock",
            "Low Stock Items",
            a.low_stock_items.to_string(),
            Some(StatusColor::Red),
        ),
        Kpi::new(
            "warehouses",
            "Warehouses",
            a.warehouses_count.to_string(),
            None,
        ),
    ]
}

// ── Tabs ─────────────────────────────────────────────────────────────

/// Dashboard tabs, numbered 1-9 in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabId {
    #[default]
    Dashboard,
    Products,
    Categories,
    Warehouses,
    StockLevels,
    Movements,
    Adjustments,
    SerialNumbers,
    BatchNumbers,
}

impl TabId {
    pub const ALL: [TabId; 9] = [
        Self::Dashboard,
        Self::Products,
        Self::Categories,
        Self::Warehouses,
        Self::StockLevels,
        Self::Movements,
        Self::Adjustments,
        Self::SerialNumbers,
        Self::BatchNumbers,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Warehouses => "warehouses",
            Self::StockLevels => "stock",
            Self::Movements => "movements",
            Self::Adjustments => "adjustments",
            Self::SerialNumbers => "serial",
            Self::BatchNumbers => "batch",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Products => "Products",
            Self::Categories => "Categories",
            Self::Warehouses => "Warehouses",
            Self::StockLevels => "Stock Levels",
            Self::Movements => "Movements",
            Self::Adjustments => "Adjustments",
            Self::SerialNumbers => "Serial Numbers",
            Self::BatchNumbers => "Batch Numbers",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Dashboard => "📈",
            Self::Products => "📦",
            Self::Categories => "🏷",
            Self::Warehouses => "🏭",
            Self::StockLevels => "📊",
            Self::Movements => "🔄",
            Self::Adjustments => "⚖",
            Self::SerialNumbers => "🔢",
            Self::BatchNumbers => "🗃",
        }
    }

    /// Collection shown on this tab; the dashboard shows analytics.
    pub fn resource(self) -> Resource {
        match self {
            Self::Dashboard => Resource::Analytics,
            Self::Products => Resource::Products,
            Self::Categories => Resource::Categories,
            Self::Warehouses => Resource::Warehouses,
            Self::StockLevels => Resource::StockLevels,
            Self::Movements => Resource::Movements,
            Self::Adjustments => Resource::Adjustments,
            Self::SerialNumbers => Resource::SerialNumbers,
            Self::BatchNumbers => Resource::BatchNumbers,
        }
    }

    /// Number key (1-9).
    pub fn number(self) -> u8 {
        let idx = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        u8::try_from(idx + 1).unwrap_or(1)
    }

    pub fn from_number(n: u8) -> Option<Self> {
        let idx = usize::from(n).checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    /// Next tab (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous tab (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpis_fall_back_to_zero() {
        let kpis = dashboard_kpis(None);
        let values: Vec<&str> = kpis.iter().map(|k| k.value.as_str()).collect();
        assert_eq!(values, vec!["0", "0", "$0", "0"]);
    }

    #[test]
    fn stock_value_is_grouped() {
        let analytics = InventoryAnalytics {
            total_products: 120,
            low_stock_items: 4,
            total_stock_value: 1_234_567.0,
            warehouses_count: 3,
        };
        let kpis = dashboard_kpis(Some(&analytics));
        assert_eq!(kpis[2].value, "$1,234,567");
        assert_eq!(overview_alerts(Some(&analytics))[0].value, "4");
    }

    #[test]
    fn tabs_cycle_in_order() {
        assert_eq!(TabId::Dashboard.next(), TabId::Products);
        assert_eq!(TabId::Dashboard.prev(), TabId::BatchNumbers);
        assert_eq!(TabId::BatchNumbers.next(), TabId::Dashboard);
        assert_eq!(TabId::StockLevels.number(), 5);
        assert_eq!(TabId::from_number(9), Some(TabId::BatchNumbers));
        assert_eq!(TabId::from_number(0), None);
        assert_eq!(TabId::from_number(10), None);
    }
}
