//! Actions are the only way state changes. Keys, data updates and
//! command results all arrive here.

use std::fmt;
use std::sync::Arc;

use stockly_core::{
    Collection, Filters, InventoryAnalytics, Product, ProductForm, QueryKey, QueryState,
    RecordId, StockAdjustment, StockLevel, TabId, ViewState, Warehouse,
};

// ── Data feeds ──────────────────────────────────────────────────────

/// Typed records a screen needs beyond the rendered table: the row a
/// key press acts on, pagination, capacities, alert counts.
#[derive(Debug, Clone, Default)]
pub enum Records {
    #[default]
    None,
    Products(Arc<Collection<Product>>),
    Warehouses(Arc<Collection<Warehouse>>),
    StockLevels(Arc<Collection<StockLevel>>),
    Adjustments(Arc<Collection<StockAdjustment>>),
}

/// One published state of a mounted tab's query.
#[derive(Debug, Clone)]
pub struct ViewFeed {
    pub tab: TabId,
    pub key: QueryKey,
    pub view: ViewState,
    /// Data is shown while a background refetch runs.
    pub refreshing: bool,
    pub records: Records,
}

// ── Notifications ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }
}

// ── Confirmation ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteProduct { id: RecordId, name: String },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteProduct { .. } => {
                write!(f, "Are you sure you want to delete this product?")
            }
        }
    }
}

// ── Action ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Action {
    // Lifecycle
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // Navigation
    SwitchTab(TabId),
    ToggleHelp,

    // Data
    ViewUpdated(Box<ViewFeed>),
    AnalyticsUpdated(QueryState<InventoryAnalytics>),
    Retry(TabId),
    SetFilters(TabId, Filters),

    // Product form
    OpenProductForm(Option<Box<Product>>),
    CloseProductForm,
    SubmitProductForm(Box<ProductForm>),
    ProductSaved(String),
    ProductSaveFailed(String),

    // Confirmation dialog
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // Adjustments
    ReviewAdjustment { id: RecordId, approve: bool },

    Notify(Notification),
}
