// ── Command API ──
//
// Every list-modifying action flows through `Command`. `Inventory`
// performs the call and, on success only, invalidates the resources the
// command touched.

use stockly_api::types::{CategoryPayload, ProductPayload};

use crate::error::CoreError;
use crate::form::STATUS_OPTIONS;
use crate::model::{Category, Product, RecordId, StockAdjustment};
use crate::query::Resource;

/// All write operations against the inventory API.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // ── Products ─────────────────────────────────────────────────────
    CreateProduct(ProductPayload),
    UpdateProduct {
        id: RecordId,
        payload: ProductPayload,
    },
    DeleteProduct {
        id: RecordId,
    },

    // ── Categories ───────────────────────────────────────────────────
    CreateCategory(CategoryPayload),

    // ── Adjustments ──────────────────────────────────────────────────
    ApproveAdjustment {
        id: RecordId,
    },
    RejectAdjustment {
        id: RecordId,
    },
}

/// What a successful command returned.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Product(Product),
    Category(Category),
    Adjustment(StockAdjustment),
    Ok,
}

impl Command {
    /// Resources whose cached queries are stale after this command.
    pub fn affected_resources(&self) -> &'static [Resource] {
        match self {
            Self::CreateProduct(_) | Self::UpdateProduct { .. } | Self::DeleteProduct { .. } => {
                &[Resource::Products, Resource::Analytics]
            }
            Self::CreateCategory(_) => &[Resource::Categories],
            Self::ApproveAdjustment { .. } | Self::RejectAdjustment { .. } => {
                &[Resource::Adjustments, Resource::StockLevels]
            }
        }
    }

    /// Client-side checks that never reach the network.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            Self::UpdateProduct { payload, .. } if payload.is_empty() => {
                Err(CoreError::validation("No fields to update"))
            }
            Self::CreateProduct(payload) | Self::UpdateProduct { payload, .. } => {
                check_product_fields(payload)
            }
            Self::CreateCategory(payload) if payload.name.trim().is_empty() => {
                Err(CoreError::validation("Category name is required"))
            }
            _ => Ok(()),
        }
    }

    /// Short verb for logs and toasts.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::CreateProduct(_) => "create product",
            Self::UpdateProduct { .. } => "update product",
            Self::DeleteProduct { .. } => "delete product",
            Self::CreateCategory(_) => "create category",
            Self::ApproveAdjustment { .. } => "approve adjustment",
            Self::RejectAdjustment { .. } => "reject adjustment",
        }
    }
}

/// Range checks on whichever product fields are present.
fn check_product_fields(payload: &ProductPayload) -> Result<(), CoreError> {
    let bad_amount = |v: Option<f64>| v.is_some_and(|n| !n.is_finite() || n < 0.0);
    let bad_count = |v: Option<i64>| v.is_some_and(|n| n < 0);

    if bad_amount(payload.price) {
        return Err(CoreError::validation("Price must be positive"));
    }
    if bad_amount(payload.cost) {
        return Err(CoreError::validation("Cost must be positive"));
    }
    if bad_count(payload.stock_quantity) {
        return Err(CoreError::validation("Stock quantity must be non-negative"));
    }
    if bad_count(payload.min_stock_level) {
        return Err(CoreError::validation("Min stock level must be non-negative"));
    }
    let known_status = |s: &str| STATUS_OPTIONS.iter().any(|&(value, _)| value == s);
    if payload.status.as_deref().is_some_and(|s| !known_status(s)) {
        return Err(CoreError::validation("Status must be active or inactive"));
    }
    Ok(())
}
