// ── Domain model ──
//
// Flat, read-through copies of backend records. The front end never owns
// their lifecycle; every change goes through the API and the cache.

pub mod analytics;
pub mod product;
pub mod record_id;
pub mod stock;
pub mod tracking;
pub mod warehouse;

pub use analytics::InventoryAnalytics;
pub use product::{Category, Product, ProductStatus};
pub use record_id::RecordId;
pub use stock::{
    AdjustmentKind, ApprovalStatus, MovementKind, StockAdjustment, StockLevel, StockMovement,
    StockStatus,
};
pub use tracking::{BatchNumber, BatchStatus, ExpiryNotice, SerialNumber, SerialStatus};
pub use warehouse::{Capacity, Warehouse, WarehouseStatus};
