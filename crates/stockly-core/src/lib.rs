//! Domain layer between `stockly-api` and the CLI / TUI.
//!
//! - **[`Inventory`]**: Facade over one inventory API. Reads go through
//!   an injected [`QueryCache`]; writes go through
//!   [`execute()`](Inventory::execute), which invalidates every resource
//!   the command touched once it succeeds.
//!
//! - **[`QueryCache`]**: Keyed store of loading / ready / failed results
//!   per (resource, filters) pair. Concurrent loads of one key share a
//!   single request; invalidation refetches only observed keys.
//!
//! - **[`ListView`]**: Generic remote-collection view: a resource, its
//!   filters, and a declarative column spec rendered into a
//!   [`ViewState`]. Per-entity specs live in [`view::views`].
//!
//! - **[`ProductForm`]**: Draft, validation, and create/update submit for
//!   products.
//!
//! - **Domain model** ([`model`]): Flat records with closed status enums
//!   that all map through one [`StatusKind`] → [`StatusColor`] table.

pub mod command;
pub mod config;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod format;
pub mod inventory;
pub mod model;
pub mod query;
pub mod record;
pub mod status;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandResult};
pub use config::InventoryConfig;
pub use dashboard::{Kpi, TabId};
pub use error::CoreError;
pub use form::{Field, FieldErrors, FormMode, ProductDraft, ProductForm, ValidProduct};
pub use inventory::Inventory;
pub use query::{Filters, QueryCache, QueryHandle, QueryKey, QueryState, Resource, Snapshot};
pub use record::{Collection, Record};
pub use status::{Status, StatusColor, StatusKind};
pub use view::{Cell, Column, ListView, RenderContext, ViewState};

pub use model::{
    AdjustmentKind, ApprovalStatus, BatchNumber, BatchStatus, Capacity, Category, ExpiryNotice,
    InventoryAnalytics, MovementKind, Product, ProductStatus, RecordId, SerialNumber,
    SerialStatus, StockAdjustment, StockLevel, StockMovement, StockStatus, Warehouse,
    WarehouseStatus,
};

// Payload types callers build commands from, and page metadata they read.
pub use stockly_api::types::{CategoryPayload, Pagination, ProductPayload};
