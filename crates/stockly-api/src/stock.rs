// Warehouse, stock ledger, tracking, and analytics endpoints

use serde_json::json;
use tracing::debug;

use crate::client::InventoryClient;
use crate::error::Error;
use crate::types::{
    AdjustmentDto, AnalyticsDto, BatchNumberDto, ListPayload, MovementDto, SerialNumberDto,
    StockLevelDto, StockQuery, WarehouseDto,
};

impl InventoryClient {
    /// `GET inventory/warehouses`
    pub async fn list_warehouses(&self) -> Result<ListPayload<WarehouseDto>, Error> {
        self.get("inventory/warehouses").await
    }

    /// Current stock per product and warehouse.
    ///
    /// `GET inventory/stock?warehouse&status&product_id`
    pub async fn list_stock_levels(
        &self,
        query: &StockQuery,
    ) -> Result<ListPayload<StockLevelDto>, Error> {
        self.get_with_params("inventory/stock", &query.to_params())
            .await
    }

    /// `GET inventory/stock/movements`
    pub async fn list_movements(&self) -> Result<ListPayload<MovementDto>, Error> {
        self.get("inventory/stock/movements").await
    }

    /// `GET inventory/stock/adjust`
    pub async fn list_adjustments(&self) -> Result<ListPayload<AdjustmentDto>, Error> {
        self.get("inventory/stock/adjust").await
    }

    /// Approve a pending adjustment.
    ///
    /// `POST inventory/stock/adjust/{id}/approve`
    pub async fn approve_adjustment(&self, id: &str) -> Result<AdjustmentDto, Error> {
        debug!(id, "approving adjustment");
        self.post(&format!("inventory/stock/adjust/{id}/approve"), &json!({}))
            .await
    }

    /// Reject a pending adjustment.
    ///
    /// `POST inventory/stock/adjust/{id}/reject`
    pub async fn reject_adjustment(&self, id: &str) -> Result<AdjustmentDto, Error> {
        debug!(id, "rejecting adjustment");
        self.post(&format!("inventory/stock/adjust/{id}/reject"), &json!({}))
            .await
    }

    /// `GET inventory/serial-numbers`
    pub async fn list_serial_numbers(&self) -> Result<ListPayload<SerialNumberDto>, Error> {
        self.get("inventory/serial-numbers").await
    }

    /// `GET inventory/batch-numbers`
    pub async fn list_batch_numbers(&self) -> Result<ListPayload<BatchNumberDto>, Error> {
        self.get("inventory/batch-numbers").await
    }

    /// Dashboard counts and sums.
    ///
    /// `GET inventory/analytics`
    pub async fn get_analytics(&self) -> Result<AnalyticsDto, Error> {
        self.get("inventory/analytics").await
    }
}
