// ── Remote collections ──
//
// `Record` ties a domain type to the backend collection it lives in and
// to the call that fetches it. The generic list view and the cache only
// ever talk to this trait.

use std::future::Future;

use serde::Serialize;
use stockly_api::InventoryClient;
use stockly_api::types::{ListPayload, Pagination, ProductQuery, StockQuery};

use crate::error::CoreError;
use crate::model::{
    BatchNumber, Category, Product, SerialNumber, StockAdjustment, StockLevel, StockMovement,
    Warehouse,
};
use crate::query::{Filters, Resource};

/// A fetched page of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection<T> {
    pub items: Vec<T>,
    /// Present only for paginated endpoints.
    pub pagination: Option<Pagination>,
}

impl<T> Collection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T, D> From<ListPayload<D>> for Collection<T>
where
    T: From<D>,
{
    fn from(payload: ListPayload<D>) -> Self {
        let (items, pagination) = payload.into_parts();
        Self {
            items: items.into_iter().map(T::from).collect(),
            pagination,
        }
    }
}

/// A domain type backed by a remote collection.
pub trait Record: Sized + Send + Sync + 'static {
    const RESOURCE: Resource;

    /// Fetch one page, applying whichever filters the endpoint accepts.
    fn fetch(
        client: InventoryClient,
        filters: Filters,
    ) -> impl Future<Output = Result<Collection<Self>, CoreError>> + Send;
}

// ── Filter translation ──────────────────────────────────────────────

pub(crate) fn product_query(filters: &Filters) -> ProductQuery {
    ProductQuery {
        page: filters.get_u32("page"),
        limit: filters.get_u32("limit"),
        search: filters.get("search").map(str::to_owned),
        category: filters.get("category").map(str::to_owned),
        status: filters.get("status").map(str::to_owned),
    }
}

pub(crate) fn stock_query(filters: &Filters) -> StockQuery {
    StockQuery {
        warehouse: filters.get("warehouse").map(str::to_owned),
        status: filters.get("status").map(str::to_owned),
        product_id: filters.get("product_id").map(str::to_owned),
    }
}

// ── Impls ───────────────────────────────────────────────────────────

impl Record for Product {
    const RESOURCE: Resource = Resource::Products;

    async fn fetch(
        client: InventoryClient,
        filters: Filters,
    ) -> Result<Collection<Self>, CoreError> {
        let payload = client.list_products(&product_query(&filters)).await?;
        Ok(payload.into())
    }
}

impl Record for Category {
    const RESOURCE: Resource = Resource::Categories;

    async fn fetch(
        client: InventoryClient,
        _filters: Filters,
    ) -> Result<Collection<Self>, CoreError> {
        Ok(client.list_categories().await?.into())
    }
}

impl Record for Warehouse {
    const RESOURCE: Resource = Resource::Warehouses;

    async fn fetch(
        client: InventoryClient,
        _filters: Filters,
    ) -> Result<Collection<Self>, CoreError> {
        Ok(client.list_warehouses().await?.into())
    }
}

impl Record for StockLevel {
    const RESOURCE: Resource = Resource::StockLevels;

    async fn fetch(
        client: InventoryClient,
        filters: Filters,
    ) -> Result<Collection<Self>, CoreError> {
        let payload = client.list_stock_levels(&stock_query(&filters)).await?;
        Ok(payload.into())
    }
}

impl Record for StockMovement {
    const RESOURCE: Resource = Resource::Movements;

    async fn fetch(
        client: InventoryClient,
        _filters: Filters,
    ) -> Result<Collection<Self>, CoreError> {
        Ok(client.list_movements().await?.into())
    }
}

impl Record for StockAdjustment {
    const RESOURCE: Resource = Resource::Adjustments;

    async fn fetch(
        client: InventoryClient,
        _filters: Filters,
    ) -> Result<Collection<Self>, CoreError> {
        Ok(client.list_adjustments().await?.into())
    }
}

impl Record for SerialNumber {
    const RESOURCE: Resource = Resource::SerialNumbers;

    async fn fetch(
        client: InventoryClient,
        _filters: Filters,
    ) -> Result<Collection<Self>, CoreError> {
        Ok(client.list_serial_numbers().await?.into())
    }
}

impl Record for BatchNumber {
    const RESOURCE: Resource = Resource::BatchNumbers;

    async fn fetch(
        client: InventoryClient,
        _filters: Filters,
    ) -> Result<Collection<Self>, CoreError> {
        Ok(client.list_batch_numbers().await?.into())
    }
}
