//! Wire types for the inventory REST API.
//!
//! Field names follow the web client (`price`, `cost`, `stock_quantity`);
//! the backend's own column names (`selling_price`, `cost_price`,
//! `quantity_on_hand`, ...) are accepted as serde aliases so either
//! server flavor decodes into the same DTO.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Envelope ─────────────────────────────────────────────────────────

/// `{ success, data }` envelope wrapping every response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

fn default_success() -> bool {
    true
}

/// Page metadata from paginated collection endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// Collection payload: either a bare array or a paginated object.
///
/// The products endpoint nests rows under `products`; other paginated
/// endpoints use `items`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Paged {
        #[serde(alias = "products")]
        items: Vec<T>,
        pagination: Pagination,
    },
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    pub fn into_parts(self) -> (Vec<T>, Option<Pagination>) {
        match self {
            Self::Paged { items, pagination } => (items, Some(pagination)),
            Self::Bare(items) => (items, None),
        }
    }
}

// ── Identifiers ──────────────────────────────────────────────────────

/// Record identifier as it appears on the wire.
///
/// The backend emits integer keys, older front-end mocks emit strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Int(i64),
    Str(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

// ── Products ─────────────────────────────────────────────────────────

/// Product row, from `GET inventory/products` and `GET inventory/products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: WireId,
    #[serde(default)]
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "selling_price")]
    pub price: Option<f64>,
    #[serde(default, alias = "cost_price")]
    pub cost: Option<f64>,
    #[serde(default, alias = "quantity_on_hand")]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub min_stock_level: Option<i64>,
    /// `active`, `inactive` or `discontinued`.
    #[serde(default)]
    pub status: Option<String>,
    /// Backend flavor of `status`.
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Category row, from `GET inventory/categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: WireId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_count: Option<u64>,
    #[serde(default)]
    pub parent_category: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ── Warehouses & stock ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseDto {
    pub id: WireId,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub total_capacity: u64,
    #[serde(default)]
    pub used_capacity: u64,
    #[serde(default)]
    pub status: Option<String>,
}

/// Stock level per product and warehouse, from `GET inventory/stock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLevelDto {
    pub product_id: WireId,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    #[serde(default, alias = "quantity_on_hand")]
    pub quantity: i64,
    #[serde(default, alias = "min_stock_level")]
    pub min_level: i64,
    #[serde(default, alias = "max_stock_level")]
    pub max_level: i64,
    /// `ok`, `low`, `critical` or `overstock`. Derived client-side when absent.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub value: f64,
}

/// Append-only stock ledger entry, from `GET inventory/stock/movements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementDto {
    pub id: WireId,
    #[serde(default)]
    pub product_name: Option<String>,
    /// `in`, `out`, `transfer` or `adjustment`.
    #[serde(rename = "type", alias = "movement_type")]
    pub kind: String,
    pub quantity: i64,
    #[serde(default)]
    pub from_location: Option<String>,
    #[serde(default)]
    pub to_location: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default, alias = "created_at")]
    pub timestamp: Option<String>,
}

/// Manual stock correction awaiting approval, from `GET inventory/stock/adjust`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentDto {
    pub id: WireId,
    #[serde(default)]
    pub product_name: Option<String>,
    /// `increase` or `decrease`.
    pub adjustment_type: String,
    pub quantity: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

// ── Tracking ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerialNumberDto {
    pub id: WireId,
    pub serial_number: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub sold_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchNumberDto {
    pub id: WireId,
    pub batch_number: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub manufacturing_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

// ── Analytics ────────────────────────────────────────────────────────

/// Dashboard summary, from `GET inventory/analytics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsDto {
    #[serde(default)]
    pub total_products: u64,
    #[serde(default)]
    pub low_stock_items: u64,
    #[serde(default)]
    pub total_stock_value: f64,
    #[serde(default)]
    pub warehouses_count: u64,
}

// ── Query parameters ─────────────────────────────────────────────────

/// Filters accepted by `GET inventory/products`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

impl ProductQuery {
    /// Query-string pairs, skipping unset and blank values.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        push_text(&mut params, "search", self.search.as_deref());
        push_text(&mut params, "category", self.category.as_deref());
        push_text(&mut params, "status", self.status.as_deref());
        params
    }
}

/// Filters accepted by `GET inventory/stock`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockQuery {
    pub warehouse: Option<String>,
    pub status: Option<String>,
    pub product_id: Option<String>,
}

impl StockQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_text(&mut params, "warehouse", self.warehouse.as_deref());
        push_text(&mut params, "status", self.status.as_deref());
        push_text(&mut params, "product_id", self.product_id.as_deref());
        params
    }
}

fn push_text(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        params.push((key, v.to_owned()));
    }
}

// ── Request bodies ───────────────────────────────────────────────────

/// Create/update body for products. Unset fields are omitted so an
/// update only touches what the caller changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ProductPayload {
    /// `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_category: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paged_payload_accepts_products_key() {
        let raw = json!({
            "products": [{ "id": 1, "name": "Widget" }],
            "pagination": { "page": 2, "limit": 20, "total": 41, "totalPages": 3 }
        });
        let payload: ListPayload<ProductDto> = serde_json::from_value(raw).unwrap();
        let (items, pagination) = payload.into_parts();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, WireId::Int(1));
        assert_eq!(pagination.unwrap().total_pages, 3);
    }

    #[test]
    fn bare_payload_has_no_pagination() {
        let raw = json!([{ "id": "w-1", "name": "Main" }]);
        let payload: ListPayload<WarehouseDto> = serde_json::from_value(raw).unwrap();
        let (items, pagination) = payload.into_parts();
        assert_eq!(items[0].id, WireId::Str("w-1".into()));
        assert!(pagination.is_none());
    }

    #[test]
    fn backend_column_names_decode_as_aliases() {
        let raw = json!({
            "id": 7,
            "sku": "SKU-7",
            "name": "Bolt",
            "selling_price": 2.5,
            "cost_price": 1.25,
            "is_active": false
        });
        let dto: ProductDto = serde_json::from_value(raw).unwrap();
        assert_eq!(dto.price, Some(2.5));
        assert_eq!(dto.cost, Some(1.25));
        assert_eq!(dto.is_active, Some(false));
    }

    #[test]
    fn product_query_skips_blank_filters() {
        let query = ProductQuery {
            page: Some(1),
            limit: Some(20),
            search: Some("  ".into()),
            category: None,
            status: Some("active".into()),
        };
        assert_eq!(
            query.to_params(),
            vec![
                ("page", "1".to_owned()),
                ("limit", "20".to_owned()),
                ("status", "active".to_owned()),
            ]
        );
    }

    #[test]
    fn payload_omits_unset_fields() {
        let payload = ProductPayload {
            name: Some("Lamp".into()),
            price: Some(19.99),
            ..ProductPayload::default()
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "name": "Lamp", "price": 19.99 })
        );
        assert!(ProductPayload::default().is_empty());
    }
}
