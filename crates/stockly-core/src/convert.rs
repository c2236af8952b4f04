// ── API-to-domain type conversions ──
//
// Bridges raw `stockly_api` wire types into `stockly_core::model`
// domain types. Each `From` impl parses status strings into closed
// enums, parses timestamps, and fills defaults for missing data.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use stockly_api::types::{
    AdjustmentDto, AnalyticsDto, BatchNumberDto, CategoryDto, MovementDto, ProductDto,
    SerialNumberDto, StockLevelDto, WarehouseDto,
};

use crate::model::{
    AdjustmentKind, ApprovalStatus, BatchNumber, BatchStatus, Capacity, Category,
    InventoryAnalytics, MovementKind, Product, ProductStatus, SerialNumber, SerialStatus,
    StockAdjustment, StockLevel, StockMovement, StockStatus, Warehouse, WarehouseStatus,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a status word, falling back to the enum's `Unknown` default.
fn parse_status<T: FromStr + Default>(raw: Option<&str>) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or_default()
}

/// Parse a wire timestamp, silently dropping unparseable values.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DD HH:MM:SS` (taken as UTC), and a
/// bare date (midnight UTC).
pub(crate) fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let s = raw?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

// ── Catalog ────────────────────────────────────────────────────────

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        // Backend rows carry `is_active` instead of a status word.
        let status = match (dto.status.as_deref(), dto.is_active) {
            (Some(s), _) => parse_status(Some(s)),
            (None, Some(true)) => ProductStatus::Active,
            (None, Some(false)) => ProductStatus::Inactive,
            (None, None) => ProductStatus::Unknown,
        };

        Product {
            id: dto.id.into(),
            sku: dto.sku,
            name: dto.name,
            description: non_empty(dto.description),
            category: non_empty(dto.category),
            price: dto.price.unwrap_or_default(),
            cost: dto.cost,
            stock_quantity: dto.stock_quantity.unwrap_or_default(),
            min_stock_level: dto.min_stock_level,
            status,
            supplier_name: non_empty(dto.supplier_name),
            location_name: non_empty(dto.location_name),
            created_at: parse_timestamp(dto.created_at.as_deref()),
            updated_at: parse_timestamp(dto.updated_at.as_deref()),
        }
    }
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Category {
            id: dto.id.into(),
            name: dto.name,
            description: non_empty(dto.description),
            product_count: dto.product_count.unwrap_or_default(),
            parent_category: non_empty(dto.parent_category),
            created_at: parse_timestamp(dto.created_at.as_deref()),
        }
    }
}

// ── Warehouses & stock ─────────────────────────────────────────────

impl From<WarehouseDto> for Warehouse {
    fn from(dto: WarehouseDto) -> Self {
        Warehouse {
            id: dto.id.into(),
            name: dto.name,
            code: non_empty(dto.code),
            address: non_empty(dto.address),
            city: non_empty(dto.city),
            country: non_empty(dto.country),
            capacity: Capacity {
                total: dto.total_capacity,
                used: dto.used_capacity,
            },
            status: parse_status::<WarehouseStatus>(dto.status.as_deref()),
        }
    }
}

impl From<StockLevelDto> for StockLevel {
    fn from(dto: StockLevelDto) -> Self {
        let status = match dto.status.as_deref() {
            Some(s) => parse_status(Some(s)),
            None => StockStatus::derive(dto.quantity, dto.min_level, dto.max_level),
        };

        StockLevel {
            product_id: dto.product_id.into(),
            product_name: non_empty(dto.product_name),
            sku: non_empty(dto.sku),
            warehouse_name: non_empty(dto.warehouse_name),
            quantity: dto.quantity,
            min_level: dto.min_level,
            max_level: dto.max_level,
            status,
            value: dto.value,
        }
    }
}

impl From<MovementDto> for StockMovement {
    fn from(dto: MovementDto) -> Self {
        StockMovement {
            id: dto.id.into(),
            product_name: non_empty(dto.product_name),
            kind: parse_status::<MovementKind>(Some(dto.kind.as_str())),
            quantity: dto.quantity,
            from_location: non_empty(dto.from_location),
            to_location: non_empty(dto.to_location),
            reference: non_empty(dto.reference),
            user_name: non_empty(dto.user_name),
            timestamp: parse_timestamp(dto.timestamp.as_deref()),
        }
    }
}

impl From<AdjustmentDto> for StockAdjustment {
    fn from(dto: AdjustmentDto) -> Self {
        StockAdjustment {
            id: dto.id.into(),
            product_name: non_empty(dto.product_name),
            kind: parse_status::<AdjustmentKind>(Some(dto.adjustment_type.as_str())),
            quantity: dto.quantity,
            reason: non_empty(dto.reason),
            reference: non_empty(dto.reference),
            approved_by: non_empty(dto.approved_by),
            created_at: parse_timestamp(dto.created_at.as_deref()),
            status: parse_status::<ApprovalStatus>(dto.status.as_deref()),
        }
    }
}

// ── Tracking ───────────────────────────────────────────────────────

impl From<SerialNumberDto> for SerialNumber {
    fn from(dto: SerialNumberDto) -> Self {
        SerialNumber {
            id: dto.id.into(),
            serial_number: dto.serial_number,
            product_name: non_empty(dto.product_name),
            sku: non_empty(dto.sku),
            status: parse_status::<SerialStatus>(dto.status.as_deref()),
            location: non_empty(dto.location),
            created_at: parse_timestamp(dto.created_at.as_deref()),
            sold_at: parse_timestamp(dto.sold_at.as_deref()),
        }
    }
}

impl From<BatchNumberDto> for BatchNumber {
    fn from(dto: BatchNumberDto) -> Self {
        BatchNumber {
            id: dto.id.into(),
            batch_number: dto.batch_number,
            product_name: non_empty(dto.product_name),
            sku: non_empty(dto.sku),
            quantity: dto.quantity,
            expiry_date: parse_timestamp(dto.expiry_date.as_deref()),
            manufacturing_date: parse_timestamp(dto.manufacturing_date.as_deref()),
            status: parse_status::<BatchStatus>(dto.status.as_deref()),
            location: non_empty(dto.location),
        }
    }
}

// ── Analytics ──────────────────────────────────────────────────────

impl From<AnalyticsDto> for InventoryAnalytics {
    fn from(dto: AnalyticsDto) -> Self {
        InventoryAnalytics {
            total_products: dto.total_products,
            low_stock_items: dto.low_stock_items,
            total_stock_value: dto.total_stock_value,
            warehouses_count: dto.warehouses_count,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use stockly_api::types::WireId;

    use crate::model::RecordId;

    #[test]
    fn timestamp_formats() {
        let rfc = parse_timestamp(Some("2024-03-01T10:30:00Z")).unwrap();
        assert_eq!(rfc.hour(), 10);

        let naive = parse_timestamp(Some("2024-03-01 10:30:00")).unwrap();
        assert_eq!(naive, rfc);

        let date = parse_timestamp(Some("2024-12-31")).unwrap();
        assert_eq!((date.month(), date.day(), date.hour()), (12, 31, 0));

        assert!(parse_timestamp(Some("last tuesday")).is_none());
        assert!(parse_timestamp(None).is_none());
    }

    #[test]
    fn backend_product_uses_is_active() {
        let dto: ProductDto = serde_json::from_value(serde_json::json!({
            "id": 3,
            "sku": "S-3",
            "name": "Cable",
            "selling_price": 4.0,
            "quantity_on_hand": 2,
            "is_active": false
        }))
        .unwrap();
        let product = Product::from(dto);
        assert_eq!(product.id, RecordId::Numeric(3));
        assert_eq!(product.status, ProductStatus::Inactive);
        assert_eq!(product.stock_quantity, 2);
        assert!((product.price - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_status_words_fall_back() {
        let dto = SerialNumberDto {
            id: WireId::Str("sn-1".into()),
            serial_number: "SN0001".into(),
            product_name: None,
            sku: None,
            status: Some("lost-in-transit".into()),
            location: Some(String::new()),
            created_at: None,
            sold_at: None,
        };
        let serial = SerialNumber::from(dto);
        assert_eq!(serial.status, SerialStatus::Unknown);
        assert!(serial.location.is_none());
    }

    #[test]
    fn missing_stock_status_is_derived() {
        let dto: StockLevelDto = serde_json::from_value(serde_json::json!({
            "product_id": 1,
            "quantity": 3,
            "min_stock_level": 5,
            "max_level": 50
        }))
        .unwrap();
        assert_eq!(StockLevel::from(dto).status, StockStatus::Low);
    }
}
