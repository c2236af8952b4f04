// ── Entity views ──
//
// Declarative column specs for every inventory collection. Each function
// returns a `ListView` bound to the caller's filters; rendering is the
// same generic code for all of them.

use crate::format;
use crate::model::{
    AdjustmentKind, BatchNumber, Category, Product, SerialNumber, StockAdjustment, StockLevel,
    StockMovement, Warehouse,
};
use crate::query::{Filters, Resource};
use crate::status::{Status, StatusColor};

use super::column::Cell;
use super::list::ListView;

/// Marker appended to quantities at or below their minimum.
pub const LOW_STOCK_MARKER: &str = "Low Stock";

pub fn products(filters: Filters) -> ListView<Product> {
    ListView::<Product>::builder(Resource::Products)
        .filters(filters)
        .column("product", "Product", |p, _| {
            Cell::plain(&p.name).with_secondary(Some(&p.sku))
        })
        .column("category", "Category", |p, _| {
            Cell::plain(format::or_dash(p.category.as_deref()))
        })
        .column("price", "Price", |p, _| Cell::plain(format::currency(p.price)))
        .column("stock", "Stock", |p, _| stock_quantity(p))
        .column("status", "Status", |p, _| Cell::badge(&p.status))
        .column("created", "Created", |p, _| {
            Cell::plain(format::optional_date(p.created_at))
        })
        .empty(
            "📦",
            "No products found",
            "Add products to start tracking inventory",
        )
        .loading("Loading products...")
        .build()
}

fn stock_quantity(product: &Product) -> Cell {
    let text = format::grouped(product.stock_quantity);
    if product.is_low_stock() {
        Cell::toned(text, StatusColor::Red).with_marker(LOW_STOCK_MARKER)
    } else {
        Cell::plain(text)
    }
}

pub fn categories() -> ListView<Category> {
    ListView::<Category>::builder(Resource::Categories)
        .column("name", "Name", |c, _| {
            Cell::plain(&c.name).with_secondary(c.description.as_deref())
        })
        .column("products", "Products", |c, _| {
            Cell::plain(c.product_count.to_string())
        })
        .column("parent", "Parent", |c, _| {
            Cell::plain(format::or_dash(c.parent_category.as_deref()))
        })
        .column("created", "Created", |c, _| {
            Cell::plain(format::optional_date(c.created_at))
        })
        .empty(
            "🏷",
            "No categories found",
            "Create categories to organize products",
        )
        .loading("Loading categories...")
        .build()
}

pub fn warehouses() -> ListView<Warehouse> {
    ListView::<Warehouse>::builder(Resource::Warehouses)
        .column("warehouse", "Warehouse", |w, _| {
            Cell::plain(&w.name).with_secondary(w.code.as_deref())
        })
        .column("location", "Location", |w, _| {
            Cell::plain(format::or_dash(w.location().as_deref()))
        })
        .column("capacity", "Capacity", |w, _| {
            Cell::plain(format!("{}/{} units", w.capacity.used, w.capacity.total))
        })
        .column("utilization", "Utilization", |w, _| {
            let pct = w.capacity.utilization_pct();
            Cell::toned(format!("{pct:.0}%"), format::utilization_band(pct))
        })
        .column("status", "Status", |w, _| Cell::badge(&w.status))
        .empty(
            "🏭",
            "No warehouses found",
            "Add warehouses to manage inventory locations",
        )
        .loading("Loading warehouses...")
        .build()
}

pub fn stock_levels(filters: Filters) -> ListView<StockLevel> {
    ListView::<StockLevel>::builder(Resource::StockLevels)
        .filters(filters)
        .column("product", "Product", |s, _| {
            Cell::plain(format::or_dash(s.product_name.as_deref()))
                .with_secondary(s.sku.as_deref())
        })
        .column("warehouse", "Warehouse", |s, _| {
            Cell::plain(format::or_dash(s.warehouse_name.as_deref()))
        })
        .column("quantity", "Quantity", |s, _| {
            Cell::plain(format::grouped(s.quantity))
        })
        .column("levels", "Min / Max", |s, _| {
            Cell::plain(format!("{} / {}", s.min_level, s.max_level))
        })
        .column("value", "Value", |s, _| Cell::plain(format::currency(s.value)))
        .column("status", "Status", |s, _| Cell::badge(&s.status))
        .empty(
            "📊",
            "No stock levels found",
            "Stock levels will appear here once products are stocked",
        )
        .loading("Loading stock levels...")
        .build()
}

pub fn movements() -> ListView<StockMovement> {
    ListView::<StockMovement>::builder(Resource::Movements)
        .column("product", "Product", |m, _| {
            Cell::plain(format::or_dash(m.product_name.as_deref()))
        })
        .column("type", "Type", |m, _| Cell::badge(&m.kind))
        .column("quantity", "Quantity", |m, _| {
            Cell::toned(format!("{}{}", m.kind.sign(), m.quantity.abs()), m.kind.color())
        })
        .column("from", "From", |m, _| {
            Cell::plain(format::or_dash(m.from_location.as_deref()))
        })
        .column("to", "To", |m, _| {
            Cell::plain(format::or_dash(m.to_location.as_deref()))
        })
        .column("reference", "Reference", |m, _| {
            Cell::plain(format::or_dash(m.reference.as_deref()))
        })
        .column("user", "User", |m, _| {
            Cell::plain(format::or_dash(m.user_name.as_deref()))
        })
        .column("date", "Date", |m, _| {
            Cell::plain(format::optional_timestamp(m.timestamp))
        })
        .empty("🔄", "No movements found", "Stock movements will appear here")
        .loading("Loading movements...")
        .build()
}

pub fn adjustments() -> ListView<StockAdjustment> {
    ListView::<StockAdjustment>::builder(Resource::Adjustments)
        .column("product", "Product", |a, _| {
            Cell::plain(format::or_dash(a.product_name.as_deref()))
        })
        .column("type", "Type", |a, _| Cell::badge(&a.kind))
        .column("quantity", "Quantity", |a, _| {
            let sign = match a.kind {
                AdjustmentKind::Increase => "+",
                AdjustmentKind::Decrease => "-",
                AdjustmentKind::Unknown => "",
            };
            Cell::toned(format!("{sign}{}", a.quantity.abs()), a.kind.color())
        })
        .column("reason", "Reason", |a, _| {
            Cell::plain(format::or_dash(a.reason.as_deref()))
        })
        .column("status", "Status", |a, _| {
            Cell::badge(&a.status).with_secondary(a.approved_by.as_deref())
        })
        .column("date", "Date", |a, _| {
            Cell::plain(format::optional_timestamp(a.created_at))
        })
        .empty("⚖", "No adjustments found", "Stock adjustments will appear here")
        .loading("Loading adjustments...")
        .build()
}

pub fn serial_numbers() -> ListView<SerialNumber> {
    ListView::<SerialNumber>::builder(Resource::SerialNumbers)
        .column("serial", "Serial Number", |s, _| Cell::plain(&s.serial_number))
        .column("product", "Product", |s, _| {
            Cell::plain(format::or_dash(s.product_name.as_deref()))
                .with_secondary(s.sku.as_deref())
        })
        .column("status", "Status", |s, _| Cell::badge(&s.status))
        .column("location", "Location", |s, _| {
            Cell::plain(format::or_dash(s.location.as_deref()))
        })
        .column("created", "Created", |s, _| {
            Cell::plain(format::optional_date(s.created_at))
        })
        .column("sold", "Sold", |s, _| Cell::plain(format::optional_date(s.sold_at)))
        .empty(
            "🔢",
            "No serial numbers found",
            "Serial numbers will appear here when products are tracked",
        )
        .loading("Loading serial numbers...")
        .build()
}

pub fn batch_numbers() -> ListView<BatchNumber> {
    ListView::<BatchNumber>::builder(Resource::BatchNumbers)
        .column("batch", "Batch Number", |b, _| Cell::plain(&b.batch_number))
        .column("product", "Product", |b, _| {
            Cell::plain(format::or_dash(b.product_name.as_deref()))
                .with_secondary(b.sku.as_deref())
        })
        .column("quantity", "Quantity", |b, _| {
            Cell::plain(format::grouped(b.quantity))
        })
        .column("manufactured", "Manufactured", |b, _| {
            Cell::plain(format::optional_date(b.manufacturing_date))
        })
        .column("expiry", "Expiry", |b, ctx| {
            let text = format::optional_date(b.expiry_date);
            match b.expiry_notice(ctx.now) {
                Some(notice) => {
                    Cell::toned(text, notice.status().color()).with_marker(notice.to_string())
                }
                None => Cell::plain(text),
            }
        })
        .column("status", "Status", |b, _| Cell::badge(&b.status))
        .column("location", "Location", |b, _| {
            Cell::plain(format::or_dash(b.location.as_deref()))
        })
        .empty(
            "🗃",
            "No batch numbers found",
            "Batch numbers will appear here when products are tracked",
        )
        .loading("Loading batch numbers...")
        .build()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{
        ApprovalStatus, BatchStatus, Capacity, MovementKind, ProductStatus, RecordId,
        WarehouseStatus,
    };
    use crate::query::QueryState;
    use crate::record::Collection;
    use crate::view::{RenderContext, ViewState};

    fn product(qty: i64, min: Option<i64>) -> Product {
        Product {
            id: RecordId::Numeric(1),
            sku: "BLU-001".into(),
            name: "Blue Mug".into(),
            description: None,
            category: Some("home".into()),
            price: 12.5,
            cost: Some(4.0),
            stock_quantity: qty,
            min_stock_level: min,
            status: ProductStatus::Active,
            supplier_name: None,
            location_name: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn warehouse(used: u64) -> Warehouse {
        Warehouse {
            id: RecordId::Numeric(1),
            name: "Main".into(),
            code: Some("WH-1".into()),
            address: None,
            city: None,
            country: None,
            capacity: Capacity { total: 100, used },
            status: WarehouseStatus::Active,
        }
    }

    fn batch(expiry_days: i64, now: chrono::DateTime<Utc>) -> BatchNumber {
        BatchNumber {
            id: RecordId::Numeric(1),
            batch_number: "B-1".into(),
            product_name: Some("Milk".into()),
            sku: None,
            quantity: 10,
            expiry_date: Some(now + Duration::days(expiry_days) + Duration::hours(1)),
            manufacturing_date: None,
            status: BatchStatus::Active,
            location: None,
        }
    }

    fn cell<T>(view: &ListView<T>, key: &str, item: &T, ctx: &RenderContext) -> Cell {
        let column = view.columns().iter().find(|c| c.key == key).unwrap();
        (column.render)(item, ctx)
    }

    #[test]
    fn low_stock_quantity_is_flagged_exactly_at_or_below_minimum() {
        let view = products(Filters::new());
        let ctx = RenderContext::now();

        let at_min = cell(&view, "stock", &product(5, Some(5)), &ctx);
        assert_eq!(at_min.tone, Some(StatusColor::Red));
        assert_eq!(at_min.marker.as_deref(), Some("Low Stock"));

        let above = cell(&view, "stock", &product(6, Some(5)), &ctx);
        assert_eq!(above.tone, None);
        assert_eq!(above.marker, None);

        let no_min = cell(&view, "stock", &product(0, None), &ctx);
        assert_eq!(no_min.marker, None);
    }

    #[test]
    fn product_row_shows_sku_price_and_green_active_badge() {
        let view = products(Filters::new());
        let row = view.render_row(&product(40, Some(5)), &RenderContext::now());
        assert_eq!(row[0].secondary.as_deref(), Some("BLU-001"));
        assert_eq!(row[2].text, "$12.50");
        assert_eq!(row[4], Cell::toned("active", StatusColor::Green));
    }

    #[test]
    fn product_created_date_column() {
        let view = products(Filters::new());
        let ctx = RenderContext::now();
        assert_eq!(view.headers().last(), Some(&"Created"));
        assert_eq!(cell(&view, "created", &product(1, None), &ctx).text, "-");

        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let dated = Product {
            created_at: Some(created),
            ..product(1, None)
        };
        assert_eq!(
            cell(&view, "created", &dated, &ctx).text,
            format::date(created)
        );
    }

    #[test]
    fn utilization_bands() {
        let view = warehouses();
        let ctx = RenderContext::now();
        let tone = |used| cell(&view, "utilization", &warehouse(used), &ctx).tone;
        assert_eq!(tone(95), Some(StatusColor::Red));
        assert_eq!(tone(75), Some(StatusColor::Yellow));
        assert_eq!(tone(50), Some(StatusColor::Green));
        assert_eq!(
            cell(&view, "capacity", &warehouse(95), &ctx).text,
            "95/100 units"
        );
    }

    #[test]
    fn missing_location_renders_dash() {
        let ctx = RenderContext::now();
        assert_eq!(cell(&warehouses(), "location", &warehouse(1), &ctx).text, "-");
    }

    #[test]
    fn expiry_notices() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let ctx = RenderContext { now };
        let view = batch_numbers();

        let soon = cell(&view, "expiry", &batch(12, now), &ctx);
        assert_eq!(soon.marker.as_deref(), Some("12 days left"));
        assert_eq!(soon.tone, Some(StatusColor::Yellow));

        let past = cell(&view, "expiry", &batch(-3, now), &ctx);
        assert_eq!(past.marker.as_deref(), Some("Expired"));
        assert_eq!(past.tone, Some(StatusColor::Red));

        let later = cell(&view, "expiry", &batch(45, now), &ctx);
        assert_eq!(later.marker, None);
    }

    #[test]
    fn movement_quantities_carry_their_sign() {
        let movement = |kind| StockMovement {
            id: RecordId::Numeric(1),
            product_name: None,
            kind,
            quantity: 7,
            from_location: None,
            to_location: Some("Main".into()),
            reference: None,
            user_name: None,
            timestamp: None,
        };
        let view = movements();
        let ctx = RenderContext::now();
        let out = cell(&view, "quantity", &movement(MovementKind::Out), &ctx);
        assert_eq!(out.text, "-7");
        assert_eq!(out.tone, Some(StatusColor::Red));
        assert_eq!(
            cell(&view, "quantity", &movement(MovementKind::In), &ctx).text,
            "+7"
        );
        assert_eq!(
            cell(&view, "quantity", &movement(MovementKind::Transfer), &ctx).text,
            "7"
        );
    }

    #[test]
    fn adjustment_type_is_colored() {
        let adjustment = StockAdjustment {
            id: RecordId::Numeric(2),
            product_name: Some("Mug".into()),
            kind: AdjustmentKind::Decrease,
            quantity: 3,
            reason: None,
            reference: None,
            approved_by: None,
            created_at: None,
            status: ApprovalStatus::Pending,
        };
        let row = adjustments().render_row(&adjustment, &RenderContext::now());
        assert_eq!(row[1].tone, Some(StatusColor::Red));
        assert_eq!(row[2].text, "-3");
        assert_eq!(row[4].tone, Some(StatusColor::Yellow));
    }

    #[test]
    fn empty_product_list_uses_product_texts() {
        let state = QueryState::Ready(Arc::new(Collection::<Product> {
            items: Vec::new(),
            pagination: None,
        }));
        assert_eq!(
            products(Filters::new()).render(&state),
            ViewState::Empty {
                icon: "📦",
                title: "No products found".into(),
                description: "Add products to start tracking inventory".into(),
            }
        );
    }

    #[test]
    fn every_view_has_a_loading_text() {
        let texts = [
            products(Filters::new()).render(&QueryState::Loading),
            stock_levels(Filters::new()).render(&QueryState::Loading),
        ];
        assert_eq!(
            texts[0],
            ViewState::Loading {
                text: "Loading products...".into()
            }
        );
        assert!(matches!(&texts[1], ViewState::Loading { text } if text.starts_with("Loading")));
    }
}
