use std::path::Path;

use stockly_core::form::Field;
use stockly_core::format;
use stockly_core::view::views;
use stockly_core::{
    Command, CommandResult, CoreError, Filters, Inventory, Product, ProductForm, ProductPayload,
    Status,
};
use tracing::debug;

use crate::cli::{GlobalOpts, ProductFields, ProductListArgs, ProductsArgs, ProductsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(p: &Product) -> String {
    output::detail_lines(&[
        ("ID", p.id.to_string()),
        ("Name", p.name.clone()),
        ("SKU", p.sku.clone()),
        ("Category", format::or_dash(p.category.as_deref())),
        ("Description", format::or_dash(p.description.as_deref())),
        ("Price", format::currency(p.price)),
        (
            "Cost",
            p.cost.map_or_else(|| format::DASH.into(), format::currency),
        ),
        ("Stock", stock_line(p)),
        (
            "Min Stock",
            p.min_stock_level
                .map_or_else(|| format::DASH.into(), |m| m.to_string()),
        ),
        ("Status", p.status.label().to_owned()),
        ("Supplier", format::or_dash(p.supplier_name.as_deref())),
        ("Location", format::or_dash(p.location_name.as_deref())),
        ("Updated", format::optional_timestamp(p.updated_at)),
    ])
}

fn stock_line(p: &Product) -> String {
    if p.is_low_stock() {
        format!("{} ({})", p.stock_quantity, views::LOW_STOCK_MARKER)
    } else {
        p.stock_quantity.to_string()
    }
}

fn list_filters(args: &ProductListArgs, inventory: &Inventory) -> Filters {
    let limit = args.limit.unwrap_or(inventory.config().page_size);
    let mut filters = Filters::new()
        .with("page", args.page.to_string())
        .with("limit", limit.to_string());
    if let Some(ref search) = args.search {
        filters.insert("search", search.as_str());
    }
    if let Some(ref category) = args.category {
        filters.insert("category", category.as_str());
    }
    if let Some(ref status) = args.status {
        filters.insert("status", status.as_str());
    }
    filters
}

// ── Flag / file → payload ───────────────────────────────────────────

impl ProductFields {
    fn into_payload(self) -> ProductPayload {
        ProductPayload {
            name: self.name,
            sku: self.sku,
            category: self.category,
            description: self.description,
            price: self.price,
            cost: self.cost,
            stock_quantity: self.stock_quantity,
            min_stock_level: self.min_stock_level,
            status: self.status,
        }
    }
}

fn payload_from(fields: ProductFields, from_file: Option<&Path>) -> Result<ProductPayload, CliError> {
    match from_file {
        Some(path) => util::read_json_file(path),
        None => Ok(fields.into_payload()),
    }
}

/// Fill a create form from a payload so the same validation applies to
/// flags, files, and the interactive form.
fn fill_form(form: &mut ProductForm, payload: &ProductPayload) {
    let text = [
        (Field::Name, payload.name.clone()),
        (Field::Sku, payload.sku.clone()),
        (Field::Category, payload.category.clone()),
        (Field::Description, payload.description.clone()),
        (Field::Price, payload.price.map(|v| v.to_string())),
        (Field::Cost, payload.cost.map(|v| v.to_string())),
        (Field::StockQuantity, payload.stock_quantity.map(|v| v.to_string())),
        (Field::MinStockLevel, payload.min_stock_level.map(|v| v.to_string())),
        (Field::Status, payload.status.clone()),
    ];
    for (field, value) in text.into_iter().filter_map(|(f, v)| v.map(|v| (f, v))) {
        form.draft.set(field, value);
    }
}

fn print_product(product: &Product, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(global.output, product, detail, |p| p.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    inventory: &Inventory,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProductsCommand::List(list) => {
            let view = views::products(list_filters(&list, inventory));
            util::list_view(inventory, &view, global, |p: &Product| p.id.to_string()).await?;
            Ok(())
        }

        ProductsCommand::Get { id } => {
            let id = util::parse_id(&id)?;
            let product = inventory.product(&id).await.map_err(|e| match e {
                CoreError::NotFound { .. } => CliError::NotFound {
                    resource_type: "Product".into(),
                    identifier: id.to_string(),
                    list_command: "products list".into(),
                },
                other => other.into(),
            })?;
            print_product(&product, global)
        }

        ProductsCommand::Create { fields, from_file } => {
            let payload = payload_from(fields, from_file.as_deref())?;
            let mut form = ProductForm::create();
            fill_form(&mut form, &payload);
            if let Err(errors) = form.validate() {
                return Err(CliError::Validation {
                    field: errors
                        .iter()
                        .next()
                        .map_or_else(|| "input".into(), |(f, _)| f.to_string()),
                    reason: errors.to_string(),
                });
            }
            let product = form.submit(inventory).await?;
            debug!(id = %product.id, "product created");
            util::done(&format!("Created product {} ({})", product.name, product.id), global);
            print_product(&product, global)
        }

        ProductsCommand::Update {
            id,
            fields,
            from_file,
        } => {
            let id = util::parse_id(&id)?;
            let payload = payload_from(fields, from_file.as_deref())?;
            let result = inventory
                .execute(Command::UpdateProduct { id, payload })
                .await?;
            if let CommandResult::Product(product) = result {
                util::done(&format!("Updated product {}", product.id), global);
                print_product(&product, global)?;
            }
            Ok(())
        }

        ProductsCommand::Delete { id } => {
            let id = util::parse_id(&id)?;
            let confirmed = util::confirm(
                "Are you sure you want to delete this product?",
                "products delete",
                global.yes,
            )?;
            let deleted = inventory.delete_product(id.clone(), || confirmed).await?;
            if deleted {
                util::done(&format!("Deleted product {id}"), global);
            }
            Ok(())
        }
    }
}
