// ── Product form ──
//
// A local draft bound to text inputs. Validation turns the draft into a
// typed payload or a set of per-field messages; submission never clears
// the draft, so a failed request can be retried as-is.

use std::fmt;

use indexmap::IndexMap;
use stockly_api::types::ProductPayload;
use strum::{AsRefStr, Display, EnumIter};

use crate::command::{Command, CommandResult};
use crate::error::CoreError;
use crate::inventory::Inventory;
use crate::model::{Product, ProductStatus, RecordId};

/// Category choices offered by the form, as `(value, label)`.
pub const CATEGORY_OPTIONS: &[(&str, &str)] = &[
    ("electronics", "Electronics"),
    ("clothing", "Clothing"),
    ("books", "Books"),
    ("home", "Home & Garden"),
    ("sports", "Sports & Outdoors"),
    ("automotive", "Automotive"),
    ("beauty", "Beauty & Health"),
    ("toys", "Toys & Games"),
];

/// Status choices offered by the form.
pub const STATUS_OPTIONS: &[(&str, &str)] = &[("active", "Active"), ("inactive", "Inactive")];

/// Form inputs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Name,
    Sku,
    Category,
    Description,
    Price,
    Cost,
    StockQuantity,
    MinStockLevel,
    Status,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Product Name",
            Self::Sku => "SKU",
            Self::Category => "Category",
            Self::Description => "Description",
            Self::Price => "Price",
            Self::Cost => "Cost",
            Self::StockQuantity => "Stock Quantity",
            Self::MinStockLevel => "Min Stock Level",
            Self::Status => "Status",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            Self::Name | Self::Sku | Self::Category | Self::Price | Self::StockQuantity
        )
    }
}

/// Raw text as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub cost: String,
    pub stock_quantity: String,
    pub min_stock_level: String,
    pub status: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            sku: String::new(),
            category: String::new(),
            description: String::new(),
            price: "0".into(),
            cost: String::new(),
            stock_quantity: "0".into(),
            min_stock_level: String::new(),
            status: "active".into(),
        }
    }
}

impl ProductDraft {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            sku: product.sku.clone(),
            category: product.category.clone().unwrap_or_default(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            cost: product.cost.map(|c| c.to_string()).unwrap_or_default(),
            stock_quantity: product.stock_quantity.to_string(),
            min_stock_level: product
                .min_stock_level
                .map(|m| m.to_string())
                .unwrap_or_default(),
            status: product.status.to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Sku => &self.sku,
            Field::Category => &self.category,
            Field::Description => &self.description,
            Field::Price => &self.price,
            Field::Cost => &self.cost,
            Field::StockQuantity => &self.stock_quantity,
            Field::MinStockLevel => &self.min_stock_level,
            Field::Status => &self.status,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Sku => &mut self.sku,
            Field::Category => &mut self.category,
            Field::Description => &mut self.description,
            Field::Price => &mut self.price,
            Field::Cost => &mut self.cost,
            Field::StockQuantity => &mut self.stock_quantity,
            Field::MinStockLevel => &mut self.min_stock_level,
            Field::Status => &mut self.status,
        };
        *slot = value.into();
    }
}

/// Per-field validation messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(IndexMap<Field, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }

    fn push(&mut self, field: Field, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProduct(ProductPayload);

impl ValidProduct {
    pub fn payload(&self) -> &ProductPayload {
        &self.0
    }

    pub fn into_payload(self) -> ProductPayload {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    mode: FormMode,
    pub draft: ProductDraft,
}

impl ProductForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: ProductDraft::default(),
        }
    }

    pub fn edit(product: &Product) -> Self {
        Self {
            mode: FormMode::Edit(product.id.clone()),
            draft: ProductDraft::from_product(product),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add New Product",
            FormMode::Edit(_) => "Edit Product",
        }
    }

    pub fn validate(&self) -> Result<ValidProduct, FieldErrors> {
        let d = &self.draft;
        let mut errors = FieldErrors::default();

        let name = required(&d.name);
        if name.is_none() {
            errors.push(Field::Name, "Product name is required");
        }
        let sku = required(&d.sku);
        if sku.is_none() {
            errors.push(Field::Sku, "SKU is required");
        }
        let category = required(&d.category);
        if category.is_none() {
            errors.push(Field::Category, "Category is required");
        }

        let price = amount(&d.price);
        if !matches!(price, Ok(Some(_))) {
            errors.push(Field::Price, "Price must be positive");
        }
        let cost = amount(&d.cost);
        if cost.is_err() {
            errors.push(Field::Cost, "Cost must be positive");
        }
        let stock_quantity = non_negative::<i64>(&d.stock_quantity);
        match stock_quantity {
            Ok(Some(_)) => {}
            Ok(None) => errors.push(Field::StockQuantity, "Stock quantity is required"),
            Err(()) => errors.push(Field::StockQuantity, "Stock quantity must be non-negative"),
        }
        let min_stock_level = non_negative::<i64>(&d.min_stock_level);
        if min_stock_level.is_err() {
            errors.push(Field::MinStockLevel, "Min stock level must be non-negative");
        }

        let status = match d.status.trim() {
            "" => Some(ProductStatus::Active),
            s => match s.parse::<ProductStatus>() {
                Ok(st @ (ProductStatus::Active | ProductStatus::Inactive)) => Some(st),
                _ => None,
            },
        };
        if status.is_none() {
            errors.push(Field::Status, "Status must be active or inactive");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidProduct(ProductPayload {
            name: name.map(str::to_owned),
            sku: sku.map(str::to_owned),
            category: category.map(str::to_owned),
            description: required(&d.description).map(str::to_owned),
            price: price.ok().flatten(),
            cost: cost.ok().flatten(),
            stock_quantity: stock_quantity.ok().flatten(),
            min_stock_level: min_stock_level.ok().flatten(),
            status: status.map(|s| s.to_string()),
        }))
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    /// Create or update depending on the mode. The draft is left as-is
    /// whatever the outcome.
    pub async fn submit(&self, inventory: &Inventory) -> Result<Product, CoreError> {
        let payload = self
            .validate()
            .map_err(|errors| CoreError::validation(errors.to_string()))?
            .into_payload();
        let cmd = match &self.mode {
            FormMode::Create => Command::CreateProduct(payload),
            FormMode::Edit(id) => Command::UpdateProduct {
                id: id.clone(),
                payload,
            },
        };
        match inventory.execute(cmd).await? {
            CommandResult::Product(product) => Ok(product),
            other => Err(CoreError::Internal(format!(
                "unexpected result from product submit: {other:?}"
            ))),
        }
    }
}

fn required(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// A money amount: like [`non_negative`], and `inf` or overflow such as
/// `1e400` is rejected too.
fn amount(value: &str) -> Result<Option<f64>, ()> {
    match non_negative::<f64>(value)? {
        Some(n) if !n.is_finite() => Err(()),
        n => Ok(n),
    }
}

/// `Ok(None)` for blank input, `Err` for unparsable or negative input.
fn non_negative<N>(value: &str) -> Result<Option<N>, ()>
where
    N: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = required(value) else {
        return Ok(None);
    };
    match raw.parse::<N>() {
        Ok(n) if n >= N::default() => Ok(Some(n)),
        _ => Err(()),
    }
}
