// ── Product catalog domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::record_id::RecordId;
use crate::status::{Status, StatusKind};

/// Catalog lifecycle of a product.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProductStatus {
    Active,
    Inactive,
    Discontinued,
    #[default]
    Unknown,
}

impl Status for ProductStatus {
    fn kind(&self) -> StatusKind {
        match self {
            Self::Active => StatusKind::Active,
            Self::Inactive => StatusKind::Inactive,
            Self::Discontinued => StatusKind::Discontinued,
            Self::Unknown => StatusKind::Unknown,
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub cost: Option<f64>,
    pub stock_quantity: i64,
    pub min_stock_level: Option<i64>,
    pub status: ProductStatus,
    pub supplier_name: Option<String>,
    pub location_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// `stock_quantity <= min_stock_level`; never true without a threshold.
    pub fn is_low_stock(&self) -> bool {
        self.min_stock_level
            .is_some_and(|min| self.stock_quantity <= min)
    }

    /// Unit margin, when the cost is known.
    pub fn margin(&self) -> Option<f64> {
        self.cost.map(|cost| self.price - cost)
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub product_count: u64,
    pub parent_category: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: i64, min: Option<i64>) -> Product {
        Product {
            id: RecordId::Numeric(1),
            sku: "SKU-1".into(),
            name: "Widget".into(),
            description: None,
            category: None,
            price: 10.0,
            cost: Some(4.0),
            stock_quantity: quantity,
            min_stock_level: min,
            status: ProductStatus::Active,
            supplier_name: None,
            location_name: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn low_stock_is_inclusive_at_threshold() {
        assert!(product(5, Some(5)).is_low_stock());
        assert!(product(0, Some(5)).is_low_stock());
        assert!(!product(6, Some(5)).is_low_stock());
    }

    #[test]
    fn no_threshold_means_never_low() {
        assert!(!product(0, None).is_low_stock());
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Active".parse::<ProductStatus>().ok(), Some(ProductStatus::Active));
        assert_eq!(
            "DISCONTINUED".parse::<ProductStatus>().ok(),
            Some(ProductStatus::Discontinued)
        );
    }
}
