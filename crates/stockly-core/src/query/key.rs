// ── Query keys ──

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

/// Backend collections the cache knows about.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    Products,
    Categories,
    Warehouses,
    StockLevels,
    Movements,
    Adjustments,
    SerialNumbers,
    BatchNumbers,
    Analytics,
}

/// Filter parameters of a query.
///
/// Ordered, so `{a, b}` and `{b, a}` are the same key. Blank values are
/// dropped on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filters(BTreeMap<String, String>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set or clear a filter. A blank value removes the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value.trim().to_owned());
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Parse a numeric filter, ignoring garbage.
    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Filters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Self::new();
        for (k, v) in iter {
            filters.insert(k, v);
        }
        filters
    }
}

/// Identity of a cached query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    pub resource: Resource,
    pub filters: Filters,
}

impl QueryKey {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            filters: Filters::new(),
        }
    }

    pub fn with_filters(resource: Resource, filters: Filters) -> Self {
        Self { resource, filters }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource)?;
        for (i, (k, v)) in self.filters.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{k}={v}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_does_not_matter() {
        let a = Filters::new().with("status", "active").with("search", "blue");
        let b = Filters::new().with("search", "blue").with("status", "active");
        assert_eq!(
            QueryKey::with_filters(Resource::Products, a),
            QueryKey::with_filters(Resource::Products, b)
        );
    }

    #[test]
    fn blank_values_are_dropped() {
        let filters = Filters::new().with("search", "  ").with("status", "active");
        assert_eq!(filters.get("search"), None);

        let key = QueryKey::with_filters(Resource::Products, filters);
        assert_eq!(key.to_string(), "products?status=active");
    }

    #[test]
    fn clearing_a_filter_restores_the_plain_key() {
        let mut filters = Filters::new().with("warehouse", "north");
        filters.insert("warehouse", "");
        assert_eq!(
            QueryKey::with_filters(Resource::StockLevels, filters),
            QueryKey::new(Resource::StockLevels)
        );
    }
}
