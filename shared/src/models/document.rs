//! The persisted product-sales document

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::ProductRecord;
use crate::types::days_before;

/// Errors raised while reading a document from JSON
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("top-level JSON value must be an object keyed by product name")]
    NotAnObject,
}

/// What the load boundary had to discard or repair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub products: usize,
    pub dropped_entries: usize,
    pub reset_histories: usize,
    pub skipped_names: usize,
}

/// Mapping from product name to its sales record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    products: BTreeMap<String, ProductRecord>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the persisted JSON text.
    ///
    /// Empty or whitespace-only content is an empty document.
    pub fn from_json_str(content: &str) -> Result<(Self, LoadReport), DocumentError> {
        if content.trim().is_empty() {
            return Ok((Self::default(), LoadReport::default()));
        }

        let value: Value = serde_json::from_str(content)?;
        Self::from_value(&value)
    }

    /// Map a loosely-typed JSON value onto typed records.
    ///
    /// Products with a malformed history get an empty one; malformed sale
    /// entries are dropped. Blank product names are skipped.
    pub fn from_value(value: &Value) -> Result<(Self, LoadReport), DocumentError> {
        let Value::Object(map) = value else {
            return Err(DocumentError::NotAnObject);
        };

        let mut report = LoadReport::default();
        let mut products = BTreeMap::new();

        for (name, product) in map {
            if name.trim().is_empty() {
                report.skipped_names += 1;
                continue;
            }

            let (record, dropped, reset) = ProductRecord::from_value(product);
            report.dropped_entries += dropped;
            if reset {
                report.reset_histories += 1;
            }
            products.insert(name.clone(), record);
        }

        report.products = products.len();
        Ok((Self { products }, report))
    }

    /// Serialize with 4-space indentation, non-ASCII left unescaped
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(buffer).map_err(serde::ser::Error::custom)
    }

    /// Prune entries older than `today - retention_days` and sort every
    /// history newest first. Future dates are kept.
    ///
    /// Returns the number of pruned entries.
    pub fn normalize(&mut self, today: NaiveDate, retention_days: u32) -> usize {
        let cutoff = days_before(today, retention_days);

        self.products
            .values_mut()
            .map(|record| {
                let pruned = record.prune_before(cutoff);
                record.sort_newest_first();
                pruned
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.products.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ProductRecord> {
        self.products.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ProductRecord> {
        self.products.get_mut(name)
    }

    /// Register a product with an empty history.
    ///
    /// Returns `false` if the name already existed.
    pub fn register_product(&mut self, name: &str) -> bool {
        if self.products.contains_key(name) {
            return false;
        }
        self.products.insert(name.to_string(), ProductRecord::new());
        true
    }

    pub fn insert_product(&mut self, name: String, record: ProductRecord) -> Option<ProductRecord> {
        self.products.insert(name, record)
    }

    pub fn remove_product(&mut self, name: &str) -> Option<ProductRecord> {
        self.products.remove(name)
    }

    /// Product names in ascending order
    pub fn product_names(&self) -> Vec<String> {
        self.products.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ProductRecord)> {
        self.products.iter()
    }
}
