//! Product and sales history models

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::validation::parse_sale_date;

/// A single day's sales for one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleEntry {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    /// Units sold; never negative
    #[serde(rename = "cantidad", serialize_with = "serialize_quantity")]
    pub quantity: Decimal,
}

impl SaleEntry {
    pub fn new(date: NaiveDate, quantity: Decimal) -> Self {
        Self { date, quantity }
    }

    /// Build an entry from a loosely-typed JSON object.
    ///
    /// Returns `None` when the object has no 10-character `YYYY-MM-DD` date
    /// or its quantity is missing, non-numeric or negative.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let date = object.get("fecha")?.as_str().and_then(parse_sale_date)?;
        let quantity = quantity_from_value(object.get("cantidad")?)?;
        Some(Self { date, quantity })
    }
}

/// Sales history of one product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    #[serde(rename = "ventas_historico")]
    pub sales_history: Vec<SaleEntry>,
}

/// What happened when a sale was submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaleOutcome {
    /// No entry existed for the date
    Added,
    /// The date's quantity was replaced
    Updated { previous: Decimal },
    /// Same quantity was already recorded for the date
    Unchanged,
}

impl ProductRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from the loosely-typed product value.
    ///
    /// Returns the record, the number of dropped entries, and whether the
    /// history container itself was unusable and had to be reset.
    pub fn from_value(value: &Value) -> (Self, usize, bool) {
        let Some(history) = value.get("ventas_historico").and_then(Value::as_array) else {
            return (Self::default(), 0, true);
        };

        let sales_history: Vec<SaleEntry> =
            history.iter().filter_map(SaleEntry::from_value).collect();
        let dropped = history.len() - sales_history.len();

        (Self { sales_history }, dropped, false)
    }

    /// Record a sale, one entry per calendar date.
    ///
    /// Resubmitting a date replaces its quantity instead of appending.
    pub fn record_sale(&mut self, date: NaiveDate, quantity: Decimal) -> SaleOutcome {
        match self.sales_history.iter_mut().find(|entry| entry.date == date) {
            Some(entry) if entry.quantity == quantity => SaleOutcome::Unchanged,
            Some(entry) => {
                let previous = entry.quantity;
                entry.quantity = quantity;
                SaleOutcome::Updated { previous }
            }
            None => {
                self.sales_history.push(SaleEntry::new(date, quantity));
                self.sort_newest_first();
                SaleOutcome::Added
            }
        }
    }

    /// Sort the history descending by date
    pub fn sort_newest_first(&mut self) {
        self.sales_history.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// Drop entries dated before `cutoff`, returning how many were removed
    pub fn prune_before(&mut self, cutoff: NaiveDate) -> usize {
        let before = self.sales_history.len();
        self.sales_history.retain(|entry| entry.date >= cutoff);
        before - self.sales_history.len()
    }

    /// The `limit` newest entries, newest first
    pub fn recent(&self, limit: usize) -> Vec<SaleEntry> {
        let mut entries = self.sales_history.clone();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries.truncate(limit);
        entries
    }
}

/// Coerce a JSON number into a non-negative quantity
fn quantity_from_value(value: &Value) -> Option<Decimal> {
    let Value::Number(number) = value else {
        return None;
    };

    let quantity = if let Some(units) = number.as_u64() {
        Decimal::from(units)
    } else if let Some(units) = number.as_i64() {
        Decimal::from(units)
    } else {
        Decimal::try_from(number.as_f64()?).ok()?
    };

    (quantity >= Decimal::ZERO).then_some(quantity)
}

/// Whole quantities are written as JSON integers, fractional ones as floats
fn serialize_quantity<S: Serializer>(quantity: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    if quantity.fract().is_zero() {
        if let Some(units) = quantity.to_u64() {
            return serializer.serialize_u64(units);
        }
    }

    match quantity.to_f64() {
        Some(value) => serializer.serialize_f64(value),
        None => Err(serde::ser::Error::custom(format!(
            "quantity {} is not representable as a JSON number",
            quantity
        ))),
    }
}
