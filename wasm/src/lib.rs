//! WebAssembly module for the stock advisor
//!
//! Provides client-side computation for:
//! - Trailing daily sales average
//! - Stock recommendation
//! - Product name validation

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Mean daily sales for a `ventas_historico` array.
///
/// Malformed entries are skipped; a value that is not an array yields 0.
#[wasm_bindgen]
pub fn average_daily_sales(history_json: &str, window_days: u32, today: &str) -> Result<f64, JsValue> {
    let today = parse_sale_date(today)
        .ok_or_else(|| JsValue::from_str("Invalid date, expected YYYY-MM-DD"))?;
    let history = parse_history(history_json)?;

    Ok(to_f64(shared::average_daily_sales(&history, window_days, today)))
}

/// Same as [`average_daily_sales`], using the browser's current date
#[wasm_bindgen]
pub fn average_daily_sales_today(history_json: &str, window_days: u32) -> Result<f64, JsValue> {
    let now = js_sys::Date::new_0();
    let today = NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .ok_or_else(|| JsValue::from_str("Browser returned an invalid date"))?;

    let history = parse_history(history_json)?;
    Ok(to_f64(shared::average_daily_sales(&history, window_days, today)))
}

/// Stock recommendation for a daily average, as a JSON string
#[wasm_bindgen]
pub fn recommend_stock(average: f64, lead_time_days: u32, safety_days: u32) -> Result<String, JsValue> {
    if !average.is_finite() || average < 0.0 {
        return Err(JsValue::from_str("Average must be a non-negative number"));
    }
    let average = Decimal::try_from(average)
        .map_err(|_| JsValue::from_str("Average is too large to compute a recommendation"))?;
    let policy = StockPolicy {
        lead_time_days,
        safety_days,
        ..StockPolicy::default()
    };

    let recommendation = shared::recommend_stock(average, &policy);
    serde_json::to_string(&recommendation)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Check a product name before submitting the create form
#[wasm_bindgen(js_name = validateProductName)]
pub fn is_valid_product_name(name: &str) -> bool {
    validate_product_name(name).is_ok()
}

fn parse_history(history_json: &str) -> Result<Vec<SaleEntry>, JsValue> {
    let value: serde_json::Value = serde_json::from_str(history_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid history JSON: {}", e)))?;

    let history: Vec<SaleEntry> = value
        .as_array()
        .map(|entries| entries.iter().filter_map(SaleEntry::from_value).collect())
        .unwrap_or_default();

    #[cfg(target_arch = "wasm32")]
    {
        let skipped = value.as_array().map_or(0, |entries| entries.len() - history.len());
        if skipped > 0 {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "Skipped {} malformed sale entries",
                skipped
            )));
        }
    }

    Ok(history)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
