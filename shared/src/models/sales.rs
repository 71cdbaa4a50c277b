//! Trailing-window sales average

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::SaleEntry;
use crate::types::DateRange;

/// Mean daily sales over the trailing `window_days` ending on `today`.
///
/// Quantities dated inside `[today - window_days, today]` are summed. The
/// divisor is the number of days since the first recorded sale (counting
/// today), capped at `window_days` and never below 1, so products with a
/// short history are not diluted by a full-length window. The first sale is
/// taken over the whole history, not just the window.
///
/// A window total beyond `Decimal::MAX` saturates instead of overflowing.
pub fn average_daily_sales(history: &[SaleEntry], window_days: u32, today: NaiveDate) -> Decimal {
    let Some(first_sale) = history.iter().map(|entry| entry.date).min() else {
        return Decimal::ZERO;
    };

    let window = DateRange::trailing(today, window_days);
    let total = history
        .iter()
        .filter(|entry| window.contains(entry.date))
        .fold(Decimal::ZERO, |total, entry| {
            total.checked_add(entry.quantity).unwrap_or(Decimal::MAX)
        });

    let span_days = (today - first_sale).num_days() + 1;
    let denominator = span_days.min(i64::from(window_days)).max(1);

    total / Decimal::from(denominator)
}
