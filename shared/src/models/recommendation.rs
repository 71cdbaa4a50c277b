//! Stock level recommendation

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::StockPolicy;

/// Suggested stock levels derived from the daily sales average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockRecommendation {
    pub average_daily_sales: Decimal,
    pub demand_during_lead_time: Decimal,
    pub safety_stock: Decimal,
    pub optimal_stock: u64,
    pub reorder_point: u64,
}

/// Derive the recommendation for a daily sales average.
///
/// Optimal stock and reorder point currently use the same formula
/// (lead-time demand plus safety stock, rounded up). A reorder point that
/// excludes safety stock would need its own policy field.
///
/// Products beyond `Decimal::MAX` saturate, and so does a target beyond
/// `u64::MAX` units.
pub fn recommend_stock(average_daily_sales: Decimal, policy: &StockPolicy) -> StockRecommendation {
    let demand_during_lead_time = saturating_mul(average_daily_sales, policy.lead_time_days);
    let safety_stock = saturating_mul(average_daily_sales, policy.safety_days);
    let target = units_to_hold(
        demand_during_lead_time
            .checked_add(safety_stock)
            .unwrap_or(Decimal::MAX),
    );

    StockRecommendation {
        average_daily_sales,
        demand_during_lead_time,
        safety_stock,
        optimal_stock: target,
        reorder_point: target,
    }
}

fn saturating_mul(average: Decimal, days: u32) -> Decimal {
    average.checked_mul(Decimal::from(days)).unwrap_or(Decimal::MAX)
}

fn units_to_hold(quantity: Decimal) -> u64 {
    if quantity <= Decimal::ZERO {
        return 0;
    }
    quantity.ceil().to_u64().unwrap_or(u64::MAX)
}
