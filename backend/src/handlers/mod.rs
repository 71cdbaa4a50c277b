//! HTTP handlers

pub mod health;
pub mod inventory;
pub mod reporting;

pub use health::health_check;
pub use inventory::{create_product, get_product_summary, list_products, record_sale};
pub use reporting::{export_data, get_recent_history};
