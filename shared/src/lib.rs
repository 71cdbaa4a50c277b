//! Shared types and models for the stock advisor
//!
//! This crate contains the sales data model and the stock calculations shared
//! between the backend server and the browser bindings (via WASM).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
