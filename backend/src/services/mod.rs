//! Business logic services for the stock advisor

pub mod inventory;
pub mod store;

pub use inventory::InventoryService;
pub use store::{JsonFileStore, LoadOutcome, StoreError};
