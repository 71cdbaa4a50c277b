//! Domain models for the stock advisor

mod document;
mod product;
mod recommendation;
mod sales;

pub use document::*;
pub use product::*;
pub use recommendation::*;
pub use sales::*;
