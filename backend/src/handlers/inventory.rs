//! HTTP handlers for product and sale endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::inventory::{
    CreateProductInput, InventoryService, ProductSelection, ProductSummary, RecordSaleInput,
    RecordedSale,
};
use crate::{local_today, AppState};

/// List product names, sorted
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<String>> {
    let service = InventoryService::from_state(&state);
    Json(service.list_products().await)
}

/// Create a product, or select it if it already exists
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<ProductSelection>)> {
    let service = InventoryService::from_state(&state);
    let selection = service.create_or_select(input, local_today()).await?;
    let status = if selection.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(selection)))
}

/// Get the stock recommendation and recent history for a product
pub async fn get_product_summary(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ProductSummary>> {
    let service = InventoryService::from_state(&state);
    let summary = service.product_summary(&name, local_today()).await?;
    Ok(Json(summary))
}

/// Record (or overwrite) the sales of one day
pub async fn record_sale(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<RecordSaleInput>,
) -> AppResult<Json<RecordedSale>> {
    let service = InventoryService::from_state(&state);
    let recorded = service.record_sale(&name, input, local_today()).await?;
    Ok(Json(recorded))
}
