//! History listing and data export handlers

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::inventory::InventoryService;
use crate::AppState;

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub format: Option<String>, // "json", "csv" or "text"
}

/// Get the recent sales history of a product.
///
/// Falls back to the plain-text listing when the CSV rendering fails.
pub async fn get_recent_history(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<impl IntoResponse> {
    let service = InventoryService::from_state(&state);
    let entries = service.recent_history(&name).await?;

    match query.format.as_deref() {
        Some("csv") => match InventoryService::history_to_csv(&entries) {
            Ok(csv) => Ok((
                [
                    (header::CONTENT_TYPE, "text/csv"),
                    (header::CONTENT_DISPOSITION, "attachment; filename=\"sales_history.csv\""),
                ],
                csv,
            )
                .into_response()),
            Err(err) => {
                tracing::warn!(product = %name, "Falling back to text history: {}", err);
                Ok(text_response(InventoryService::history_to_text(&entries)))
            }
        },
        Some("text") => Ok(text_response(InventoryService::history_to_text(&entries))),
        _ => Ok(Json(entries).into_response()),
    }
}

/// Download the whole document under the store's file name
pub async fn export_data(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = InventoryService::from_state(&state);
    let export = service.export().await?;

    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    ))
}

fn text_response(body: String) -> axum::response::Response {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}
