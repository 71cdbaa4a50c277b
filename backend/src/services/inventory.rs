//! Inventory service: product registration, sale recording and stock summaries

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    average_daily_sales, recommend_stock, validate_product_name, validate_sale_date,
    validate_sale_quantity, Document, ProductRecord, SaleEntry, SaleOutcome, StockPolicy,
    StockRecommendation,
};
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::services::store::JsonFileStore;

/// Inventory service operating on the shared in-memory document
#[derive(Clone)]
pub struct InventoryService {
    store: JsonFileStore,
    document: Arc<Mutex<Document>>,
    policy: StockPolicy,
}

/// Input for registering (or selecting) a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
}

/// The product the caller should now have selected
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductSelection {
    pub name: String,
    /// `false` when the name already existed and was simply selected
    pub created: bool,
}

/// Input for recording a day's sales
#[derive(Debug, Deserialize)]
pub struct RecordSaleInput {
    /// `YYYY-MM-DD`; defaults to today
    pub date: Option<String>,
    pub quantity: i64,
}

/// Stock figures and recent history for one product
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub name: String,
    pub average_window_days: u32,
    pub lead_time_days: u32,
    pub safety_days: u32,
    pub recommendation: StockRecommendation,
    pub total_entries: usize,
    pub recent_history: Vec<SaleEntry>,
}

/// Result of a sale submission
#[derive(Debug, Clone, Serialize)]
pub struct RecordedSale {
    pub date: NaiveDate,
    pub quantity: Decimal,
    pub outcome: SaleOutcome,
    pub summary: ProductSummary,
}

/// The full document prepared for download
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub content: String,
}

/// One row of the history table export
#[derive(Debug, Serialize)]
struct HistoryRow {
    fecha: NaiveDate,
    cantidad: Decimal,
}

impl InventoryService {
    pub fn new(store: JsonFileStore, document: Arc<Mutex<Document>>, policy: StockPolicy) -> Self {
        Self {
            store,
            document,
            policy,
        }
    }

    pub fn from_state(state: &crate::AppState) -> Self {
        Self::new(state.store.clone(), state.document.clone(), state.config.stock)
    }

    /// Product names in ascending order
    pub async fn list_products(&self) -> Vec<String> {
        self.document.lock().await.product_names()
    }

    /// Register a new product, or select it if the name already exists.
    ///
    /// A new product is removed again if it cannot be persisted.
    pub async fn create_or_select(
        &self,
        input: CreateProductInput,
        today: NaiveDate,
    ) -> AppResult<ProductSelection> {
        let name = validate_product_name(&input.name).map_err(|msg| {
            AppError::validation("name", msg, "El nombre del producto no es válido")
        })?;

        let mut document = self.document.lock().await;
        if !document.register_product(name) {
            tracing::debug!(product = name, "Product already exists, selecting it");
            return Ok(ProductSelection {
                name: name.to_string(),
                created: false,
            });
        }

        if let Err(err) = self.store.save(&mut document, today).await {
            document.remove_product(name);
            tracing::warn!(product = name, "Rolled back product creation: {}", err);
            return Err(err.into());
        }

        tracing::info!(product = name, "Product created");
        Ok(ProductSelection {
            name: name.to_string(),
            created: true,
        })
    }

    /// Record the quantity sold on a date and persist the document.
    ///
    /// A date that already has an entry gets its quantity replaced. The
    /// product's previous history is restored if the save fails.
    pub async fn record_sale(
        &self,
        product: &str,
        input: RecordSaleInput,
        today: NaiveDate,
    ) -> AppResult<RecordedSale> {
        let date = match input.date.as_deref() {
            Some(raw) => validate_sale_date(raw).map_err(|msg| {
                AppError::validation("date", msg, "La fecha debe tener el formato AAAA-MM-DD")
            })?,
            None => today,
        };
        let quantity = validate_sale_quantity(input.quantity).map_err(|msg| {
            AppError::validation("quantity", msg, "La cantidad no puede ser negativa")
        })?;
        let quantity = Decimal::from(quantity);

        let mut document = self.document.lock().await;
        let record = document
            .get_mut(product)
            .ok_or_else(|| AppError::NotFound(format!("Product '{}'", product)))?;

        let snapshot = record.clone();
        let outcome = record.record_sale(date, quantity);

        if let Err(err) = self.store.save(&mut document, today).await {
            document.insert_product(product.to_string(), snapshot);
            tracing::warn!(product, %date, "Rolled back sale: {}", err);
            return Err(err.into());
        }

        match outcome {
            SaleOutcome::Added => tracing::info!(product, %date, %quantity, "Sale added"),
            SaleOutcome::Updated { previous } => {
                tracing::info!(product, %date, %previous, %quantity, "Sale updated")
            }
            SaleOutcome::Unchanged => tracing::info!(product, %date, "Sale already recorded"),
        }

        let record = document
            .get(product)
            .ok_or_else(|| AppError::NotFound(format!("Product '{}'", product)))?;
        let summary = self.summarize(product, record, today);
        Ok(RecordedSale {
            date,
            quantity,
            outcome,
            summary,
        })
    }

    /// Average, recommendation and recent history for a product
    pub async fn product_summary(&self, product: &str, today: NaiveDate) -> AppResult<ProductSummary> {
        let document = self.document.lock().await;
        let record = document
            .get(product)
            .ok_or_else(|| AppError::NotFound(format!("Product '{}'", product)))?;
        Ok(self.summarize(product, record, today))
    }

    /// The newest entries of a product's history, newest first
    pub async fn recent_history(&self, product: &str) -> AppResult<Vec<SaleEntry>> {
        let document = self.document.lock().await;
        let record = document
            .get(product)
            .ok_or_else(|| AppError::NotFound(format!("Product '{}'", product)))?;
        Ok(record.recent(self.policy.recent_history_limit))
    }

    /// The whole in-memory document in its persisted JSON shape
    pub async fn export(&self) -> AppResult<ExportFile> {
        let document = self.document.lock().await;
        if document.is_empty() {
            return Err(AppError::NothingToExport);
        }

        let content = document
            .to_pretty_json()
            .map_err(|e| AppError::Internal(format!("Could not prepare download: {}", e)))?;

        Ok(ExportFile {
            file_name: self.store.file_name(),
            content,
        })
    }

    /// Render history rows as CSV with `fecha,cantidad` headers
    pub fn history_to_csv(entries: &[SaleEntry]) -> AppResult<String> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        wtr.write_record(["fecha", "cantidad"])
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        for entry in entries {
            wtr.serialize(HistoryRow {
                fecha: entry.date,
                cantidad: entry.quantity,
            })
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }

    /// Plain-text listing, one `YYYY-MM-DD: N uds` line per entry
    pub fn history_to_text(entries: &[SaleEntry]) -> String {
        entries
            .iter()
            .map(|entry| format!("{}: {} uds", entry.date, entry.quantity))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn summarize(&self, name: &str, record: &ProductRecord, today: NaiveDate) -> ProductSummary {
        let average = average_daily_sales(&record.sales_history, self.policy.average_window_days, today);

        ProductSummary {
            name: name.to_string(),
            average_window_days: self.policy.average_window_days,
            lead_time_days: self.policy.lead_time_days,
            safety_days: self.policy.safety_days,
            recommendation: recommend_stock(average, &self.policy),
            total_entries: record.sales_history.len(),
            recent_history: record.recent(self.policy.recent_history_limit),
        }
    }
}
