// Handler for LoadCsvData
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::data::csv_parser::StockCsvParser;
use crate::data::stock_store::StockStore;
use crate::error::EngineError;
use crate::services::{LoadCsvRequest, LoadCsvResponse};

pub async fn handle_load_csv_data(
    req_payload: LoadCsvRequest,
    stock_store: Arc<RwLock<StockStore>>,
    delimiter: u8,
) -> Result<LoadCsvResponse, EngineError> {
    let path = req_payload.file_path.clone();
    let items =
        tokio::task::spawn_blocking(move || StockCsvParser::load_items_from_csv(&path, delimiter))
            .await
            .map_err(|e| EngineError::ProcessingError(format!("CSV import task failed: {}", e)))?
            .map_err(EngineError::from_import)?;

    let mut store = stock_store.write().await;
    let items_loaded = store.upsert_items(items);
    tracing::info!(
        path = %req_payload.file_path,
        items_loaded,
        total_items = store.len(),
        "Stock CSV imported"
    );

    Ok(LoadCsvResponse {
        success: true,
        message: format!("Loaded {} items from {}", items_loaded, req_payload.file_path),
        items_loaded,
    })
}
