// Handler for ListStock
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::data::stock_store::StockStore;
use crate::services::{StockListRequest, StockListResponse};

pub async fn handle_list_stock(
    req_payload: StockListRequest,
    stock_store: Arc<RwLock<StockStore>>,
    low_stock_threshold: f64,
) -> StockListResponse {
    let store = stock_store.read().await;
    let items = if req_payload.low_stock_only {
        store.low_stock(low_stock_threshold)
    } else {
        store.list_sorted()
    };
    drop(store);

    tracing::debug!(
        low_stock_only = req_payload.low_stock_only,
        count = items.len(),
        "Listing stock"
    );
    StockListResponse { items }
}
