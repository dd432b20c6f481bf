// Handler for ProcessReturn
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::helpers::{exceeds, QUANTITY_TOLERANCE};
use crate::data::sales_ledger::SalesLedger;
use crate::data::stock_store::StockStore;
use crate::error::EngineError;
use crate::services::{ReturnRequest, ReturnResponse};
use shared::models::ReturnEntry;
use shared::utils::brazilian_format::{format_currency, round_cents};

fn rejected(message: String) -> ReturnResponse {
    tracing::warn!(reason = %message, "Return rejected");
    ReturnResponse { success: false, message, refund: 0.0 }
}

pub async fn handle_process_return(
    req_payload: ReturnRequest,
    stock_store: Arc<RwLock<StockStore>>,
    sales_ledger: Arc<RwLock<SalesLedger>>,
) -> Result<ReturnResponse, EngineError> {
    let quantity = req_payload.quantity.normalize();
    if quantity <= 0.0 {
        return Ok(rejected("Return quantity must be greater than zero.".to_string()));
    }

    let mut store = stock_store.write().await;
    let mut ledger = sales_ledger.write().await;

    let sale = match ledger.get(&req_payload.sale_id) {
        Some(record) => &record.sale,
        None => return Ok(rejected(format!("Sale {} not found.", req_payload.sale_id))),
    };
    let sold = sale.quantity_sold(&req_payload.sku);
    if sold <= 0.0 {
        return Ok(rejected(format!(
            "SKU '{}' is not part of sale {}.",
            req_payload.sku, req_payload.sale_id
        )));
    }

    let returnable = sold - ledger.returned_quantity(&req_payload.sale_id, &req_payload.sku);
    if exceeds(quantity, returnable, QUANTITY_TOLERANCE) {
        return Ok(rejected(format!(
            "Cannot return {} of SKU '{}': only {} left to return.",
            quantity, req_payload.sku, returnable
        )));
    }

    // Same SKU on several lines refunds at the average line price; the sale
    // discount is spread proportionally.
    let line_value: f64 = sale
        .lines
        .iter()
        .filter(|l| l.sku == req_payload.sku)
        .map(|l| l.quantity * l.unit_price)
        .sum();
    let subtotal = sale.subtotal();
    let discount_ratio = if subtotal > 0.0 { sale.total / subtotal } else { 0.0 };
    let refund = round_cents(quantity * (line_value / sold) * discount_ratio);

    store.adjust_quantity(&req_payload.sku, quantity)?;
    ledger.add_return(ReturnEntry {
        id: Uuid::new_v4(),
        sale_id: req_payload.sale_id,
        sku: req_payload.sku.clone(),
        quantity,
        refund,
        returned_at: Utc::now(),
    });

    tracing::info!(
        sale_id = %req_payload.sale_id,
        sku = %req_payload.sku,
        quantity,
        refund,
        "Return processed"
    );
    Ok(ReturnResponse {
        success: true,
        message: format!(
            "Returned {} of SKU '{}'. Refund: {}",
            quantity,
            req_payload.sku,
            format_currency(refund)
        ),
        refund,
    })
}
