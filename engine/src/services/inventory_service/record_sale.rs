// Handler for RecordSale
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::helpers::{accumulate, exceeds, CENT_TOLERANCE, QUANTITY_TOLERANCE};
use crate::data::sales_ledger::SalesLedger;
use crate::data::stock_store::StockStore;
use crate::error::EngineError;
use crate::services::{SaleRequest, SaleResponse};
use shared::models::{Sale, SaleLine};
use shared::utils::brazilian_format::{format_currency, round_cents};

fn rejected(message: String) -> SaleResponse {
    tracing::warn!(reason = %message, "Sale rejected");
    SaleResponse { success: false, message, sale: None }
}

pub async fn handle_record_sale(
    req_payload: SaleRequest,
    stock_store: Arc<RwLock<StockStore>>,
    sales_ledger: Arc<RwLock<SalesLedger>>,
    allow_negative_stock: bool,
) -> Result<SaleResponse, EngineError> {
    if req_payload.lines.is_empty() {
        return Ok(rejected("A sale needs at least one line.".to_string()));
    }

    // Lock order is always stock, then ledger.
    let mut store = stock_store.write().await;

    let mut lines = Vec::with_capacity(req_payload.lines.len());
    let mut requested: Vec<(&str, f64)> = Vec::new();
    for line in &req_payload.lines {
        let item = match store.get(&line.sku) {
            Some(item) => item,
            None => return Ok(rejected(format!("Unknown SKU '{}'.", line.sku))),
        };

        let quantity = line.quantity.normalize();
        if quantity <= 0.0 {
            return Ok(rejected(format!(
                "Quantity for SKU '{}' must be greater than zero.",
                line.sku
            )));
        }
        let unit_price = if line.unit_price.is_blank() {
            item.price
        } else {
            line.unit_price.normalize()
        };
        if unit_price < 0.0 {
            return Ok(rejected(format!("Unit price for SKU '{}' cannot be negative.", line.sku)));
        }

        accumulate(&mut requested, &line.sku, quantity);
        lines.push(SaleLine { sku: line.sku.clone(), quantity, unit_price });
    }

    if !allow_negative_stock {
        for (sku, quantity) in &requested {
            let available = store.get(sku).map_or(0.0, |item| item.quantity);
            if exceeds(*quantity, available, QUANTITY_TOLERANCE) {
                return Ok(rejected(format!(
                    "Insufficient stock for SKU '{}': requested {}, available {}.",
                    sku, quantity, available
                )));
            }
        }
    }

    let subtotal: f64 = lines.iter().map(|l| l.quantity * l.unit_price).sum();
    let discount = req_payload.discount.normalize();
    if discount < 0.0 || exceeds(discount, subtotal, CENT_TOLERANCE) {
        return Ok(rejected(format!(
            "Discount of {} must be between zero and the subtotal of {}.",
            format_currency(discount),
            format_currency(subtotal)
        )));
    }

    // Every check passed; nothing below may reject.
    for (sku, quantity) in &requested {
        store.adjust_quantity(sku, -quantity)?;
    }

    let sale = Sale {
        id: Uuid::new_v4(),
        customer: req_payload.customer.clone(),
        created_at: Utc::now(),
        lines,
        discount: round_cents(discount),
        total: round_cents(subtotal - discount),
    };

    let mut ledger = sales_ledger.write().await;
    ledger.insert_sale(sale.clone());
    drop(ledger);
    drop(store);

    tracing::info!(
        sale_id = %sale.id,
        lines = sale.lines.len(),
        total = sale.total,
        "Sale recorded"
    );
    Ok(SaleResponse {
        success: true,
        message: format!("Sale {} recorded: {}", sale.id, format_currency(sale.total)),
        sale: Some(sale),
    })
}
