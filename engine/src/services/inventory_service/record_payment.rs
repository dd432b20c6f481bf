// Handler for RecordPayment
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::helpers::{exceeds, CENT_TOLERANCE};
use crate::data::sales_ledger::SalesLedger;
use crate::services::{PaymentRequest, PaymentResponse};
use shared::models::Payment;
use shared::utils::brazilian_format::{format_currency, round_cents};

fn rejected(message: String, balance: f64) -> PaymentResponse {
    tracing::warn!(reason = %message, "Payment rejected");
    PaymentResponse { success: false, message, payment_id: None, balance }
}

pub async fn handle_record_payment(
    req_payload: PaymentRequest,
    sales_ledger: Arc<RwLock<SalesLedger>>,
) -> PaymentResponse {
    let amount = round_cents(req_payload.amount.normalize());

    let mut ledger = sales_ledger.write().await;
    let balance = match ledger.balance(&req_payload.sale_id) {
        Some(balance) => round_cents(balance),
        None => return rejected(format!("Sale {} not found.", req_payload.sale_id), 0.0),
    };

    if amount <= 0.0 {
        return rejected("Payment amount must be greater than zero.".to_string(), balance);
    }
    if exceeds(amount, balance, CENT_TOLERANCE) {
        return rejected(
            format!(
                "Payment of {} exceeds the outstanding balance of {}.",
                format_currency(amount),
                format_currency(balance)
            ),
            balance,
        );
    }

    let payment = Payment {
        id: Uuid::new_v4(),
        sale_id: req_payload.sale_id,
        amount,
        method: req_payload.method,
        paid_at: Utc::now(),
    };
    let payment_id = payment.id;
    ledger.add_payment(payment);
    let balance = round_cents(balance - amount);

    tracing::info!(
        sale_id = %req_payload.sale_id,
        %payment_id,
        amount,
        balance,
        method = ?req_payload.method,
        "Payment recorded"
    );
    PaymentResponse {
        success: true,
        message: format!(
            "Payment of {} recorded. Balance: {}",
            format_currency(amount),
            format_currency(balance)
        ),
        payment_id: Some(payment_id),
        balance,
    }
}
