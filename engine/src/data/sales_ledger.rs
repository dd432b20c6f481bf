// Sales with their payments and returns
use shared::models::{Payment, ReturnEntry, Sale};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SaleRecord {
    pub sale: Sale,
    pub payments: Vec<Payment>,
    pub returns: Vec<ReturnEntry>,
}

pub struct SalesLedger {
    records: HashMap<Uuid, SaleRecord>,
}

impl SalesLedger {
    pub fn new() -> Self {
        SalesLedger {
            records: HashMap::new(),
        }
    }

    pub fn insert_sale(&mut self, sale: Sale) {
        self.records.insert(
            sale.id,
            SaleRecord {
                sale,
                payments: Vec::new(),
                returns: Vec::new(),
            },
        );
    }

    pub fn get(&self, sale_id: &Uuid) -> Option<&SaleRecord> {
        self.records.get(sale_id)
    }

    /// Returns false when the sale is unknown.
    pub fn add_payment(&mut self, payment: Payment) -> bool {
        match self.records.get_mut(&payment.sale_id) {
            Some(record) => {
                record.payments.push(payment);
                true
            }
            None => false,
        }
    }

    /// Returns false when the sale is unknown.
    pub fn add_return(&mut self, entry: ReturnEntry) -> bool {
        match self.records.get_mut(&entry.sale_id) {
            Some(record) => {
                record.returns.push(entry);
                true
            }
            None => false,
        }
    }

    pub fn amount_paid(&self, sale_id: &Uuid) -> Option<f64> {
        self.records
            .get(sale_id)
            .map(|r| r.payments.iter().map(|p| p.amount).sum())
    }

    /// Sale total minus payments and refunds. Negative when the customer is owed money.
    pub fn balance(&self, sale_id: &Uuid) -> Option<f64> {
        self.records.get(sale_id).map(|r| {
            let paid: f64 = r.payments.iter().map(|p| p.amount).sum();
            let refunded: f64 = r.returns.iter().map(|e| e.refund).sum();
            r.sale.total - refunded - paid
        })
    }

    pub fn returned_quantity(&self, sale_id: &Uuid, sku: &str) -> f64 {
        self.records
            .get(sale_id)
            .map(|r| r.returns.iter().filter(|e| e.sku == sku).map(|e| e.quantity).sum())
            .unwrap_or(0.0)
    }
}

impl Default for SalesLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::{PaymentMethod, SaleLine};

    fn sample_sale(total: f64) -> Sale {
        Sale {
            id: Uuid::new_v4(),
            customer: Some("Maria".to_string()),
            created_at: Utc::now(),
            lines: vec![SaleLine { sku: "H1".to_string(), quantity: 2.0, unit_price: total / 2.0 }],
            discount: 0.0,
            total,
        }
    }

    fn payment(sale_id: Uuid, amount: f64) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            sale_id,
            amount,
            method: PaymentMethod::Pix,
            paid_at: Utc::now(),
        }
    }

    #[test]
    fn test_balance_tracks_payments_and_refunds() {
        let mut ledger = SalesLedger::new();
        let sale = sample_sale(100.0);
        let id = sale.id;
        ledger.insert_sale(sale);

        assert_eq!(ledger.balance(&id), Some(100.0));
        assert!(ledger.add_payment(payment(id, 30.0)));
        assert_eq!(ledger.amount_paid(&id), Some(30.0));
        assert!(ledger.add_return(ReturnEntry {
            id: Uuid::new_v4(),
            sale_id: id,
            sku: "H1".to_string(),
            quantity: 1.0,
            refund: 50.0,
            returned_at: Utc::now(),
        }));
        assert_eq!(ledger.balance(&id), Some(20.0));
        assert_eq!(ledger.returned_quantity(&id, "H1"), 1.0);
        assert_eq!(ledger.returned_quantity(&id, "H2"), 0.0);
    }

    #[test]
    fn test_unknown_sale() {
        let mut ledger = SalesLedger::new();
        let id = Uuid::new_v4();
        assert!(!ledger.add_payment(payment(id, 1.0)));
        assert!(ledger.balance(&id).is_none());
        assert!(ledger.get(&id).is_none());
    }
}
