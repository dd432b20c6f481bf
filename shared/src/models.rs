use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub sku: String,
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    pub cost: f64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeComponent {
    pub material_sku: String,
    pub quantity: f64,
}

/// Raw materials consumed to produce one unit of `product_sku`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub product_sku: String,
    pub components: Vec<RecipeComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub sku: String,
    pub quantity: f64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    pub customer: Option<String>,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<SaleLine>,
    pub discount: f64,
    pub total: f64,
}

impl Sale {
    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(|l| l.quantity * l.unit_price).sum()
    }

    /// Quantity sold for `sku` across every line of the sale.
    pub fn quantity_sold(&self, sku: &str) -> f64 {
        self.lines.iter().filter(|l| l.sku == sku).map(|l| l.quantity).sum()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Cash,
    Pix,
    Card,
    StoreCredit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub amount: f64,
    pub method: PaymentMethod,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnEntry {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub sku: String,
    pub quantity: f64,
    pub refund: f64,
    pub returned_at: DateTime<Utc>,
}
