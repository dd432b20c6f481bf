// Request and response payloads for the inventory service. Numeric fields
// arrive as `NumericInput` exactly as a form or JSON body sends them.
use serde::{Deserialize, Serialize};
use shared::models::{PaymentMethod, Sale, StockItem};
use shared::NumericInput;
use uuid::Uuid;

pub mod inventory_service;

pub use inventory_service::InventoryService;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCsvRequest {
    pub file_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCsvResponse {
    pub success: bool,
    pub message: String,
    pub items_loaded: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockListRequest {
    #[serde(default)]
    pub low_stock_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockListResponse {
    pub items: Vec<StockItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLineRequest {
    pub sku: String,
    #[serde(default)]
    pub quantity: NumericInput,
    /// Absent or blank means "use the catalogue price".
    #[serde(default)]
    pub unit_price: NumericInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRequest {
    #[serde(default)]
    pub customer: Option<String>,
    pub lines: Vec<SaleLineRequest>,
    #[serde(default)]
    pub discount: NumericInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleResponse {
    pub success: bool,
    pub message: String,
    pub sale: Option<Sale>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub sale_id: Uuid,
    #[serde(default)]
    pub amount: NumericInput,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub success: bool,
    pub message: String,
    pub payment_id: Option<Uuid>,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub sale_id: Uuid,
    pub sku: String,
    #[serde(default)]
    pub quantity: NumericInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnResponse {
    pub success: bool,
    pub message: String,
    pub refund: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeComponentRequest {
    pub material_sku: String,
    #[serde(default)]
    pub quantity: NumericInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub product_sku: String,
    pub components: Vec<RecipeComponentRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCostRequest {
    pub product_sku: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCostResponse {
    pub success: bool,
    pub message: String,
    pub cost: f64,
    pub margin: f64,
}
