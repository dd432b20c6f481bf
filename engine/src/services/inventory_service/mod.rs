// InventoryService: the entry point REST handlers (or the CLI) call into.
// Owns the shared stores and dispatches each operation to its handler module.
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{
    LoadCsvRequest, LoadCsvResponse, PaymentRequest, PaymentResponse, RecipeCostRequest,
    RecipeCostResponse, RecipeRequest, RecipeResponse, ReturnRequest, ReturnResponse, SaleRequest,
    SaleResponse, StockListRequest, StockListResponse,
};
use crate::config::settings::EngineSettings;
use crate::data::sales_ledger::SalesLedger;
use crate::data::stock_store::StockStore;
use crate::error::EngineError;

pub mod helpers;
pub mod list_stock;
pub mod load_csv_data;
pub mod process_return;
pub mod recipe;
pub mod record_payment;
pub mod record_sale;

pub struct InventoryService {
    stock_store: Arc<RwLock<StockStore>>,
    sales_ledger: Arc<RwLock<SalesLedger>>,
    settings: EngineSettings,
}

impl InventoryService {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_stores(
            Arc::new(RwLock::new(StockStore::new())),
            Arc::new(RwLock::new(SalesLedger::new())),
            settings,
        )
    }

    pub fn with_stores(
        stock_store: Arc<RwLock<StockStore>>,
        sales_ledger: Arc<RwLock<SalesLedger>>,
        settings: EngineSettings,
    ) -> Self {
        InventoryService { stock_store, sales_ledger, settings }
    }

    pub fn stock_store(&self) -> Arc<RwLock<StockStore>> {
        self.stock_store.clone()
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub async fn load_csv_data(
        &self,
        request: LoadCsvRequest,
    ) -> Result<LoadCsvResponse, EngineError> {
        tracing::info!(path = %request.file_path, "Received LoadCsvRequest");
        let delimiter = self.settings.delimiter()?;
        load_csv_data::handle_load_csv_data(request, self.stock_store.clone(), delimiter).await
    }

    pub async fn list_stock(&self, request: StockListRequest) -> StockListResponse {
        let threshold = self.settings.low_stock_threshold;
        list_stock::handle_list_stock(request, self.stock_store.clone(), threshold).await
    }

    pub async fn record_sale(&self, request: SaleRequest) -> Result<SaleResponse, EngineError> {
        tracing::info!(
            customer = ?request.customer,
            lines = request.lines.len(),
            "Received SaleRequest"
        );
        record_sale::handle_record_sale(
            request,
            self.stock_store.clone(),
            self.sales_ledger.clone(),
            self.settings.allow_negative_stock,
        )
        .await
    }

    pub async fn record_payment(&self, request: PaymentRequest) -> PaymentResponse {
        tracing::info!(
            sale_id = %request.sale_id,
            amount = ?request.amount,
            method = ?request.method,
            "Received PaymentRequest"
        );
        record_payment::handle_record_payment(request, self.sales_ledger.clone()).await
    }

    pub async fn process_return(
        &self,
        request: ReturnRequest,
    ) -> Result<ReturnResponse, EngineError> {
        tracing::info!(
            sale_id = %request.sale_id,
            sku = %request.sku,
            quantity = ?request.quantity,
            "Received ReturnRequest"
        );
        process_return::handle_process_return(
            request,
            self.stock_store.clone(),
            self.sales_ledger.clone(),
        )
        .await
    }

    pub async fn set_recipe(&self, request: RecipeRequest) -> RecipeResponse {
        tracing::info!(
            product_sku = %request.product_sku,
            components = request.components.len(),
            "Received RecipeRequest"
        );
        recipe::handle_set_recipe(request, self.stock_store.clone()).await
    }

    pub async fn recipe_cost(&self, request: RecipeCostRequest) -> RecipeCostResponse {
        recipe::handle_recipe_cost(request, self.stock_store.clone()).await
    }
}
