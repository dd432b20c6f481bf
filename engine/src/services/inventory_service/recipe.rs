// Handlers for SetRecipe and RecipeCost
use std::sync::Arc;
use tokio::sync::RwLock;

use super::helpers::QUANTITY_TOLERANCE;
use crate::data::stock_store::StockStore;
use crate::services::{RecipeCostRequest, RecipeCostResponse, RecipeRequest, RecipeResponse};
use shared::models::{Recipe, RecipeComponent};
use shared::utils::brazilian_format::{format_currency, round_cents};

fn rejected(message: String) -> RecipeResponse {
    tracing::warn!(reason = %message, "Recipe rejected");
    RecipeResponse { success: false, message }
}

fn cost_rejected(message: String) -> RecipeCostResponse {
    tracing::warn!(reason = %message, "Recipe cost unavailable");
    RecipeCostResponse { success: false, message, cost: 0.0, margin: 0.0 }
}

pub async fn handle_set_recipe(
    req_payload: RecipeRequest,
    stock_store: Arc<RwLock<StockStore>>,
) -> RecipeResponse {
    let product_sku = &req_payload.product_sku;
    if req_payload.components.is_empty() {
        return rejected(format!("Recipe for '{}' needs at least one component.", product_sku));
    }

    let mut store = stock_store.write().await;
    if store.get(product_sku).is_none() {
        return rejected(format!("Unknown product SKU '{}'.", product_sku));
    }

    let mut components = Vec::with_capacity(req_payload.components.len());
    for component in &req_payload.components {
        if &component.material_sku == product_sku {
            return rejected(format!("Product '{}' cannot be a component of itself.", product_sku));
        }
        if store.get(&component.material_sku).is_none() {
            return rejected(format!("Unknown material SKU '{}'.", component.material_sku));
        }
        let quantity = component.quantity.normalize();
        if quantity <= QUANTITY_TOLERANCE {
            return rejected(format!(
                "Quantity for material '{}' must be greater than zero.",
                component.material_sku
            ));
        }
        components.push(RecipeComponent { material_sku: component.material_sku.clone(), quantity });
    }

    let component_count = components.len();
    store.set_recipe(Recipe { product_sku: product_sku.clone(), components });
    tracing::info!(product_sku = %product_sku, component_count, "Recipe stored");

    RecipeResponse {
        success: true,
        message: format!(
            "Recipe for '{}' stored with {} components.",
            product_sku, component_count
        ),
    }
}

pub async fn handle_recipe_cost(
    req_payload: RecipeCostRequest,
    stock_store: Arc<RwLock<StockStore>>,
) -> RecipeCostResponse {
    let store = stock_store.read().await;

    let product = match store.get(&req_payload.product_sku) {
        Some(product) => product,
        None => return cost_rejected(format!("Unknown product SKU '{}'.", req_payload.product_sku)),
    };
    let recipe = match store.recipe(&req_payload.product_sku) {
        Some(recipe) => recipe,
        None => {
            return cost_rejected(format!("No recipe registered for '{}'.", req_payload.product_sku))
        }
    };

    let mut cost = 0.0;
    for component in &recipe.components {
        match store.get(&component.material_sku) {
            Some(material) => cost += material.cost * component.quantity,
            None => {
                return cost_rejected(format!(
                    "Material '{}' used by '{}' is no longer in stock records.",
                    component.material_sku, req_payload.product_sku
                ))
            }
        }
    }

    let cost = round_cents(cost);
    let margin = round_cents(product.price - cost);
    RecipeCostResponse {
        success: true,
        message: format!(
            "Cost of '{}': {} (margin {})",
            req_payload.product_sku,
            format_currency(cost),
            format_currency(margin)
        ),
        cost,
        margin,
    }
}
