// In-memory stock catalogue and recipes, keyed by SKU
use crate::error::EngineError;
use shared::models::{Recipe, StockItem};
use shared::utils::natural_sort::sort_natural_by;
use std::collections::{BTreeMap, HashMap};

pub struct StockStore {
    // Ordered so SKUs that compare equal naturally ("H1", "h01") still list in a fixed order.
    items: BTreeMap<String, StockItem>,
    recipes: HashMap<String, Recipe>,
}

impl StockStore {
    pub fn new() -> Self {
        StockStore {
            items: BTreeMap::new(),
            recipes: HashMap::new(),
        }
    }

    /// Inserts or replaces items by SKU. Returns how many were written.
    pub fn upsert_items(&mut self, new_items: Vec<StockItem>) -> usize {
        let count = new_items.len();
        for item in new_items {
            self.items.insert(item.sku.clone(), item);
        }
        count
    }

    pub fn get(&self, sku: &str) -> Option<&StockItem> {
        self.items.get(sku)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn list_sorted(&self) -> Vec<StockItem> {
        let items: Vec<StockItem> = self.items.values().cloned().collect();
        sort_natural_by(&items, |item| Some(item.sku.as_str()))
    }

    /// Items at or below `threshold`, in SKU order.
    pub fn low_stock(&self, threshold: f64) -> Vec<StockItem> {
        let items: Vec<StockItem> = self
            .items
            .values()
            .filter(|item| item.quantity <= threshold)
            .cloned()
            .collect();
        sort_natural_by(&items, |item| Some(item.sku.as_str()))
    }

    /// Applies `delta` to the on-hand quantity and returns the new value.
    pub fn adjust_quantity(&mut self, sku: &str, delta: f64) -> Result<f64, EngineError> {
        let item = self
            .items
            .get_mut(sku)
            .ok_or_else(|| EngineError::UnknownSku(sku.to_string()))?;
        item.quantity += delta;
        Ok(item.quantity)
    }

    pub fn set_recipe(&mut self, recipe: Recipe) {
        self.recipes.insert(recipe.product_sku.clone(), recipe);
    }

    pub fn recipe(&self, product_sku: &str) -> Option<&Recipe> {
        self.recipes.get(product_sku)
    }
}

impl Default for StockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::RecipeComponent;

    fn item(sku: &str, quantity: f64) -> StockItem {
        StockItem {
            sku: sku.to_string(),
            name: format!("Item {}", sku),
            unit: "un".to_string(),
            quantity,
            cost: 1.0,
            price: 2.0,
        }
    }

    #[test]
    fn test_list_sorted_uses_natural_order() {
        let mut store = StockStore::new();
        store.upsert_items(vec![
            item("H10", 1.0),
            item("H2", 1.0),
            item("H101", 1.0),
            item("A1", 1.0),
        ]);
        let skus: Vec<String> = store.list_sorted().into_iter().map(|i| i.sku).collect();
        assert_eq!(skus, vec!["A1", "H2", "H10", "H101"]);
    }

    #[test]
    fn test_naturally_equal_skus_list_in_fixed_order() {
        let skus = ["H1", "h1", "H01", "h01", "H001"];
        let expected = vec!["H001", "H01", "H1", "h01", "h1"];

        for rotation in 0..skus.len() {
            let mut store = StockStore::new();
            for i in 0..skus.len() {
                store.upsert_items(vec![item(skus[(rotation + i) % skus.len()], 1.0)]);
            }
            let listed: Vec<String> = store.list_sorted().into_iter().map(|i| i.sku).collect();
            assert_eq!(listed, expected);
            let low: Vec<String> = store.low_stock(1.0).into_iter().map(|i| i.sku).collect();
            assert_eq!(low, expected);
        }
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let mut store = StockStore::new();
        store.upsert_items(vec![item("H1", 3.0)]);
        assert_eq!(store.upsert_items(vec![item("H1", 8.0)]), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("H1").unwrap().quantity, 8.0);
    }

    #[test]
    fn test_low_stock() {
        let mut store = StockStore::new();
        store.upsert_items(vec![item("H10", 2.0), item("H2", 5.0), item("H3", 6.0)]);
        let skus: Vec<String> = store.low_stock(5.0).into_iter().map(|i| i.sku).collect();
        assert_eq!(skus, vec!["H2", "H10"]);
    }

    #[test]
    fn test_adjust_quantity() {
        let mut store = StockStore::new();
        store.upsert_items(vec![item("H1", 3.0)]);
        assert_eq!(store.adjust_quantity("H1", -1.5).unwrap(), 1.5);
        let err = store.adjust_quantity("NOPE", 1.0).unwrap_err();
        assert!(matches!(err, EngineError::UnknownSku(ref sku) if sku == "NOPE"));
    }

    #[test]
    fn test_recipes() {
        let mut store = StockStore::new();
        store.set_recipe(Recipe {
            product_sku: "BOLO".to_string(),
            components: vec![RecipeComponent { material_sku: "MP1".to_string(), quantity: 0.5 }],
        });
        assert_eq!(store.recipe("BOLO").unwrap().components.len(), 1);
        assert!(store.recipe("PAO").is_none());
    }
}
