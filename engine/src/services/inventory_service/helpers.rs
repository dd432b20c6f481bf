// Helpers shared by the inventory_service handlers

/// Half a cent: money comparisons within this margin count as equal.
pub const CENT_TOLERANCE: f64 = 0.005;

/// Quantities come from normalized text, so allow for float noise when
/// comparing them against stock or sold amounts.
pub const QUANTITY_TOLERANCE: f64 = 1e-9;

pub fn exceeds(requested: f64, available: f64, tolerance: f64) -> bool {
    requested > available + tolerance
}

/// Adds `quantity` to the running total for `sku`, keeping first-seen order.
pub fn accumulate<'a>(totals: &mut Vec<(&'a str, f64)>, sku: &'a str, quantity: f64) {
    match totals.iter_mut().find(|(s, _)| *s == sku) {
        Some((_, total)) => *total += quantity,
        None => totals.push((sku, quantity)),
    }
}
