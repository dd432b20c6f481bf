pub mod models;
pub mod utils;

// Re-exported so callers outside the crate don't have to spell out the module path.
pub use utils::brazilian_format::{normalize_number, NumericInput};
pub use utils::natural_sort::compare_natural;
