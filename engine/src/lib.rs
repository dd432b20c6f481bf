// Engine library root: stock and sales bookkeeping on top of the shared
// number and sort utilities.

pub mod config;
pub mod data;
pub mod error;
pub mod services;
