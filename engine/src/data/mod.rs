pub mod csv_parser;
pub mod sales_ledger;
pub mod stock_store;
