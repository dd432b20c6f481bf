// Engine main entry point: imports the configured stock CSV and prints the
// catalogue in SKU order.
use engine::config::settings::EngineSettings;
use engine::services::{InventoryService, LoadCsvRequest, StockListRequest};
use shared::utils::brazilian_format::{format_currency, format_decimal};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    info!("Starting stockroom engine...");

    // A CSV path on the command line wins over the one in the config file.
    let mut settings = EngineSettings::from_env()?;
    if let Some(path) = std::env::args().nth(1) {
        settings.stock_csv = Some(path);
    }
    let stock_csv = settings.stock_csv.clone();

    let service = InventoryService::new(settings);

    match stock_csv {
        Some(file_path) => {
            let response = service.load_csv_data(LoadCsvRequest { file_path }).await?;
            info!("{}", response.message);
        }
        None => {
            info!("No stock CSV configured; pass a path or set stock_csv in the config file.");
            return Ok(());
        }
    }

    let low_stock_threshold = service.settings().low_stock_threshold;
    let listing = service.list_stock(StockListRequest::default()).await;
    println!(
        "{:<12} {:<32} {:>12} {:>14} {:>14}",
        "SKU", "Descrição", "Quantidade", "Custo", "Preço"
    );
    for item in &listing.items {
        let flag = if item.quantity <= low_stock_threshold { " *" } else { "" };
        println!(
            "{:<12} {:<32} {:>12} {:>14} {:>14}{}",
            item.sku,
            item.name,
            format!("{} {}", format_decimal(item.quantity, 2), item.unit),
            format_currency(item.cost),
            format_currency(item.price),
            flag
        );
    }

    Ok(())
}
