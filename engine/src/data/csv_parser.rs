use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use shared::models::StockItem;
use shared::utils::brazilian_format::normalize_str;
use std::fs::File;
use std::io::BufReader;

const DEFAULT_UNIT: &str = "un";

pub struct StockCsvParser;

impl StockCsvParser {
    // CSV Header: SKU;Descrição;Unidade;Quantidade;Custo;Preço
    // Example Row: H101;Farinha de trigo 1kg;un;1.250;R$ 3,10;R$ 5,49
    pub fn load_items_from_csv(file_path: &str, delimiter: u8) -> Result<Vec<StockItem>> {
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open CSV file '{}'", file_path))?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let headers = rdr.headers()?.clone();
        let mut items = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record =
                result.with_context(|| format!("Error reading CSV record at line {}", line))?;

            let sku = Self::required_field(&record, &headers, "SKU", line)?;
            if sku.is_empty() {
                return Err(anyhow!("Empty 'SKU' field in CSV record at line {}", line));
            }
            let name = Self::required_field(&record, &headers, "Descrição", line)?;
            let unit = match Self::get_field(&record, &headers, "Unidade") {
                Some(u) if !u.is_empty() => u,
                _ => DEFAULT_UNIT,
            };

            let quantity = Self::amount_field(&record, &headers, "Quantidade", line)?;
            let cost = Self::amount_field(&record, &headers, "Custo", line)?;
            let price = Self::amount_field(&record, &headers, "Preço", line)?;

            items.push(StockItem {
                sku: sku.to_string(),
                name: name.to_string(),
                unit: unit.to_string(),
                quantity,
                cost,
                price,
            });
        }
        tracing::debug!(path = %file_path, count = items.len(), "Parsed stock CSV");
        Ok(items)
    }

    fn amount_field(
        record: &StringRecord,
        headers: &StringRecord,
        column: &str,
        line: usize,
    ) -> Result<f64> {
        let raw = Self::required_field(record, headers, column, line)?;
        Self::parse_amount(raw, column, line)
    }

    // The normalizer reads junk as 0; an import should flag it instead, so a
    // field with text but no digits is rejected. Blank means 0.
    fn parse_amount(raw: &str, column: &str, line: usize) -> Result<f64> {
        if !raw.is_empty() && !raw.bytes().any(|b| b.is_ascii_digit()) {
            return Err(anyhow!(
                "Error parsing '{}' at line {}: Failed to parse amount '{}'",
                column,
                line,
                raw
            ));
        }
        Ok(normalize_str(raw))
    }

    fn required_field<'a>(
        record: &'a StringRecord,
        headers: &StringRecord,
        name: &str,
        line: usize,
    ) -> Result<&'a str> {
        Self::get_field(record, headers, name)
            .ok_or_else(|| anyhow!("Missing '{}' field in CSV record at line {}", name, line))
    }

    fn get_field<'a>(
        record: &'a StringRecord,
        headers: &StringRecord,
        name: &str,
    ) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .and_then(|pos| record.get(pos))
    }
}
