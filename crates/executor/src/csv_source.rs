use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;

use super::error::Error;
use super::types::{Market, MarketSource, Quote};

// Helper struct for CSV parsing
#[derive(Debug, Deserialize, Default)]
pub struct CsvRecord {
    pub product_a: usize,
    pub product_b: usize,
    pub weight_a: f64,
    pub weight_b: f64,
}

impl From<CsvRecord> for Quote {
    fn from(record: CsvRecord) -> Self {
        Quote {
            product_a: record.product_a,
            product_b: record.product_b,
            weight_a: record.weight_a,
            weight_b: record.weight_b,
        }
    }
}

/// Reads quotes from a CSV export with a
/// `product_a,product_b,weight_a,weight_b` header.
///
/// The product count is the largest id referenced by any quote.
pub struct CsvSource {
    path: String,
}

impl CsvSource {
    pub fn new(path: String) -> Self {
        CsvSource { path }
    }

    fn parse_csv_to_quotes(&self) -> Result<Vec<Quote>, Error> {
        let file = File::open(&self.path).map_err(|e| {
            tracing::error!("Failed to read file {}: {:?}", self.path, e);
            Error::IoError(e)
        })?;

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut quotes = Vec::new();

        for result in rdr.deserialize() {
            let record: CsvRecord = result?;
            quotes.push(record.into());
        }
        Ok(quotes)
    }
}

#[async_trait::async_trait]
impl MarketSource for CsvSource {
    async fn load(self) -> Result<Market, Error> {
        let quotes = self.parse_csv_to_quotes()?;

        // The product count comes from the quotes, so without any there is no market.
        if quotes.is_empty() {
            return Err(Error::EmptyMarket(self.path));
        }

        let num_products = quotes
            .iter()
            .flat_map(|q| [q.product_a, q.product_b])
            .max()
            .unwrap_or(1);

        tracing::debug!(
            "CsvSource: parsed {} quotes over {} products from {}",
            quotes.len(),
            num_products,
            self.path
        );

        Ok(Market {
            num_products,
            quotes,
        })
    }
}
