use std::fs;
use std::str::FromStr;

use super::error::Error;
use super::types::{Market, MarketSource, Quote};

/// Reads the barter text format:
///
/// ```text
/// <numProducts>
/// <productA> <productB> <weightA> <weightB>
/// ...
/// ```
///
/// Blank lines are ignored.
pub struct TextSource {
    path: String,
}

impl TextSource {
    pub fn new(path: String) -> Self {
        TextSource { path }
    }
}

#[async_trait::async_trait]
impl MarketSource for TextSource {
    async fn load(self) -> Result<Market, Error> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            tracing::error!("Failed to read file {}: {}", self.path, e);
            Error::IoError(e)
        })?;

        let market = parse_market(&content)?;
        tracing::debug!(
            "TextSource: parsed {} quotes over {} products from {}",
            market.quotes.len(),
            market.num_products,
            self.path
        );
        Ok(market)
    }
}

/// Parses a whole input document into a [`Market`].
pub fn parse_market(content: &str) -> Result<Market, Error> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (count_line, count_text) = lines.next().ok_or(Error::MissingProductCount)?;
    let num_products: usize = parse_field(count_line, count_text, "product count")?;

    let quotes = lines
        .map(|(line_no, line)| parse_quote(line_no, line, num_products))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Market {
        num_products,
        quotes,
    })
}

fn parse_quote(line_no: usize, line: &str, num_products: usize) -> Result<Quote, Error> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [a, b, wa, wb] = fields.as_slice() else {
        return Err(Error::ParseError {
            line: line_no,
            reason: format!("expected 4 fields, found {}", fields.len()),
        });
    };

    let quote = Quote {
        product_a: parse_field(line_no, a, "productA")?,
        product_b: parse_field(line_no, b, "productB")?,
        weight_a: parse_field(line_no, wa, "weightA")?,
        weight_b: parse_field(line_no, wb, "weightB")?,
    };

    for (name, product) in [("productA", quote.product_a), ("productB", quote.product_b)] {
        if product == 0 || product > num_products {
            return Err(Error::ParseError {
                line: line_no,
                reason: format!("{} {} is outside 1..={}", name, product, num_products),
            });
        }
    }

    for (name, weight) in [("weightA", quote.weight_a), ("weightB", quote.weight_b)] {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(Error::ParseError {
                line: line_no,
                reason: format!("{} must be a positive number, got {}", name, weight),
            });
        }
    }

    Ok(quote)
}

fn parse_field<T: FromStr>(line_no: usize, text: &str, name: &str) -> Result<T, Error> {
    text.parse().map_err(|_| Error::ParseError {
        line: line_no,
        reason: format!("{} {:?} is not a valid number", name, text),
    })
}
