use std::collections::HashMap;

use super::error::Error;
use barter_core::RateGraph;
use common::types::ProductId;

/// A trait defining the contract for any source that produces a market
/// snapshot for the search.
///
/// This keeps `main` decoupled from where quotes come from (the barter text
/// format, a CSV export, or simulated data).
///
/// The trait bounds (`Send`, `Sync`, `'static`) let an implementation be moved
/// onto the Tokio runtime.
#[async_trait::async_trait]
pub trait MarketSource: Send + Sync + 'static {
    async fn load(self) -> Result<Market, Error>;
}

/// Where the market comes from, chosen on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    TXT(String),
    CSV(String),
    SIM,
}

/// One observed barter: `weight_a` of `product_a` trades for `weight_b` of `product_b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub product_a: ProductId,
    pub product_b: ProductId,
    pub weight_a: f64,
    pub weight_b: f64,
}

impl Quote {
    /// Units of `product_b` received per unit of `product_a`.
    pub fn rate(&self) -> f64 {
        self.weight_b / self.weight_a
    }
}

/// A loaded market: how many products exist and every quote between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    pub num_products: usize,
    pub quotes: Vec<Quote>,
}

impl Market {
    /// Builds the rate graph, one edge per quote in input order.
    pub fn into_graph(self) -> Result<RateGraph, Error> {
        let mut graph = RateGraph::new(self.num_products)?;

        for quote in &self.quotes {
            graph.add_edge(quote.product_a, quote.product_b, quote.rate())?;
        }

        Ok(graph)
    }
}

/// Observed weights behind each traded rate, for the report.
///
/// Keyed by `(from, to, rate)`. Quotes that share a key are interchangeable for
/// the search, so the first one inserted is the one reported.
#[derive(Debug, Clone, Default)]
pub struct QuoteBook {
    weights: HashMap<(ProductId, ProductId, u64), (f64, f64)>,
}

impl QuoteBook {
    pub fn from_quotes(quotes: &[Quote]) -> Self {
        let mut weights = HashMap::with_capacity(quotes.len());
        for quote in quotes {
            weights
                .entry((quote.product_a, quote.product_b, quote.rate().to_bits()))
                .or_insert((quote.weight_a, quote.weight_b));
        }
        QuoteBook { weights }
    }

    /// `(weight_a, weight_b)` of the quote that produced this trade.
    pub fn weights(&self, from: ProductId, to: ProductId, rate: f64) -> Option<(f64, f64)> {
        self.weights.get(&(from, to, rate.to_bits())).copied()
    }
}
