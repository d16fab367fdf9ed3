// ----------------------------
// Benchmark market layouts
// ----------------------------

use barter_core::RateGraph;
use common::error::Error;
use common::types::Edge;

/// Products on the ring: one traversal descends through all of them.
pub const RING_PRODUCTS: usize = 100_000;

/// Products in the complete graph: every ordered pair has a quote.
pub const DENSE_PRODUCTS: usize = 400;

pub const FEE_MULTIPLIER: f64 = 0.997; // 30 basis points fee (1 - 0.0030)

/// Generates a single cycle `1 → 2 → … → n → 1`.
///
/// Rates sit just above parity so the whole ring compounds to a profit
/// even after the fee, exercising the deepest possible descent.
pub fn generate_ring_edges(n: usize) -> Vec<Edge> {
    (1..=n)
        .map(|i| {
            let next = i % n + 1;
            // Rate is varied slightly by index so the compounded product is not a round number
            let rate = (1.0001 + (i as f64) * 1e-12) * if i == n { FEE_MULTIPLIER } else { 1.0 };
            (i, next, rate)
        })
        .collect()
}

/// Generates a quote for every ordered pair of distinct products.
///
/// Each quote is a parity trade with the fee applied, except for a handful of
/// mispriced pairs that open profitable 2-cycles.
pub fn generate_dense_edges(n: usize) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(n * n.saturating_sub(1));
    for u in 1..=n {
        for v in 1..=n {
            if u == v {
                continue;
            }
            let mispriced = (u * 31 + v * 17) % 997 == 0;
            let rate = if mispriced { 1.01 } else { FEE_MULTIPLIER };
            edges.push((u, v, rate));
        }
    }
    edges
}

pub fn build_graph(n: usize, edges: &[Edge]) -> Result<RateGraph, Error> {
    RateGraph::from_edges(n, edges)
}
