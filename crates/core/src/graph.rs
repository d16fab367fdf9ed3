use std::ops::RangeInclusive;

use common::error::Error;
use common::numeric_kernel::is_valid_rate;
use common::types::{Edge, ExchangeEdge, ProductId};

/// Directed, rate-weighted exchange graph stored as per-product adjacency lists.
///
/// - `adjacency[u]` → every quote whose source is product `u`, in insertion order
/// - `adjacency[0]` → always empty; product ids are 1-based
///
/// Parallel edges between the same ordered pair are kept as separate quotes.
/// The graph is built once and then only queried, so there is no removal.
#[derive(Debug, Clone)]
pub struct RateGraph {
    num_products: usize,
    adjacency: Vec<Vec<ExchangeEdge>>,
}

impl RateGraph {
    /// Allocates `num_products + 1` empty adjacency lists.
    ///
    /// # Errors
    /// Returns `Error::InvalidSize` if `num_products` is zero.
    pub fn new(num_products: usize) -> Result<Self, Error> {
        if num_products < 1 {
            return Err(Error::InvalidSize(num_products));
        }

        Ok(Self {
            num_products,
            adjacency: vec![Vec::new(); num_products + 1],
        })
    }

    /// Builds a graph from a list of `(from, to, rate)` tuples.
    ///
    /// Edges are appended in slice order, so the per-product order seen by the
    /// traversal matches the order of the input.
    pub fn from_edges(num_products: usize, edges: &[Edge]) -> Result<Self, Error> {
        let mut graph = Self::new(num_products)?;
        for &(from, to, rate) in edges {
            graph.add_edge(from, to, rate)?;
        }
        Ok(graph)
    }

    /// Appends a quote to `adjacency[from]`.
    ///
    /// # Errors
    /// - `Error::OutOfRange` if `from` or `to` is outside `[1, num_products]`.
    /// - `Error::InvalidRate` if `rate` is not a positive, finite number.
    pub fn add_edge(&mut self, from: ProductId, to: ProductId, rate: f64) -> Result<(), Error> {
        self.check_product(from)?;
        self.check_product(to)?;

        if !is_valid_rate(rate) {
            return Err(Error::InvalidRate(rate));
        }

        self.adjacency[from].push(ExchangeEdge::new(from, to, rate));
        Ok(())
    }

    /// Appends a batch of quotes, stopping at the first invalid one.
    ///
    /// Edges before the failing one stay in the graph.
    pub fn add_edges(&mut self, edges: Vec<Edge>) -> Result<(), Error> {
        for (from, to, rate) in edges {
            self.add_edge(from, to, rate)?;
        }
        Ok(())
    }

    /// Outgoing quotes of `node` in insertion order. Unknown ids have none.
    pub fn edges_from(&self, node: ProductId) -> &[ExchangeEdge] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of products, not counting the reserved id 0.
    pub fn node_count(&self) -> usize {
        self.num_products
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Valid product ids in increasing order.
    pub fn nodes(&self) -> RangeInclusive<ProductId> {
        1..=self.num_products
    }

    fn check_product(&self, product: ProductId) -> Result<(), Error> {
        if product == 0 || product > self.num_products {
            return Err(Error::OutOfRange {
                product,
                num_products: self.num_products,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_allocates_one_list_per_product_plus_reserved_slot() {
        let graph = RateGraph::new(3).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.adjacency.len(), 4);
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn new_rejects_empty_graph() {
        assert_eq!(RateGraph::new(0).unwrap_err(), Error::InvalidSize(0));
    }

    #[test]
    fn add_edge_appends_to_source_list() {
        let mut graph = RateGraph::new(3).unwrap();
        graph.add_edge(1, 2, 2.0).unwrap();
        graph.add_edge(2, 3, 3.0).unwrap();

        assert_eq!(graph.edges_from(1), &[ExchangeEdge::new(1, 2, 2.0)]);
        assert_eq!(graph.edges_from(2), &[ExchangeEdge::new(2, 3, 3.0)]);
        assert!(graph.edges_from(3).is_empty());
        assert!(graph.edges_from(0).is_empty());
    }

    #[test]
    fn add_edge_rejects_out_of_range_products() {
        let mut graph = RateGraph::new(2).unwrap();

        assert_eq!(
            graph.add_edge(0, 1, 1.0).unwrap_err(),
            Error::OutOfRange {
                product: 0,
                num_products: 2
            }
        );
        assert_eq!(
            graph.add_edge(1, 3, 1.0).unwrap_err(),
            Error::OutOfRange {
                product: 3,
                num_products: 2
            }
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn add_edge_rejects_non_positive_rates() {
        let mut graph = RateGraph::new(2).unwrap();

        assert_eq!(graph.add_edge(1, 2, 0.0).unwrap_err(), Error::InvalidRate(0.0));
        assert_eq!(graph.add_edge(1, 2, -1.5).unwrap_err(), Error::InvalidRate(-1.5));
        assert!(matches!(
            graph.add_edge(1, 2, f64::NAN),
            Err(Error::InvalidRate(_))
        ));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn parallel_edges_are_all_retained_in_order() {
        let graph = RateGraph::from_edges(2, &[(1, 2, 2.0), (1, 2, 3.0), (2, 1, 0.4)]).unwrap();

        let rates: Vec<f64> = graph.edges_from(1).iter().map(|e| e.rate).collect();
        assert_eq!(rates, vec![2.0, 3.0]);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn self_loop_is_stored() {
        let graph = RateGraph::from_edges(1, &[(1, 1, 1.05)]).unwrap();
        assert_eq!(graph.edges_from(1), &[ExchangeEdge::new(1, 1, 1.05)]);
    }

    #[test]
    fn add_edges_stops_at_first_invalid_edge() {
        let mut graph = RateGraph::new(3).unwrap();
        let result = graph.add_edges(vec![(1, 2, 1.0), (2, 9, 1.0), (2, 3, 1.0)]);

        assert!(matches!(result, Err(Error::OutOfRange { product: 9, .. })));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn from_edges_propagates_size_error() {
        assert_eq!(
            RateGraph::from_edges(0, &[]).unwrap_err(),
            Error::InvalidSize(0)
        );
    }
}
