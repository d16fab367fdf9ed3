use barter_core::finder::cycles;
use barter_core::graph::RateGraph;
use barter_core::selector::{ArbitrageSelector, find_best_arbitrage};
use common::types::Edge;
use proptest::prelude::*;
use proptest::strategy::Strategy;

const NUM_PRODUCTS_STRATEGY: std::ops::Range<usize> = 1usize..8;

fn market_strategy() -> impl Strategy<Value = (usize, Vec<Edge>)> {
    NUM_PRODUCTS_STRATEGY.prop_flat_map(|num_products| {
        let edge_generator = (
            1usize..=num_products,
            1usize..=num_products,
            0.25f64..4.0,
        );
        let edges_generator = prop::collection::vec(edge_generator, 0..14);

        (proptest::strategy::Just(num_products), edges_generator)
    })
}

proptest! {
    /// Property: edges_from returns each product's quotes in insertion order
    #[test]
    fn edges_from_preserves_insertion_order((num_products, edges) in market_strategy()) {
        let graph = RateGraph::from_edges(num_products, &edges).unwrap();

        for node in graph.nodes() {
            let expected: Vec<Edge> = edges.iter().copied().filter(|e| e.0 == node).collect();
            let stored: Vec<Edge> = graph.edges_from(node).iter().map(|e| e.as_trade()).collect();
            prop_assert_eq!(stored, expected);
        }
        prop_assert_eq!(graph.edge_count(), edges.len());
    }

    /// Property: every emitted cycle is a non-empty closed walk over stored quotes
    #[test]
    fn emitted_cycles_are_closed_walks((num_products, edges) in market_strategy()) {
        let graph = RateGraph::from_edges(num_products, &edges).unwrap();

        for cycle in cycles(&graph) {
            prop_assert!(!cycle.is_empty());
            prop_assert!(cycle.is_closed());
            for edge in &cycle.edges {
                prop_assert!(graph.edges_from(edge.source).contains(edge));
            }
        }
    }

    /// Property: a graph with any self-loop quote has at least one cycle
    #[test]
    fn self_loops_are_always_found((num_products, edges) in market_strategy()) {
        let graph = RateGraph::from_edges(num_products, &edges).unwrap();
        let has_self_loop = edges.iter().any(|e| e.0 == e.1);

        if has_self_loop {
            prop_assert!(!cycles(&graph).is_empty());
        }
    }

    /// Property: the selected cycle is profitable and no profitable cycle beats it
    #[test]
    fn selection_is_the_maximum((num_products, edges) in market_strategy()) {
        let graph = RateGraph::from_edges(num_products, &edges).unwrap();
        let selector = ArbitrageSelector::default();

        let all = selector.profitable_cycles(&graph).unwrap();
        let best = selector.find_best_arbitrage(&graph).unwrap();

        match best {
            None => prop_assert!(all.is_empty()),
            Some(best) => {
                prop_assert!(best.compounded_rate > 1.0);
                for candidate in &all {
                    prop_assert!(candidate.compounded_rate <= best.compounded_rate + 1e-9);
                }
            }
        }
    }

    /// Property: searching twice yields the same answer
    #[test]
    fn search_is_idempotent((num_products, edges) in market_strategy()) {
        let graph = RateGraph::from_edges(num_products, &edges).unwrap();
        prop_assert_eq!(find_best_arbitrage(&graph).unwrap(), find_best_arbitrage(&graph).unwrap());
    }
}
