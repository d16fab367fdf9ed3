use std::sync::atomic::AtomicBool;

use super::graph::RateGraph;
use common::{error::Error, types::ScoredCycle};

/// Trait for solvers that search a rate graph for an arbitrage cycle.
pub trait ArbitrageSolver {
    /// Searches `graph` for a profitable cycle.
    ///
    /// Returns `Ok(Some(cycle))` if a profitable cycle is found,
    /// `Ok(None)` if none exists, or `Err(e)` on an internal failure.
    fn find_arbitrage(&self, graph: &RateGraph) -> Result<Option<ScoredCycle>, Error> {
        self.find_arbitrage_until(graph, &AtomicBool::new(false))
    }

    /// Same search, but gives up with `Error::Interrupted` once `stop` is set.
    ///
    /// The flag is polled between candidate cycles, so a watchdog on another
    /// thread can end a long search.
    fn find_arbitrage_until(
        &self,
        graph: &RateGraph,
        stop: &AtomicBool,
    ) -> Result<Option<ScoredCycle>, Error>;
}
