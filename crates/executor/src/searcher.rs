use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::time::{self, Duration};

use super::error::Error;
use barter_core::{RateGraph, traits::ArbitrageSolver};
use common::types::ScoredCycle;

/// Runs a solver over a loaded graph under a wall-clock watchdog.
///
/// The search itself is synchronous, so it runs on Tokio's blocking pool.
/// If it outlives `timeout`, the solver's stop flag is raised so the blocking
/// thread winds down, and the caller gets `Error::SearchTimedOut`.
pub struct ArbSearcher<S> {
    solver: S,
    timeout: Duration,
}

impl<S> ArbSearcher<S>
where
    S: ArbitrageSolver + Send + 'static,
{
    pub fn new(solver: S, timeout_ms: u64) -> Self {
        ArbSearcher {
            solver,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub async fn search_for_arbs(self, graph: RateGraph) -> Result<Option<ScoredCycle>, Error> {
        let timeout_ms = self.timeout.as_millis() as u64;

        tracing::info!(
            "Searcher: starting cycle search over {} products and {} quotes...",
            graph.node_count(),
            graph.edge_count()
        );

        let solver = self.solver;
        let stop = Arc::new(AtomicBool::new(false));
        let task_stop = Arc::clone(&stop);
        let task = tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            let result = solver.find_arbitrage_until(&graph, &task_stop);
            (result, started.elapsed())
        });

        let (result, elapsed) = match time::timeout(self.timeout, task).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(join_error)) => return Err(Error::SearchTaskFailed(join_error.to_string())),
            Err(_) => {
                stop.store(true, Ordering::Relaxed);
                tracing::warn!("Searcher: search exceeded {} ms, giving up.", timeout_ms);
                return Err(Error::SearchTimedOut(timeout_ms));
            }
        };

        match &result {
            Ok(Some(cycle)) => tracing::info!(
                "Cycle FOUND in {:?}! Path: {:?}, compounded rate {:.6}",
                elapsed,
                cycle.cycle.products(),
                cycle.compounded_rate
            ),
            Ok(None) => tracing::info!(
                "Search complete in {:?}: No arbitrage opportunities.",
                elapsed
            ),
            Err(e) => tracing::error!("Searcher Error: cycle search failed due to: {}.", e),
        }

        Ok(result?)
    }
}
