use std::sync::atomic::{AtomicBool, Ordering};

use super::evaluator::ProfitEvaluator;
use super::finder::CycleFinder;
use super::graph::RateGraph;
use super::traits::ArbitrageSolver;
use common::error::Error;
use common::numeric_kernel::strictly_greater;
use common::types::ScoredCycle;

/// How much of the traversal a search runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Run the whole traversal and keep the highest compounded rate.
    #[default]
    Best,
    /// Stop at the first profitable cycle in traversal order.
    First,
}

/// Drives the cycle finder and profit evaluator over a whole graph.
///
/// Ties between compounded rates (within the evaluator's epsilon) go to the
/// cycle discovered first, which makes the result deterministic because the
/// traversal order is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArbitrageSelector {
    evaluator: ProfitEvaluator,
    mode: SearchMode,
}

impl ArbitrageSelector {
    pub fn new(evaluator: ProfitEvaluator, mode: SearchMode) -> Self {
        Self { evaluator, mode }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Returns the profitable cycle with the highest compounded rate.
    ///
    /// `Ok(None)` means the market has no exploitable cycle, which is a normal
    /// outcome.
    ///
    /// # Errors
    /// Returns `Error::EmptyCycle` if the finder ever hands over an empty cycle.
    pub fn find_best_arbitrage(&self, graph: &RateGraph) -> Result<Option<ScoredCycle>, Error> {
        self.best_until(graph, &AtomicBool::new(false))
    }

    /// Returns the first profitable cycle in traversal order and stops there.
    pub fn find_first_arbitrage(&self, graph: &RateGraph) -> Result<Option<ScoredCycle>, Error> {
        self.first_until(graph, &AtomicBool::new(false))
    }

    /// Every profitable cycle of a full traversal, in discovery order.
    pub fn profitable_cycles(&self, graph: &RateGraph) -> Result<Vec<ScoredCycle>, Error> {
        let mut found = Vec::new();

        for cycle in CycleFinder::new(graph) {
            let scored = self.evaluator.evaluate(cycle)?;
            if scored.is_profitable() {
                found.push(scored);
            }
        }

        Ok(found)
    }

    fn best_until(&self, graph: &RateGraph, stop: &AtomicBool) -> Result<Option<ScoredCycle>, Error> {
        let eps = self.evaluator.epsilon();
        let mut best: Option<ScoredCycle> = None;

        for cycle in CycleFinder::new(graph) {
            check_stop(stop)?;

            let scored = self.evaluator.evaluate(cycle)?;
            if !scored.is_profitable() {
                continue;
            }

            let replace = match &best {
                Some(incumbent) => {
                    strictly_greater(scored.compounded_rate, incumbent.compounded_rate, eps)
                }
                None => true,
            };

            if replace {
                best = Some(scored);
            }
        }

        Ok(best)
    }

    fn first_until(&self, graph: &RateGraph, stop: &AtomicBool) -> Result<Option<ScoredCycle>, Error> {
        for cycle in CycleFinder::new(graph) {
            check_stop(stop)?;

            let scored = self.evaluator.evaluate(cycle)?;
            if scored.is_profitable() {
                return Ok(Some(scored));
            }
        }

        Ok(None)
    }
}

fn check_stop(stop: &AtomicBool) -> Result<(), Error> {
    if stop.load(Ordering::Relaxed) {
        return Err(Error::Interrupted);
    }
    Ok(())
}

impl ArbitrageSolver for ArbitrageSelector {
    fn find_arbitrage_until(
        &self,
        graph: &RateGraph,
        stop: &AtomicBool,
    ) -> Result<Option<ScoredCycle>, Error> {
        match self.mode {
            SearchMode::Best => self.best_until(graph, stop),
            SearchMode::First => self.first_until(graph, stop),
        }
    }
}

/// Runs a best-rate search with the default epsilon.
pub fn find_best_arbitrage(graph: &RateGraph) -> Result<Option<ScoredCycle>, Error> {
    ArbitrageSelector::default().find_best_arbitrage(graph)
}
