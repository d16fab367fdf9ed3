use common::error::Error;
use common::numeric_kernel::{RATE_EPSILON, classify, compound};
use common::types::{Cycle, ScoredCycle};

/// Scores cycles by their compounded exchange rate.
#[derive(Debug, Clone, Copy)]
pub struct ProfitEvaluator {
    epsilon: f64,
}

impl Default for ProfitEvaluator {
    fn default() -> Self {
        Self::new(RATE_EPSILON)
    }
}

impl ProfitEvaluator {
    /// Creates an evaluator whose break-even gate is `1.0 ± epsilon`.
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Multiplies the rates of `cycle` in cycle order and classifies the result.
    ///
    /// # Errors
    /// Returns `Error::EmptyCycle` if the cycle has no edges. The cycle finder
    /// never produces one, so this signals a broken caller rather than bad input.
    pub fn evaluate(&self, cycle: Cycle) -> Result<ScoredCycle, Error> {
        if cycle.is_empty() {
            return Err(Error::EmptyCycle);
        }

        let compounded_rate = compound(cycle.edges.iter().map(|e| e.rate));

        Ok(ScoredCycle {
            profitability: classify(compounded_rate, self.epsilon),
            compounded_rate,
            cycle,
        })
    }
}
