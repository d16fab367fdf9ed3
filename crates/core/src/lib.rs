pub mod evaluator;
pub mod finder;
pub mod graph;
pub mod selector;
pub mod traits;

pub use evaluator::ProfitEvaluator;
pub use finder::CycleFinder;
pub use graph::RateGraph;
pub use selector::{ArbitrageSelector, SearchMode};
