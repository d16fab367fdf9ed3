use thiserror::Error;

use common::error::Error as ArbitrageError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config load error: {0}")]
    ConfigLoadError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Malformed input on line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    #[error("Input contains no product count.")]
    MissingProductCount,

    #[error("CSV file {0} contains no quotes, so the product count is unknown.")]
    EmptyMarket(String),

    #[error("Graph processing error: {0}")]
    GraphError(#[from] ArbitrageError),

    #[error("Search did not finish within {0} ms.")]
    SearchTimedOut(u64),

    #[error("Search task failed: {0}")]
    SearchTaskFailed(String),
}
