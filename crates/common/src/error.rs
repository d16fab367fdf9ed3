use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A graph was requested with fewer than one product.
    InvalidSize(usize),

    /// A product id outside `[1, num_products]` was referenced.
    OutOfRange { product: usize, num_products: usize },

    /// An exchange rate that is not a positive, finite number.
    InvalidRate(f64),

    /// A cycle with no edges reached the profit evaluator.
    EmptyCycle,

    /// The search was asked to stop before the traversal finished.
    Interrupted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidSize(n) => {
                write!(f, "Graph size {} is invalid, at least one product is required.", n)
            }

            Error::OutOfRange {
                product,
                num_products,
            } => write!(
                f,
                "Product {} is out of range, valid ids are 1..={}.",
                product, num_products
            ),

            Error::InvalidRate(rate) => {
                write!(f, "Exchange rate {} is invalid, rates must be positive.", rate)
            }

            Error::EmptyCycle => write!(f, "Cannot evaluate a cycle without edges."),

            Error::Interrupted => write!(f, "Search was stopped before it finished."),
        }
    }
}

impl std::error::Error for Error {}
