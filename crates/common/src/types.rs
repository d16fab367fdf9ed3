/// Identifier of a product (graph node). Valid ids are `1..=num_products`;
/// id `0` is reserved.
pub type ProductId = usize;

/// Type alias for a single trade or raw edge: (from, to, rate)
pub type Edge = (ProductId, ProductId, f64);

/// A trade step as handed to the report writer: (from, to, rate).
pub type Trade = Edge;

/// A directed exchange quote: one unit of `source` yields `rate` units of `target`.
///
/// Several edges may share the same `(source, target)` pair; each is a distinct
/// tradeable quote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeEdge {
    pub source: ProductId,
    pub target: ProductId,
    pub rate: f64,
}

impl ExchangeEdge {
    pub fn new(source: ProductId, target: ProductId, rate: f64) -> Self {
        ExchangeEdge {
            source,
            target,
            rate,
        }
    }

    pub fn as_trade(&self) -> Trade {
        (self.source, self.target, self.rate)
    }
}

/// A closed walk of exchange edges.
///
/// The target of each edge is the source of the next one, and the last edge
/// returns to the source of the first. A single self-loop is a valid cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    pub edges: Vec<ExchangeEdge>,
}

impl Cycle {
    pub fn new(edges: Vec<ExchangeEdge>) -> Self {
        Cycle { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The product the trade sequence starts and ends with.
    pub fn start(&self) -> Option<ProductId> {
        self.edges.first().map(|e| e.source)
    }

    /// Products in visiting order, without repeating the start at the end.
    pub fn products(&self) -> Vec<ProductId> {
        self.edges.iter().map(|e| e.source).collect()
    }

    /// Checks the closed-walk property: consecutive edges chain and the last
    /// edge returns to the first source.
    pub fn is_closed(&self) -> bool {
        let (Some(first), Some(last)) = (self.edges.first(), self.edges.last()) else {
            return false;
        };

        let chained = self
            .edges
            .windows(2)
            .all(|pair| pair[0].target == pair[1].source);

        chained && last.target == first.source
    }
}

/// Outcome of comparing a compounded rate against break-even.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profitability {
    Profitable,
    Neutral,
    Unprofitable,
}

/// A cycle together with its compounded exchange rate.
///
/// Fields:
/// - `cycle`: The trade sequence.
/// - `compounded_rate`: Product of all rates along the cycle, accumulated in cycle order.
/// - `profitability`: Classification of `compounded_rate` against 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCycle {
    pub cycle: Cycle,
    pub compounded_rate: f64,
    pub profitability: Profitability,
}

impl ScoredCycle {
    pub fn is_profitable(&self) -> bool {
        self.profitability == Profitability::Profitable
    }

    /// Net gain in percent, e.g. `1.2` → `20.0`.
    pub fn profit_percentage(&self) -> f64 {
        (self.compounded_rate - 1.0) * 100.0
    }

    /// The ordered `(from, to, rate)` steps consumed by the report writer.
    pub fn trades(&self) -> Vec<Trade> {
        self.cycle.edges.iter().map(ExchangeEdge::as_trade).collect()
    }
}
