use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::error::Error;
use super::types::QuoteBook;
use common::types::ScoredCycle;

/// Renders the search outcome in the barter output format.
///
/// With an arbitrage:
///
/// ```text
/// yes
/// <from> <to> <weightA> <weightB>
/// ...
/// one kg of product <start> gets <rate> kg of product <start> from the above sequence.
/// ```
///
/// Each trade shows the weights of the quote it came from. A trade missing
/// from `book` falls back to `<from> <to> <rate>`.
///
/// Without one, the single line `no`.
pub fn render_report(result: Option<&ScoredCycle>, book: &QuoteBook) -> String {
    let Some(scored) = result else {
        return "no\n".to_string();
    };

    let mut out = String::from("yes\n");
    for (from, to, rate) in scored.trades() {
        // Writing into a String cannot fail.
        let _ = match book.weights(from, to, rate) {
            Some((weight_a, weight_b)) => writeln!(out, "{} {} {} {}", from, to, weight_a, weight_b),
            None => writeln!(out, "{} {} {}", from, to, rate),
        };
    }

    if let Some(start) = scored.cycle.start() {
        let _ = writeln!(
            out,
            "one kg of product {} gets {} kg of product {} from the above sequence.",
            start, scored.compounded_rate, start
        );
    }

    out
}

/// Writes the rendered report to `path`, replacing any existing file.
pub fn write_report(
    path: &Path,
    result: Option<&ScoredCycle>,
    book: &QuoteBook,
) -> Result<(), Error> {
    fs::write(path, render_report(result, book))?;
    tracing::info!("Output written to {}", path.display());
    Ok(())
}
