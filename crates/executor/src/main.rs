pub mod config;
pub mod csv_source;
pub mod error;
pub mod searcher;
pub mod simulator;
pub mod text_source;
pub mod types;
pub mod writer;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use barter_core::{ArbitrageSelector, ProfitEvaluator};
use csv_source::CsvSource;
use error::Error;
use searcher::ArbSearcher;
use simulator::SimulatorSource;
use text_source::TextSource;
use types::{DataSource, Market, MarketSource, QuoteBook};

const DEFAULT_INPUT_PATH: &str = "input.txt";

/// Parsed command line: where to read the market and, optionally, where to write.
#[derive(Debug, PartialEq, Eq)]
struct Args {
    source: DataSource,
    output_path: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = parse_args();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("barter failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("barter=info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

async fn run(args: Args) -> Result<(), Error> {
    let config = config::load_config()?;

    let market = load_market(&args.source, &config).await?;
    tracing::info!(
        "Loaded market: {} products, {} quotes.",
        market.num_products,
        market.quotes.len()
    );
    let book = QuoteBook::from_quotes(&market.quotes);
    let graph = market.into_graph()?;

    let selector = ArbitrageSelector::new(
        ProfitEvaluator::new(config.search.epsilon),
        config.search.mode.into(),
    );
    tracing::info!("Search mode: {:?}", selector.mode());

    let searcher = ArbSearcher::new(selector, config.search.timeout_ms);
    let best = searcher.search_for_arbs(graph).await?;

    let output_path = PathBuf::from(args.output_path.unwrap_or(config.writer.output_path));
    writer::write_report(&output_path, best.as_ref(), &book)
}

/// Picks the market source for the requested mode and loads it.
async fn load_market(source: &DataSource, config: &config::Config) -> Result<Market, Error> {
    match source {
        DataSource::TXT(path) => {
            tracing::info!("Reading barter input from {}...", path);
            TextSource::new(path.clone()).load().await
        }
        DataSource::CSV(path) => {
            tracing::info!("Reading CSV quotes from {}...", path);
            CsvSource::new(path.clone()).load().await
        }
        DataSource::SIM => {
            tracing::info!("Generating simulated market...");
            SimulatorSource::new(config.simulator.clone()).load().await
        }
    }
}

/// Parse command-line arguments to determine data source and output path
fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();

    match parse_args_from(&args) {
        Some(parsed) => parsed,
        None => {
            eprintln!(
                "Usage: {0} [TXT|CSV|SIM] [input_path] [output_path]\n       {0} [input_path] [output_path]\n  - TXT: read the barter text format (default: {1})\n  - CSV: read quotes from a CSV file\n  - SIM: search a simulated market",
                args.first().map(String::as_str).unwrap_or("barter"),
                DEFAULT_INPUT_PATH
            );
            std::process::exit(1);
        }
    }
}

fn parse_args_from(args: &[String]) -> Option<Args> {
    let Some(first) = args.get(1) else {
        return Some(Args {
            source: DataSource::TXT(DEFAULT_INPUT_PATH.to_string()),
            output_path: None,
        });
    };

    match first.to_lowercase().as_str() {
        "txt" => Some(Args {
            source: DataSource::TXT(
                args.get(2)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_INPUT_PATH.to_string()),
            ),
            output_path: args.get(3).cloned(),
        }),
        "csv" => Some(Args {
            source: DataSource::CSV(args.get(2)?.clone()),
            output_path: args.get(3).cloned(),
        }),
        // No input file in simulation mode, so the second argument is the output.
        "sim" => Some(Args {
            source: DataSource::SIM,
            output_path: args.get(2).cloned(),
        }),
        // Plain `barter <input> [output]` reads the text format.
        _ => Some(Args {
            source: DataSource::TXT(first.clone()),
            output_path: args.get(2).cloned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_to_text_input() {
        let args = parse_args_from(&argv(&["barter"])).unwrap();
        assert_eq!(args.source, DataSource::TXT("input.txt".to_string()));
        assert_eq!(args.output_path, None);
    }

    #[test]
    fn test_text_mode_with_paths() {
        let args = parse_args_from(&argv(&["barter", "TXT", "in.txt", "out.txt"])).unwrap();
        assert_eq!(args.source, DataSource::TXT("in.txt".to_string()));
        assert_eq!(args.output_path, Some("out.txt".to_string()));
    }

    #[test]
    fn test_csv_mode_requires_path() {
        assert!(parse_args_from(&argv(&["barter", "csv"])).is_none());

        let args = parse_args_from(&argv(&["barter", "csv", "quotes.csv"])).unwrap();
        assert_eq!(args.source, DataSource::CSV("quotes.csv".to_string()));
    }

    #[test]
    fn test_sim_mode_takes_output_only() {
        let args = parse_args_from(&argv(&["barter", "sim", "sim_out.txt"])).unwrap();
        assert_eq!(args.source, DataSource::SIM);
        assert_eq!(args.output_path, Some("sim_out.txt".to_string()));
    }

    #[test]
    fn test_positional_input_and_output() {
        let args = parse_args_from(&argv(&["barter", "in.txt", "out.txt"])).unwrap();
        assert_eq!(args.source, DataSource::TXT("in.txt".to_string()));
        assert_eq!(args.output_path, Some("out.txt".to_string()));

        let args = parse_args_from(&argv(&["barter", "market.txt"])).unwrap();
        assert_eq!(args.source, DataSource::TXT("market.txt".to_string()));
        assert_eq!(args.output_path, None);
    }

    fn demo_path(name: &str) -> String {
        format!("{}/../../demos/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    async fn search_demo(source: DataSource) -> String {
        let config_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("Config.toml");
        let config = config::load_config_from(&config_path).unwrap();

        let market = load_market(&source, &config).await.unwrap();
        let book = QuoteBook::from_quotes(&market.quotes);
        let graph = market.into_graph().unwrap();
        let best = ArbSearcher::new(ArbitrageSelector::default(), config.search.timeout_ms)
            .search_for_arbs(graph)
            .await
            .unwrap();

        writer::render_report(best.as_ref(), &book)
    }

    #[tokio::test]
    async fn test_text_demo_end_to_end() {
        let report = search_demo(DataSource::TXT(demo_path("input.txt"))).await;

        assert!(report.starts_with("yes\n1 2 1 2\n2 3 1 3\n3 1 5 1\n"));
        assert!(report.contains("one kg of product 1 gets"));
    }

    #[tokio::test]
    async fn test_csv_demo_end_to_end() {
        // Quotes 1 → 2 at 2.0 and 3.0, 2 → 1 at 0.4: only the 3.0 quote profits.
        let report = search_demo(DataSource::CSV(demo_path("quotes.csv"))).await;

        assert!(report.starts_with("yes\n1 2 1 3\n2 1 5 2\n"));
    }
}
