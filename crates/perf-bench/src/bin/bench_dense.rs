use std::hint::black_box;
use std::time::Instant;

use barter_core::selector::find_best_arbitrage;
use perf_bench::*;

fn main() {
    let edges = generate_dense_edges(DENSE_PRODUCTS);
    let graph = match build_graph(DENSE_PRODUCTS, &edges) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Invalid benchmark graph: {}", e);
            std::process::exit(1);
        }
    };

    let start_time = Instant::now();

    // Every quote is examined once; most of them are cross or back edges.
    let best = find_best_arbitrage(&graph);

    let elapsed_time = start_time.elapsed();

    let checksum = match black_box(best) {
        Ok(Some(cycle)) => cycle.compounded_rate,
        Ok(None) => 0.0,
        Err(e) => {
            eprintln!("Search failed: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "--- Dense Benchmark Results ({} Products, {} Quotes) ---",
        DENSE_PRODUCTS,
        edges.len()
    );
    println!("Checksum: {:.10}", checksum);
    println!("Elapsed Time: {:?}", elapsed_time);
}
