use std::hint::black_box;
use std::time::Instant;

use barter_core::selector::find_best_arbitrage;
use perf_bench::*;

fn main() {
    let graph = match build_graph(RING_PRODUCTS, &generate_ring_edges(RING_PRODUCTS)) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Invalid benchmark graph: {}", e);
            std::process::exit(1);
        }
    };

    let start_time = Instant::now();

    // One root, one descent through every product, one back edge.
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

    println!("--- Ring Benchmark Results ({} Products) ---", RING_PRODUCTS);
    println!("Checksum: {:.10}", checksum);
    println!("Elapsed Time: {:?}", elapsed_time);
}
