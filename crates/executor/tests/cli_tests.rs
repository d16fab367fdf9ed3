use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

const BARTER: &str = env!("CARGO_BIN_EXE_barter");

/// Every ordered pair of distinct products, rate slightly below parity.
fn complete_market(num_products: usize) -> String {
    let mut input = format!("{}\n", num_products);
    for a in 1..=num_products {
        for b in 1..=num_products {
            if a != b {
                let _ = writeln!(input, "{} {} 1.0 0.999", a, b);
            }
        }
    }
    input
}

fn run_to_exit(mut command: Command, limit: Duration) -> Option<std::process::ExitStatus> {
    let mut child = command
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to start barter");

    let started = Instant::now();
    while started.elapsed() < limit {
        if let Some(status) = child.try_wait().expect("Failed to poll barter") {
            return Some(status);
        }
        thread::sleep(Duration::from_millis(20));
    }

    let _ = child.kill();
    let _ = child.wait();
    None
}

#[test]
fn timed_out_search_exits_without_writing_a_report() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = dir.path().join("market.txt");
    let output = dir.path().join("report.txt");
    fs::write(&input, complete_market(300)).expect("Failed to write market");

    let mut command = Command::new(BARTER);
    command
        .arg(&input)
        .arg(&output)
        .current_dir(dir.path())
        .env("EXECUTOR_SEARCH__TIMEOUT_MS", "1");

    let status = run_to_exit(command, Duration::from_secs(30)).expect("barter did not exit after the timeout");

    assert!(!status.success());
    assert!(!output.exists());
}

#[test]
fn positional_arguments_write_the_report() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let output = dir.path().join("report.txt");
    let demo = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/input.txt");

    let mut command = Command::new(BARTER);
    command.arg(&demo).arg(&output).current_dir(dir.path());

    let status = run_to_exit(command, Duration::from_secs(30)).expect("barter did not exit");

    assert!(status.success());
    let report = fs::read_to_string(&output).expect("report was not written");
    assert!(report.starts_with("yes\n1 2 1 2\n2 3 1 3\n3 1 5 1\n"));
}
