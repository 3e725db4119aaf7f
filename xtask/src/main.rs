use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "typed-atomics workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the atomics benchmarks and write a markdown report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
    /// Run the loom model-checking tests
    Loom {
        /// Bound on preemptions per execution (LOOM_MAX_PREEMPTIONS)
        #[arg(long)]
        max_preemptions: Option<usize>,
    },
}

const BENCH: &str = "atomics_benchmark";
const LOOM_TEST: &str = "loom_model";

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
        Commands::Loom { max_preemptions } => run_loom(max_preemptions)?,
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!(">>> Benchmarking {BENCH}");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.env("CARGO_INCREMENTAL", "0");
    cmd.args(["bench", "--bench", BENCH]);

    // Args for the test runner (Criterion) go after --
    cmd.arg("--");
    if quick {
        cmd.arg("--measurement-time").arg("0.1");
        cmd.arg("--noplot");
        cmd.arg("--sample-size").arg("10");
    }

    let status = cmd.status().context("failed to spawn cargo bench")?;
    if !status.success() {
        anyhow::bail!("benchmark run failed");
    }
    println!("Finished in {:.2?}", start.elapsed());
    Ok(())
}

fn run_loom(max_preemptions: Option<usize>) -> Result<()> {
    println!(">>> Model checking with loom");

    let mut cmd = Command::new("cargo");
    cmd.env("RUSTFLAGS", "--cfg loom");
    if let Some(n) = max_preemptions {
        cmd.env("LOOM_MAX_PREEMPTIONS", n.to_string());
    }
    cmd.args(["test", "--test", LOOM_TEST, "--release"]);

    let status = cmd.status().context("failed to spawn cargo test")?;
    if !status.success() {
        anyhow::bail!("loom model checking failed");
    }
    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    // group -> benchmark -> mean ns/iter
    let mut results: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    collect_results(criterion_dir, criterion_dir, &mut results);

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)?;

    writeln!(file, "# Atomics Benchmark Report")?;
    for (group, benches) in &results {
        writeln!(file, "\n## {group}\n")?;
        writeln!(file, "| Benchmark | Mean (ns/iter) | Ops/s |")?;
        writeln!(file, "|---|---|---|")?;
        for (name, time_ns) in benches {
            writeln!(file, "| {name} | {time_ns:.2} | {} |", format_ops(1e9 / time_ns))?;
        }
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

/// Walks criterion's output tree. Layout:
/// `<group>/<bench>[/<param>]/new/estimates.json`.
fn collect_results(root: &Path, dir: &Path, results: &mut BTreeMap<String, BTreeMap<String, f64>>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if path.file_name().and_then(|s| s.to_str()) == Some("report") {
                continue;
            }
            collect_results(root, &path, results);
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }
        // Only the latest run; `base` and named baselines are older copies.
        let Some(run_dir) = path.parent() else { continue };
        if run_dir.file_name().and_then(|s| s.to_str()) != Some("new") {
            continue;
        }
        let Some(bench_dir) = run_dir.parent() else { continue };
        let Ok(relative) = bench_dir.strip_prefix(root) else { continue };

        let mut parts = relative.iter().filter_map(|s| s.to_str());
        let Some(group) = parts.next() else { continue };
        let name = parts.collect::<Vec<_>>().join("/");

        let Some(time_ns) = mean_estimate(&path) else { continue };
        if time_ns > 0.0 {
            results.entry(group.to_string()).or_default().insert(name, time_ns);
        }
    }
}

fn mean_estimate(path: &Path) -> Option<f64> {
    let content = fs::read_to_string(path).ok()?;
    let json = serde_json::from_str::<serde_json::Value>(&content).ok()?;
    json.get("mean")?.get("point_estimate")?.as_f64()
}
