//! Command-line driver: reads a DIMACS CNF instance, solves it, and prints a
//! single JSON result line.

use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cdcl_sat::Solver;

#[derive(Parser)]
#[command(name = "cdcl-sat", about = "A CDCL Boolean satisfiability solver")]
struct Args {
    /// Path to a DIMACS CNF file, or `-`/omitted for stdin.
    instance: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report {
    instance: String,
    time_ms: f64,
    result: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<Vec<i32>>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(instance: &Option<PathBuf>) -> Result<String> {
    match instance {
        None => read_stdin(),
        Some(path) if path.as_os_str() == "-" => read_stdin(),
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
    }
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading stdin")?;
    Ok(buf)
}

fn instance_label(instance: &Option<PathBuf>) -> String {
    match instance {
        None => "-".to_string(),
        Some(path) if path.as_os_str() == "-" => "-".to_string(),
        Some(path) => path.display().to_string(),
    }
}

fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let label = instance_label(&args.instance);
    let input = read_input(&args.instance)?;

    let mut solver = Solver::from_dimacs(&input).context("parsing DIMACS input")?;

    let start = Instant::now();
    let outcome = solver.solve();
    let time_ms = start.elapsed().as_secs_f64() * 1000.0;

    let report = match outcome {
        cdcl_sat::SolverResult::Sat(model) => Report {
            instance: label,
            time_ms,
            result: "SAT",
            solution: Some(model.as_vec()),
        },
        cdcl_sat::SolverResult::Unsat => Report {
            instance: label,
            time_ms,
            result: "UNSAT",
            solution: None,
        },
    };

    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
