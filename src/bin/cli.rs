//! CLI for the AMM fee-strategy competition harness: validate a submission's
//! source, or compile it and simulate head-to-head against a baseline.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use amm_fee_arena::compiler::SolidityCompiler;
use amm_fee_arena::sim::report::aggregate;
use amm_fee_arena::sim::runner::{run_simulations_parallel, SimulationBatchConfig};
use amm_fee_arena::types::config::SimulationConfig;
use amm_fee_arena::validator::SolidityValidator;

const CONTRACT_NAME: &str = "Strategy";

#[derive(Parser)]
#[command(name = "amm-arena", about = "CLI for the AMM fee-strategy competition harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and compile one or more Solidity strategy submissions.
    Validate { files: Vec<PathBuf> },
    /// Compile a submission against a baseline and simulate head-to-head.
    Run {
        submission: PathBuf,
        baseline: PathBuf,
        #[arg(long, default_value_t = 100)]
        simulations: usize,
        #[arg(long, default_value_t = 10_000)]
        steps: u32,
        #[arg(long, default_value_t = 0)]
        seed_start: u64,
        #[arg(long)]
        receipt: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Validate { files } => validate_cmd(&files),
        Commands::Run { submission, baseline, simulations, steps, seed_start, receipt } => {
            run_cmd(&submission, &baseline, simulations, steps, seed_start, receipt)
        }
    }
}

fn validate_cmd(files: &[PathBuf]) -> Result<()> {
    if files.is_empty() {
        bail!("Provide at least one strategy source file.");
    }

    for file in files {
        match compile_strategy(file) {
            Ok(_) => println!("[PASS] {}", file.display()),
            Err(e) => bail!("[FAIL] {}: {e}", file.display()),
        }
    }

    Ok(())
}

fn run_cmd(
    submission: &Path,
    baseline: &Path,
    simulations: usize,
    steps: u32,
    seed_start: u64,
    write_receipt: bool,
) -> Result<()> {
    let submission_bytecode = compile_strategy(submission)?;
    let baseline_bytecode = compile_strategy(baseline)?;

    let configs: Vec<SimulationConfig> = (0..simulations)
        .map(|i| SimulationConfig {
            n_steps: steps,
            seed: Some(seed_start + i as u64),
            ..SimulationConfig::default()
        })
        .collect();

    let batch = SimulationBatchConfig {
        submission_bytecode,
        baseline_bytecode,
        configs,
        n_workers: None,
    };

    let results = run_simulations_parallel(batch).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let aggregated = aggregate(&results);

    println!("\nStrategy                           Mean Edge    Std Edge  vs Other    Sharpe   W/L/D");
    println!("--------------------------------------------------------------------------------------");
    for r in &aggregated {
        println!(
            "{:<34} {:>10.2} {:>10.2} {:>9.2} {:>9.3}   {}/{}/{}",
            r.name, r.mean_edge, r.std_edge, r.edge_vs_other, r.sharpe, r.wins, r.losses, r.draws
        );
    }

    if write_receipt {
        let receipt = write_submission_receipt(submission, baseline, &aggregated, simulations, steps, seed_start)?;
        println!("\nReceipt written to {}", receipt.display());
    }

    Ok(())
}

/// Validate then compile `file`'s Solidity source, returning creation bytecode.
fn compile_strategy(file: &Path) -> Result<Vec<u8>> {
    if !file.exists() {
        bail!("strategy file not found: {}", file.display());
    }

    let source = fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;

    let validation = SolidityValidator::new().validate(&source);
    if !validation.valid {
        bail!("validation failed: {}", validation.errors.join("; "));
    }

    let artifact = SolidityCompiler::new().compile_named(&source, CONTRACT_NAME);
    if !artifact.success {
        bail!("compilation failed: {}", artifact.errors.join("; "));
    }

    tracing::info!(file = %file.display(), "strategy compiled");
    Ok(artifact.bytecode)
}

fn write_submission_receipt(
    submission: &Path,
    baseline: &Path,
    results: &[amm_fee_arena::sim::AggregatedResult],
    simulations: usize,
    steps: u32,
    seed_start: u64,
) -> Result<PathBuf> {
    let ts = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let out_dir = PathBuf::from("submissions").join(format!("submission_{ts}"));
    fs::create_dir_all(&out_dir)?;

    for file in [submission, baseline] {
        let dest = out_dir.join(file.file_name().context("invalid source filename")?);
        fs::copy(file, dest)?;
    }

    let payload = json!({
        "timestamp": ts,
        "simulations": simulations,
        "steps": steps,
        "seed_start": seed_start,
        "strategies": results.iter().map(|r| json!({
            "name": r.name,
            "mean_edge": r.mean_edge,
            "std_edge": r.std_edge,
            "edge_vs_other": r.edge_vs_other,
            "sharpe": r.sharpe,
            "wins": r.wins,
            "losses": r.losses,
            "draws": r.draws,
        })).collect::<Vec<_>>(),
    });

    let receipt = out_dir.join("receipt.json");
    fs::write(&receipt, serde_json::to_vec_pretty(&payload)?)?;
    Ok(receipt)
}
