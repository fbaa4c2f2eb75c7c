use anyhow::Context;
use clap::Parser;
use mor_compaction::engine::compaction::{
    CompactionConfig, CompactionOperation, CompactionPlanner, FileSlice, StrategyKind,
};
use mor_compaction::logging;
use mor_compaction::shared::config::model::CONFIG_PATH_ENV;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "plan_compaction")]
#[command(about = "Select and order file groups for the next compaction", long_about = None)]
struct Args {
    /// JSON array of file slices eligible for compaction
    #[arg(short, long)]
    input: PathBuf,

    /// JSON array of operations owned by compactions still running
    #[arg(short, long)]
    pending: Option<PathBuf>,

    /// Override the configured strategy (e.g. bounded_io, day_based)
    #[arg(short, long)]
    strategy: Option<StrategyKind>,

    /// Settings file, without extension. Defaults to $MOR_COMPACTION_CONFIG or ./config
    #[arg(short, long)]
    config: Option<String>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.config {
        // SAFETY: set before any other thread exists and before CONFIG is first read
        unsafe { std::env::set_var(CONFIG_PATH_ENV, path) };
    }
    logging::init()?;

    let mut config = CompactionConfig::from_app_config()?;
    if let Some(strategy) = args.strategy {
        config = config.with_strategy(strategy);
    }
    let planner = CompactionPlanner::new(config);

    let slices: Vec<FileSlice> = read_json(&args.input)?;
    let pending: Vec<CompactionOperation> = match &args.pending {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    info!(
        strategy = %planner.strategy(),
        slices = slices.len(),
        pending = pending.len(),
        "Planning compaction"
    );

    let candidates = planner.build_operations(&slices);
    let plan = planner.plan(candidates, &pending).inspect_err(|e| e.log_error())?;

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
