//! Price heatmap generator.
//!
//! Reads sold-object prices and renders a smoothed price-per-area heatmap
//! as a PNG, or exports the color legend as JSON.

mod config;
mod loader;
mod progress;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_processor::Heatmap;
use renderer::png::encode_png;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{load_config, LoadedConfig};
use crate::progress::BarProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "heatmap")]
#[command(about = "Render a price-per-area heatmap from sold-object data")]
struct Args {
    /// Path to input data (CSV); read from stdin when omitted
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Path to output
    #[arg(short, long, default_value = "heatmap.png")]
    output: PathBuf,

    /// Path to config file
    #[arg(short, long, default_value = "config.yml", env = "HEATMAP_CONFIG")]
    config: PathBuf,

    /// Write the bucket list as JSON to the output path and exit
    #[arg(short, long)]
    buckets: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level, args.log_format)?;
    run(args).await
}

fn init_tracing(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args.config)?;
    info!(
        name = config.name.as_deref().unwrap_or("unnamed"),
        width = config.heatmap.width,
        height = config.heatmap.height,
        "Loaded configuration"
    );
    debug!(base_dir = %config.base_dir.display(), "Configuration directory");

    if args.buckets {
        let count = write_buckets(&config, &args.output)?;
        info!(buckets = count, path = %args.output.display(), "Wrote bucket list");
        return Ok(());
    }

    let samples = loader::load_input(args.data.as_deref()).context("Failed to load price data")?;
    info!("{} records loaded", samples.len());

    let progress = Arc::new(if args.no_progress {
        BarProgress::hidden()
    } else {
        BarProgress::new()
    });

    let heatmap = Heatmap::new(config.heatmap)?
        .with_kernel(config.kernel)
        .with_evaluator(config.evaluator)
        .with_progress(progress.clone());

    let image = heatmap.build(&samples).await?;
    progress.finish();

    let png = encode_png(&image).context("Failed to encode PNG")?;
    fs::write(&args.output, &png)
        .with_context(|| format!("Could not create file: {}", args.output.display()))?;

    info!(bytes = png.len(), "Encoded heatmap");
    println!("Saved image: {}", args.output.display());
    Ok(())
}

/// Serialize the legend for `config` to `path`, returning the entry count.
fn write_buckets(config: &LoadedConfig, path: &Path) -> Result<usize> {
    let buckets = grid_processor::bucket_list(&config.heatmap)?;
    let json = serde_json::to_vec(&buckets).context("Failed to serialize bucket list")?;
    fs::write(path, json)
        .with_context(|| format!("Could not write bucket list to {}", path.display()))?;
    Ok(buckets.len())
}
