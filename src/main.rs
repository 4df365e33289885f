use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use fryer_alerts::{AlertPipeline, PipelineConfig};

#[derive(Parser)]
#[command(name = "process-alerts")]
#[command(about = "Extract BasketNotEmpty alerts from exported JSON logs into a sorted report")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Directory of exported alert JSON files (overrides config)
    #[arg(short, long)]
    alerts_dir: Option<PathBuf>,

    /// Output report path (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let mut config = match PipelineConfig::from_file(&args.config) {
        Ok(config) => {
            info!("✅ Loaded configuration from {:?}", args.config);
            config
        }
        Err(e) => {
            warn!(
                "Failed to load config from {:?}: {}. Using default configuration.",
                args.config, e
            );
            PipelineConfig::default()
        }
    };

    if let Some(alerts_dir) = args.alerts_dir {
        config.alerts_dir = alerts_dir;
    }
    if let Some(output) = args.output {
        config.output_file = output;
    }

    info!("🚀 Processing alerts from {:?}", config.alerts_dir);

    let pipeline = AlertPipeline::new(config);
    let report = pipeline.run()?;

    if report.files_skipped > 0 {
        warn!("Skipped {} malformed files", report.files_skipped);
    }

    info!(
        "📊 Extracted {} BasketNotEmpty alerts from {} files",
        report.records.len(),
        report.files_processed
    );

    if let Some((first, last)) = report.date_range() {
        info!("Date range: {} to {}", first, last);
        info!("Alerts by basket:");
        for (basket, count) in report.basket_counts() {
            info!("  {}: {}", basket, count);
        }
    }

    pipeline.write_output(&report)?;
    info!("✅ Data saved to: {}", pipeline.output_file().display());

    Ok(())
}
