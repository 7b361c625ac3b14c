mod input;
mod model;
mod pipeline;
mod report;
mod serve;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::model::bins::BinProfile;

#[derive(Debug, Parser)]
#[command(name = "rfm-segment", version, about = "RFM customer segmentation from order line-items")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Segment a line-item file and write the result artifacts.
    Run {
        /// Line-item CSV, optionally gzipped.
        #[arg(long)]
        input: PathBuf,
        /// Output directory for segments.csv, summary.json, report.txt.
        #[arg(long)]
        out: PathBuf,
        /// JSON file with alternative bin boundaries.
        #[arg(long)]
        bins: Option<PathBuf>,
    },
    /// Serve the upload endpoint over HTTP.
    Serve {
        #[arg(long, default_value = "0.0.0.0:9696")]
        addr: SocketAddr,
        /// JSON file with alternative bin boundaries.
        #[arg(long)]
        bins: Option<PathBuf>,
    },
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Run { input, out, bins } => {
            let bins = resolve_bins(bins.as_deref())?;
            let items = input::load_line_items(&input).map_err(|e| e.to_string())?;
            let rows = pipeline::run_pipeline(&items, &bins).map_err(|e| e.to_string())?;
            let summary = report::build_summary(items.len(), &rows);
            report::write_reports(&rows, &summary, &out).map_err(|e| e.to_string())?;
            tracing::info!("wrote {} customers to {}", rows.len(), out.display());
            Ok(())
        }
        Command::Serve { addr, bins } => {
            let bins = resolve_bins(bins.as_deref())?;
            serve::serve(addr, bins).map_err(|e| e.to_string())
        }
    }
}

fn resolve_bins(path: Option<&std::path::Path>) -> Result<BinProfile, String> {
    match path {
        Some(path) => input::load_bin_profile(path).map_err(|e| e.to_string()),
        None => Ok(BinProfile::default_v1()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
