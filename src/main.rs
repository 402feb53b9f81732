//! # `alert-extract`
//!
//! Converts a folder of Outlook `.msg` alert exports into `alerts.json`.
//!
//! ```bash
//! alert-extract ./inbox ./out
//! RUST_LOG=alert_extract=debug alert-extract ./inbox ./out --jobs 4
//! ```

use alert_extract::{BatchIngester, IngestConfig, MsgDecoder, save_batch};
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Extract structured rail alerts from exported `.msg` emails.
#[derive(Parser)]
#[command(name = "alert-extract", version)]
struct Cli {
    /// Folder containing `.msg` exports.
    input: Option<PathBuf>,

    /// Folder to write `alerts.json` into; created if missing.
    output: Option<PathBuf>,

    /// Number of files to process in parallel.
    #[arg(long, short, default_value_t = 1)]
    jobs: usize,

    /// Container file extension to pick up.
    #[arg(long, default_value = alert_extract::DEFAULT_EXTENSION)]
    extension: String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "alert_extract=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let (Some(input), Some(output)) = (cli.input, cli.output) else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = IngestConfig::default()
        .with_extension(cli.extension)
        .with_workers(cli.jobs);
    let ingester = BatchIngester::new(MsgDecoder::new(), config);

    let batch = ingester
        .ingest(&input)
        .with_context(|| format!("Could not ingest {}", input.display()))?;

    let path = save_batch(&output, &batch)
        .with_context(|| format!("Could not save alerts to {}", output.display()))?;
    println!("Saved JSON to -- {}", path.display());

    Ok(())
}
