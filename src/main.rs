use anyhow::{Context, Result};
use clap::Parser;
use postmerge::{logging, process, Config, RowErrorPolicy};
use std::path::PathBuf;
use tokio::time::Instant;
use tracing::{error, info};
use tracing_subscriber::fmt;

/// Merge social-media CSV exports into one cleaned, sentiment-scored CSV.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// YAML run description; the built-in three tweet exports when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the destination file
    #[arg(short, long)]
    destination: Option<PathBuf>,

    /// Log and drop rows that fail to parse, map or date instead of aborting
    #[arg(long)]
    skip_bad_rows: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    fmt::Subscriber::builder()
        .with_env_filter(logging::env_filter("info,postmerge=info"))
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) resolve config ───────────────────────────────────────────
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(dest) = args.destination {
        config.destination = dest;
    }
    if args.skip_bad_rows {
        config.on_row_error = RowErrorPolicy::Skip;
    }
    info!(
        destination = %config.destination.display(),
        sources = config.sources.len(),
        policy = ?config.on_row_error,
        "configured"
    );

    // ─── 3) merge, one source after another ──────────────────────────
    let start = Instant::now();
    let stats = tokio::task::spawn_blocking(move || process::run(&config))
        .await
        .context("merge task panicked")?;

    let stats = match stats {
        Ok(stats) => stats,
        Err(e) => {
            error!("merge failed: {}", e);
            return Err(e).context("merging sources");
        }
    };

    for s in &stats {
        info!(
            path = %s.path.display(),
            written = s.rows_written,
            skipped = s.rows_skipped,
            elapsed = ?s.elapsed,
            "source summary"
        );
    }
    let total: u64 = stats.iter().map(|s| s.rows_written).sum();
    info!(rows = total, elapsed = ?start.elapsed(), "all done");
    Ok(())
}
