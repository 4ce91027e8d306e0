// src/process/mod.rs
pub mod date_parser;
pub mod mapper;
pub mod record;
pub mod sink;
pub mod source;

use serde::{Deserialize, Serialize};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{debug, info, trace, warn};

use crate::config::{Config, SourceSpec};
use crate::error::{PipelineError, Result};
use mapper::map_row;
use record::{CanonicalRecord, Enricher};
use sink::OutputSink;
use source::SourceReader;

/// What to do with a row that cannot be parsed, mapped or dated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowErrorPolicy {
    /// Stop reading the current source and fail the run.
    #[default]
    Abort,
    /// Log the row and carry on with the next one.
    Skip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceStats {
    pub path: PathBuf,
    pub rows_written: u64,
    pub rows_skipped: u64,
    pub elapsed: Duration,
}

/// Stream one source through map → clean → score → append.
///
/// Each row is fully written before the next one is read. The sink is flushed
/// before returning, whether the source finished or failed part way.
#[tracing::instrument(level = "info", skip_all, fields(path = %source.path.display()))]
pub fn process_source(
    source: &SourceSpec,
    enricher: &Enricher,
    sink: &mut OutputSink,
    policy: RowErrorPolicy,
) -> Result<SourceStats> {
    let start = Instant::now();
    let mut counts = RowCounts::default();

    let outcome = pump(source, enricher, sink, policy, &mut counts);
    let flushed = sink.flush();
    outcome?;
    flushed?;

    let stats = SourceStats {
        path: source.path.clone(),
        rows_written: counts.written,
        rows_skipped: counts.skipped,
        elapsed: start.elapsed(),
    };
    info!(
        rows_written = stats.rows_written,
        rows_skipped = stats.rows_skipped,
        elapsed = ?stats.elapsed,
        "source done"
    );
    Ok(stats)
}

#[derive(Debug, Default)]
struct RowCounts {
    written: u64,
    skipped: u64,
}

fn pump(
    source: &SourceSpec,
    enricher: &Enricher,
    sink: &mut OutputSink,
    policy: RowErrorPolicy,
    counts: &mut RowCounts,
) -> Result<()> {
    let mut reader = SourceReader::open(&source.path, source.columns.delimiter)?;
    debug!(columns = ?reader.headers().collect::<Vec<_>>(), "source opened");
    for record in canonical_records(&mut reader, source, enricher) {
        match record {
            Ok(record) => {
                sink.append(&record)?;
                counts.written += 1;
            }
            Err(err) if policy == RowErrorPolicy::Skip && err.is_row_level() => {
                warn!(error = %err, "skipping row");
                counts.skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// The lazy row pipeline for one source: raw rows mapped and enriched on demand.
fn canonical_records<'a>(
    reader: &'a mut SourceReader,
    source: &'a SourceSpec,
    enricher: &'a Enricher,
) -> impl Iterator<Item = Result<CanonicalRecord>> + 'a {
    reader.rows().map(move |row| -> Result<CanonicalRecord> {
        let (line, raw) = row?;
        let mapped = map_row(&raw, &source.columns)
            .map_err(|e| PipelineError::from_map(e, &source.path, line))?;
        trace!(line, user = %mapped.user, "row mapped");
        Ok(enricher.enrich(mapped))
    })
}

/// Run every configured source, in order, into a freshly created destination.
/// The first failing source stops the run; rows already written stay.
pub fn run(config: &Config) -> Result<Vec<SourceStats>> {
    config.validate()?;
    let enricher = config.enricher()?;
    let mut sink = OutputSink::create(&config.destination)?;
    info!(
        destination = %config.destination.display(),
        sources = config.sources.len(),
        "starting merge"
    );

    let mut all = Vec::with_capacity(config.sources.len());
    for source in &config.sources {
        all.push(process_source(
            source,
            &enricher,
            &mut sink,
            config.on_row_error,
        )?);
    }

    info!(rows = sink.rows_written(), "merge complete");
    Ok(all)
}
