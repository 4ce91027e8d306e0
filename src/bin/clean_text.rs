use anyhow::{Context, Result};
use clap::Parser;
use postmerge::{
    clean, logging,
    sentiment::{self, Lexicon, LexiconAnalyzer, SentimentAnalyzer, VaderAnalyzer},
};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};
use tracing::info;

/// Clean and score stdin lines: `cleaned<TAB>score<TAB>polarity` per line.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// VADER-format lexicon to score with instead of the stock VADER one
    #[arg(long)]
    lexicon: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(logging::env_filter("warn"))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let analyzer: Box<dyn SentimentAnalyzer> = match &args.lexicon {
        Some(path) => {
            let lexicon = Lexicon::from_vader_file(path)
                .with_context(|| format!("loading lexicon {}", path.display()))?;
            info!(entries = lexicon.len(), path = %path.display(), "lexicon loaded");
            Box::new(LexiconAnalyzer::new(lexicon))
        }
        None => Box::new(VaderAnalyzer::new()),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let cleaned = clean::normalize(&line);
        let s = sentiment::score(analyzer.as_ref(), &cleaned);
        writeln!(out, "{}\t{}\t{}", cleaned, s.score, s.polarity)?;
    }
    Ok(())
}
