use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Component, Path, PathBuf},
};

use crate::clean::Shortcodes;
use crate::error::{PipelineError, Result};
use crate::process::{mapper::ColumnMapping, record::Enricher, RowErrorPolicy};
use crate::sentiment::{Lexicon, LexiconAnalyzer, VaderAnalyzer};

pub const DEFAULT_DESTINATION: &str = "datasets/final.csv";

/// A whole batch run: where to write, and which sources to read in what order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_destination")]
    pub destination: PathBuf,
    #[serde(default)]
    pub on_row_error: RowErrorPolicy,
    #[serde(default)]
    pub sentiment: SentimentConfig,
    pub sources: Vec<SourceSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// VADER-format lexicon file; the stock VADER lexicon is used when absent.
    #[serde(default)]
    pub lexicon: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub columns: ColumnMapping,
}

impl SourceSpec {
    pub fn new(path: impl Into<PathBuf>, columns: ColumnMapping) -> Self {
        Self {
            path: path.into(),
            columns,
        }
    }
}

fn default_destination() -> PathBuf {
    PathBuf::from(DEFAULT_DESTINATION)
}

impl Default for Config {
    /// The three tweet exports merged into `datasets/final.csv`.
    fn default() -> Self {
        Self {
            destination: default_destination(),
            on_row_error: RowErrorPolicy::default(),
            sentiment: SentimentConfig::default(),
            sources: vec![
                SourceSpec::new(
                    "datasets/tweets01.csv",
                    ColumnMapping::new("Date", "Screen_name", "Tweet"),
                ),
                SourceSpec::new(
                    "datasets/tweets02.csv",
                    ColumnMapping::new("timestamp", "user", "text").with_delimiter(b';'),
                ),
                SourceSpec::new(
                    "datasets/tweets03.csv",
                    ColumnMapping::new("date", "user_name", "text").with_delimiter(b';'),
                ),
            ],
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PipelineError::ConfigFile {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            PipelineError::Config(msg) => PipelineError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| PipelineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(PipelineError::Config("no sources configured".into()));
        }
        let destination = resolved(&self.destination);
        if let Some(src) = self
            .sources
            .iter()
            .find(|s| resolved(&s.path) == destination)
        {
            return Err(PipelineError::Config(format!(
                "source {} is also the destination",
                src.path.display()
            )));
        }
        Ok(())
    }

    /// Build the cleaning + scoring stage this config asks for.
    pub fn enricher(&self) -> Result<Enricher> {
        Ok(match &self.sentiment.lexicon {
            Some(path) => Enricher::new(
                LexiconAnalyzer::new(Lexicon::from_vader_file(path)?),
                Shortcodes,
            ),
            None => Enricher::new(VaderAnalyzer::new(), Shortcodes),
        })
    }
}

/// Absolute form of `path` for identity checks: the real path when it exists,
/// otherwise the path against the working directory with `.`/`..` folded.
fn resolved(path: &Path) -> PathBuf {
    if let Ok(real) = fs::canonicalize(path) {
        return real;
    }
    let absolute = match env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    };
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_matches_tweet_exports() {
        let cfg = Config::default();
        assert_eq!(cfg.destination, PathBuf::from("datasets/final.csv"));
        assert_eq!(cfg.on_row_error, RowErrorPolicy::Abort);
        assert_eq!(cfg.sources.len(), 3);
        assert_eq!(cfg.sources[0].columns.delimiter, b',');
        assert_eq!(cfg.sources[1].columns.date, "timestamp");
        assert_eq!(cfg.sources[2].columns.user, "user_name");
        assert_eq!(cfg.sources[2].columns.delimiter, b';');
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_from_yaml() {
        let cfg = Config::from_yaml(
            r#"
destination: out/merged.csv
on_row_error: skip
sources:
  - path: a.csv
    columns: { date: Date, user: Screen_name, text: Tweet }
  - path: b.csv
    columns: { date: timestamp, user: user, text: text, delimiter: ";" }
"#,
        )
        .unwrap();
        assert_eq!(cfg.destination, PathBuf::from("out/merged.csv"));
        assert_eq!(cfg.on_row_error, RowErrorPolicy::Skip);
        assert_eq!(cfg.sentiment.lexicon, None);
        assert_eq!(cfg.sources[1].columns.delimiter, b';');
    }

    #[test]
    fn test_sample_file_matches_default() {
        let cfg = Config::from_yaml(include_str!("../pipeline.yaml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_yaml_round_trips_default() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert_eq!(Config::from_yaml(&yaml).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            Config::from_yaml("sources: []"),
            Err(PipelineError::Config(_))
        ));
        assert!(Config::from_yaml("destination: x.csv").is_err());
        assert!(Config::from_yaml(
            "destination: same.csv\nsources:\n  - path: same.csv\n    columns: { date: d, user: u, text: t }\n"
        )
        .is_err());
    }

    #[test]
    fn test_destination_spelled_differently_from_source() {
        for destination in ["./datasets/final.csv", "datasets/../datasets/final.csv"] {
            let cfg = Config {
                destination: PathBuf::from(destination),
                sources: vec![SourceSpec::new(
                    "datasets/final.csv",
                    ColumnMapping::new("d", "u", "t"),
                )],
                ..Config::default()
            };
            assert!(
                matches!(cfg.validate(), Err(PipelineError::Config(_))),
                "{destination}"
            );
        }

        let dir = tempdir().unwrap();
        let existing = dir.path().join("posts.csv");
        fs::write(&existing, "d,u,t\n").unwrap();
        let cfg = Config {
            destination: dir.path().join(".").join("posts.csv"),
            sources: vec![SourceSpec::new(&existing, ColumnMapping::new("d", "u", "t"))],
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_default_enricher_uses_full_vader_lexicon() {
        let enricher = Config::default().enricher().unwrap();
        let row = |text: &str| crate::process::mapper::MappedRow {
            date: chrono::NaiveDate::from_ymd_opt(2020, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            user: "u".into(),
            text: text.into(),
        };
        assert!(enricher.enrich(row("I adore this")).polarity > 0.3);
        assert!(enricher.enrich(row("what a tragedy")).polarity < -0.3);
    }

    #[test]
    fn test_load_and_lexicon() {
        let dir = tempdir().unwrap();
        let lexicon = dir.path().join("lexicon.txt");
        fs::write(&lexicon, "splendid\t3.0\t0.5\t[]\n").unwrap();
        let cfg_path = dir.path().join("pipeline.yaml");
        fs::write(
            &cfg_path,
            format!(
                "sentiment:\n  lexicon: {}\nsources:\n  - path: a.csv\n    columns: {{ date: d, user: u, text: t }}\n",
                lexicon.display()
            ),
        )
        .unwrap();

        let cfg = Config::load(&cfg_path).unwrap();
        let enricher = cfg.enricher().unwrap();
        let rec = enricher.enrich(crate::process::mapper::MappedRow {
            date: chrono::NaiveDate::from_ymd_opt(2020, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            user: "u".into(),
            text: "simply splendid".into(),
        });
        assert!(rec.polarity > 0.0);

        assert!(matches!(
            Config::load(dir.path().join("missing.yaml")),
            Err(PipelineError::ConfigFile { .. })
        ));
    }
}
