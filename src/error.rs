use std::path::PathBuf;
use thiserror::Error;

use crate::process::mapper::MapError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("cannot read source {path:?}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed row at line {line} of {path:?}: {source}")]
    RowParse {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("line {line} of {path:?} has no column `{column}` (mapped to `{field}`)")]
    MissingField {
        path: PathBuf,
        line: u64,
        field: &'static str,
        column: String,
    },

    #[error("line {line} of {path:?}: cannot parse date `{value}`")]
    DateParse {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error("cannot write destination {path:?}: {source}")]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot load config {path:?}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Attach source location to a mapper failure.
    pub fn from_map(err: MapError, path: impl Into<PathBuf>, line: u64) -> Self {
        let path = path.into();
        match err {
            MapError::MissingField { field, column } => PipelineError::MissingField {
                path,
                line,
                field,
                column,
            },
            MapError::DateParse { value } => PipelineError::DateParse { path, line, value },
        }
    }

    /// Errors confined to a single row; everything else ends the run.
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            PipelineError::RowParse { .. }
                | PipelineError::MissingField { .. }
                | PipelineError::DateParse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
