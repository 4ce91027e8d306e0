use csv::{ReaderBuilder, StringRecord};
use std::{
    fs::File,
    path::{Path, PathBuf},
};

use crate::error::{PipelineError, Result};
use crate::process::mapper::RawRow;

/// Streaming reader over one delimited source with a header row.
pub struct SourceReader {
    path: PathBuf,
    headers: StringRecord,
    reader: csv::Reader<File>,
}

impl SourceReader {
    pub fn open<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_path(&path)
            .map_err(|source| PipelineError::SourceRead {
                path: path.clone(),
                source,
            })?;

        let headers = reader
            .headers()
            .map_err(|source| PipelineError::SourceRead {
                path: path.clone(),
                source,
            })?
            .clone();

        Ok(Self {
            path,
            headers,
            reader,
        })
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    /// Lazily yield `(line, row)` pairs in file order. `line` is the 1-based
    /// physical line the record starts on.
    pub fn rows(&mut self) -> impl Iterator<Item = Result<(u64, RawRow)>> + '_ {
        let headers = &self.headers;
        let path = &self.path;
        self.reader.records().map(move |result| match result {
            Ok(record) => {
                let line = record.position().map_or(0, |p| p.line());
                let row: RawRow = headers
                    .iter()
                    .zip(record.iter())
                    .map(|(h, v)| (h.to_string(), v.to_string()))
                    .collect();
                Ok((line, row))
            }
            Err(source) if source.is_io_error() => Err(PipelineError::SourceRead {
                path: path.clone(),
                source,
            }),
            Err(source) => Err(PipelineError::RowParse {
                path: path.clone(),
                line: source.position().map_or(0, |p| p.line()),
                source,
            }),
        })
    }
}
