use csv::{QuoteStyle, WriterBuilder};
use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::process::record::{CanonicalRecord, HEADER};

/// The one writer for the unified output file.
pub struct OutputSink {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows_written: u64,
}

impl OutputSink {
    /// Truncate (or create) `path` and write the header line.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_err(&path, e.into()))?;
        }
        let file = File::create(&path).map_err(|e| write_err(&path, e.into()))?;

        let mut sink = Self::from_file(path, file);
        sink.writer
            .write_record(HEADER)
            .map_err(|e| write_err(&sink.path, e))?;
        debug!(path = %sink.path.display(), "destination created");
        Ok(sink)
    }

    /// Append to an existing destination that already carries its header.
    pub fn open_append<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(|e| write_err(&path, e.into()))?;
        Ok(Self::from_file(path, file))
    }

    fn from_file(path: PathBuf, file: File) -> Self {
        let writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Necessary)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);
        Self {
            path,
            writer,
            rows_written: 0,
        }
    }

    pub fn append(&mut self, record: &CanonicalRecord) -> Result<()> {
        self.writer
            .write_record(record.to_fields())
            .map_err(|e| write_err(&self.path, e))?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| write_err(&self.path, e.into()))
    }

    /// Rows appended through this handle (header excluded).
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }
}

fn write_err(path: &Path, source: csv::Error) -> PipelineError {
    PipelineError::DestinationWrite {
        path: path.to_path_buf(),
        source,
    }
}
