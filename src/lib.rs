pub mod clean;
pub mod config;
pub mod error;
pub mod logging;
pub mod process;
pub mod sentiment;

pub use config::{Config, SourceSpec};
pub use error::{PipelineError, Result};
pub use process::{process_source, run, RowErrorPolicy, SourceStats};
