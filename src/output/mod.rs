//! Output module for crawl results and profiling reports
//!
//! This module handles:
//! - Writing the crawl result as JSON to a file or stdout
//! - Writing the profiling report to a file or stdout

mod result_writer;

pub use result_writer::{write_result, write_result_to_path};

use crate::config::OutputConfig;
use crate::crawler::CrawlResult;
use crate::profiler::Profiler;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes the crawl result and the profiling report to their configured destinations
///
/// Each destination is a file (appended to) when its path is set, stdout otherwise.
pub fn write_outputs(
    config: &OutputConfig,
    result: &CrawlResult,
    profiler: &Profiler,
) -> crate::Result<()> {
    match config.result_path() {
        Some(path) => {
            write_result_to_path(result, Path::new(path))?;
            tracing::info!("Result written to {}", path);
        }
        None => write_result(result, &mut io::stdout().lock())?,
    }

    match config.profile_path() {
        Some(path) => {
            profiler.write_report_to_path(Path::new(path))?;
            tracing::info!("Profile written to {}", path);
        }
        None => profiler.write_report(&mut io::stdout().lock())?,
    }

    Ok(())
}
