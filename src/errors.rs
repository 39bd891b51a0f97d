/*!
 * Error types for the srt-oneliner application.
 *
 * Per-file problems are `SubtitleError`s; they are reported and the batch moves
 * on. `AppError` covers everything that ends the process with a failure status.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting a single subtitle file
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Pass A and Pass B disagree on the number of cues
    #[error("Malformed cue structure: {markers} time markers but {lines} merged lines")]
    MalformedCueStructure {
        /// Number of time markers extracted
        markers: usize,
        /// Number of merged text lines produced
        lines: usize,
    },

    /// The input file could not be opened or read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be created or written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A parsing task panicked or was cancelled
    #[error("Parsing task failed: {0}")]
    TaskFailed(String),
}

impl SubtitleError {
    /// Whether the failure happened while producing the output file
    pub fn is_write_error(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

/// Errors that stop a run before or while preparing the batch
#[derive(Error, Debug)]
pub enum AppError {
    /// Working directory or output directory could not be used
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
