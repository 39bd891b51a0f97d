use anyhow::{anyhow, Context, Result};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::cue_parser;
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;

// @module: Batch conversion controller

/// A file the batch could not convert
#[derive(Debug)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: SubtitleError,
}

/// Outcome of one batch run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Output files written, in processing order
    pub converted: Vec<PathBuf>,

    /// Inputs that were skipped, with the reason
    pub failed: Vec<FailedFile>,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Main application controller for subtitle conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Directory the converted files are written to
    pub fn output_dir(&self, work_dir: &Path) -> PathBuf {
        work_dir.join(&self.config.output_dir_name)
    }

    /// Convert every subtitle file directly inside `work_dir`.
    ///
    /// Failing to list the directory or to create the output directory aborts
    /// the run. Any failure on a single file is logged and recorded in the
    /// summary, and the next file is processed.
    pub async fn run(&self, work_dir: &Path) -> Result<RunSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(work_dir) {
            return Err(anyhow!("Working directory does not exist: {:?}", work_dir));
        }

        info!("Reading current dir: {}", work_dir.display());

        let subtitle_files = FileManager::find_files_with_extension(work_dir, &self.config.subtitle_extension)
            .context("Failed to list subtitle files")?;

        let output_dir = self.output_dir(work_dir);
        FileManager::ensure_dir(&output_dir).context("Failed to prepare output directory")?;

        let mut summary = RunSummary::default();

        for input_file in subtitle_files {
            let file_name = input_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            info!("processing {}", file_name);

            match self.convert_file(&input_file, &output_dir).await {
                Ok(output_path) => summary.converted.push(output_path),
                Err(e) => {
                    if e.is_write_error() {
                        error!("Could not save {}: {}", file_name, e);
                    } else {
                        error!("Skipping {}: {}", file_name, e);
                    }
                    summary.failed.push(FailedFile {
                        path: input_file,
                        error: e,
                    });
                }
            }
        }

        let summary_message = format!(
            "Conversion completed in {}: {} converted, {} failed",
            Self::format_duration(start_time.elapsed()),
            summary.converted.len(),
            summary.failed.len()
        );
        if summary.is_clean() {
            info!("{}", summary_message);
        } else {
            warn!("{}", summary_message);
        }

        Ok(summary)
    }

    /// Parse one input file and write its one-line version into `output_dir`
    pub async fn convert_file(&self, input_file: &Path, output_dir: &Path) -> Result<PathBuf, SubtitleError> {
        let Some(file_name) = input_file.file_name() else {
            return Err(SubtitleError::Read {
                path: input_file.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
            });
        };

        let sheet = cue_parser::parse_file(input_file).await?;

        let output_path = output_dir.join(file_name);
        sheet.write_to_srt(&output_path, &self.config.line_break)?;

        Ok(output_path)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
