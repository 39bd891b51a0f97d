use anyhow::{anyhow, Result};
use std::default::Default;
use std::path::{Component, Path};

/// Application configuration module
/// The converter has no user-facing settings; this struct pins the fixed
/// behaviour in one place so the rest of the crate never hard-codes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Extension a file name must end with to be converted (case-sensitive)
    pub subtitle_extension: String,

    /// Name of the output directory created under the working directory
    pub output_dir_name: String,

    /// Line break written between output lines
    pub line_break: String,

    /// Log level
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

pub const DEFAULT_SUBTITLE_EXTENSION: &str = ".srt";
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "converted";
pub const CRLF: &str = "\r\n";

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !self.subtitle_extension.starts_with('.') || self.subtitle_extension.len() < 2 {
            return Err(anyhow!(
                "Subtitle extension must start with '.' and name an extension: {:?}",
                self.subtitle_extension
            ));
        }

        // The output directory must be a single plain name under the working dir
        let mut components = Path::new(&self.output_dir_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return Err(anyhow!(
                    "Output directory must be a single directory name: {:?}",
                    self.output_dir_name
                ));
            }
        }

        if self.line_break.is_empty() {
            return Err(anyhow!("Line break must not be empty"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            subtitle_extension: DEFAULT_SUBTITLE_EXTENSION.to_string(),
            output_dir_name: DEFAULT_OUTPUT_DIR_NAME.to_string(),
            line_break: CRLF.to_string(),
            log_level: LogLevel::default(),
        }
    }
}
