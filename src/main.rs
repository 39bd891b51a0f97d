// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use clap::{Parser, ValueEnum};
use log::{error, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

use srt_oneliner::app_config::{self, Config};
use srt_oneliner::{AppError, Controller, RunSummary};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// srt-oneliner - one line per cue for auto-generated subtitles
///
/// Converts every .srt file in the current directory and writes the result,
/// under the same name, to the `converted` subdirectory.
#[derive(Parser, Debug)]
#[command(name = "srt-oneliner")]
#[command(version)]
#[command(about = "Collapse two-line auto-caption subtitles into one line per cue")]
#[command(long_about = "Converts auto-generated subtitles so each cue shows a single line
and the lines repeated from the previous cue disappear.

Run it with no arguments inside the folder that holds the .srt files.
Results are written to ./converted with CRLF line endings; existing
files there are overwritten.")]
struct CommandLineOptions {
    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let color = Self::color_for_level(record.level());

        // Progress goes to stdout, problems to stderr
        let _ = match record.level() {
            Level::Error | Level::Warn => writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {}\x1B[0m",
                color,
                now,
                record.args()
            ),
            _ => writeln!(
                std::io::stdout(),
                "\x1B[{}m{} {}\x1B[0m",
                color,
                now,
                record.args()
            ),
        };
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    let cli = CommandLineOptions::parse();

    let mut config = Config::default();
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }

    if let Err(e) = CustomLogger::init(config.log_level.to_level_filter()) {
        eprintln!("Failed to initialize logger: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!("{}", e);
        log::logger().flush();
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<RunSummary, AppError> {
    let controller = Controller::with_config(config).map_err(|e| AppError::Config(format!("{:#}", e)))?;

    let work_dir = std::env::current_dir()?;

    controller
        .run(&work_dir)
        .await
        .map_err(|e| AppError::File(format!("{:#}", e)))
}
