/*!
 * Tests for error types and conversions
 */

use srt_oneliner::errors::{AppError, SubtitleError};
use std::path::PathBuf;

#[test]
fn test_subtitleError_malformedCueStructure_shouldDisplayCounts() {
    let error = SubtitleError::MalformedCueStructure { markers: 4, lines: 3 };
    let display = format!("{}", error);
    assert!(display.contains("Malformed cue structure"));
    assert!(display.contains("4 time markers"));
    assert!(display.contains("3 merged lines"));
}

#[test]
fn test_subtitleError_read_shouldDisplayPath() {
    let error = SubtitleError::Read {
        path: PathBuf::from("talk.srt"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    let display = format!("{}", error);
    assert!(display.contains("Failed to read"));
    assert!(display.contains("talk.srt"));
    assert!(!error.is_write_error());
}

#[test]
fn test_subtitleError_write_shouldBeWriteError() {
    let error = SubtitleError::Write {
        path: PathBuf::from("converted/talk.srt"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(error.is_write_error());
    assert!(format!("{}", error).contains("Failed to write"));
}

#[test]
fn test_subtitleError_taskFailed_shouldDisplayReason() {
    let error = SubtitleError::TaskFailed("panicked".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Parsing task failed"));
    assert!(display.contains("panicked"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_config_shouldDisplayCorrectly() {
    let app_error = AppError::Config("bad output directory".to_string());
    let display = format!("{}", app_error);
    assert!(display.contains("Configuration error"));
    assert!(display.contains("bad output directory"));
}
