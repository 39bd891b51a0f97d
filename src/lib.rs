/*!
 * # srt-oneliner
 *
 * Batch converter for subtitles produced by automatic-captioning tools.
 *
 * Auto-generated captions arrive as two-line cues where every text line is
 * repeated in the following cue. This crate collapses them into one line per
 * cue, which reads better on wide screens and drops the duplicated lines.
 *
 * ## Architecture
 *
 * - `file_utils`: directory scanning and output directory creation
 * - `cue_parser`: the two line-cadence passes (time markers, merged text)
 *   and the concurrent per-file parse
 * - `subtitle_processor`: cue model and the SRT writer
 * - `app_controller`: drives a batch over the working directory
 * - `app_config`: fixed conversion settings
 * - `errors`: error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod app_controller;
pub mod cue_parser;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;

pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use errors::{AppError, SubtitleError};
pub use subtitle_processor::{Cue, CueSheet};
