/*!
 * Integration tests for directory conversion
 */

use anyhow::Result;
use std::fs;
use std::path::Path;

use srt_oneliner::app_config::Config;
use srt_oneliner::app_controller::Controller;
use srt_oneliner::errors::SubtitleError;
use crate::common;

fn converted_names(dir: &Path) -> Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir.join("converted"))?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().to_string()))
        .collect::<std::io::Result<_>>()?;
    names.sort();
    Ok(names)
}

/// Two merged cues end up as two CRLF blocks under the same file name
#[tokio::test]
async fn test_run_withTwoCueFile_shouldWriteOneLineCues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_two_cue_subtitle(temp_dir.path(), "lecture.srt")?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.run(temp_dir.path()).await?;

    assert!(summary.is_clean());
    assert_eq!(summary.converted, vec![temp_dir.path().join("converted").join("lecture.srt")]);

    let output = fs::read_to_string(temp_dir.path().join("converted/lecture.srt"))?;
    assert_eq!(output, common::two_cue_expected_output());

    Ok(())
}

/// Re-running the conversion replaces the earlier output
#[tokio::test]
async fn test_run_twice_shouldNotDuplicateOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_two_cue_subtitle(temp_dir.path(), "lecture.srt")?;

    let controller = Controller::with_config(Config::default())?;
    controller.run(temp_dir.path()).await?;
    controller.run(temp_dir.path()).await?;

    let output = fs::read_to_string(temp_dir.path().join("converted/lecture.srt"))?;
    assert_eq!(output, common::two_cue_expected_output());

    Ok(())
}

/// Output ordinals restart at 1 whatever the source numbering
#[tokio::test]
async fn test_run_withOffsetSourceIndices_shouldRenumberFromOne() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = common::auto_caption_content(&common::two_cue_blocks(), 41, "\n");
    common::create_test_file(temp_dir.path(), "offset.srt", &content)?;

    let controller = Controller::with_config(Config::default())?;
    controller.run(temp_dir.path()).await?;

    let output = fs::read_to_string(temp_dir.path().join("converted/offset.srt"))?;
    assert_eq!(output, common::two_cue_expected_output());

    Ok(())
}

/// Files with another extension are neither read nor written
#[tokio::test]
async fn test_run_withOtherFiles_shouldOnlyConvertSubtitles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_two_cue_subtitle(temp_dir.path(), "keep.srt")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "not a subtitle")?;
    common::create_test_file(temp_dir.path(), "shouty.SRT", "not matched either")?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.run(temp_dir.path()).await?;

    assert_eq!(summary.converted.len(), 1);
    assert!(summary.failed.is_empty());
    assert_eq!(converted_names(temp_dir.path())?, vec!["keep.srt"]);
    assert_eq!(fs::read_to_string(temp_dir.path().join("notes.txt"))?, "not a subtitle");

    Ok(())
}

/// An empty directory still gets an (empty) output directory
#[tokio::test]
async fn test_run_withNoSubtitles_shouldCreateEmptyOutputDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.run(temp_dir.path()).await?;

    assert!(summary.converted.is_empty());
    assert!(summary.is_clean());
    assert!(temp_dir.path().join("converted").is_dir());
    assert!(converted_names(temp_dir.path())?.is_empty());

    Ok(())
}

/// One malformed file is reported and the rest of the batch still converts
#[tokio::test]
async fn test_run_withMalformedFile_shouldSkipItAndContinue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "a_broken.srt", "1\n00:00:00,000 --> 00:00:01,000\n")?;
    common::create_two_cue_subtitle(temp_dir.path(), "b_good.srt")?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.run(temp_dir.path()).await?;

    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].path, temp_dir.path().join("a_broken.srt"));
    assert!(!summary.failed[0].error.is_write_error());
    assert_eq!(converted_names(temp_dir.path())?, vec!["b_good.srt"]);

    Ok(())
}

/// A file with a marker but no text line is rejected and nothing is written for it
#[tokio::test]
async fn test_run_withTwoLineFile_shouldReportMalformedAndWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "stub.srt", "1\r\n00:00:00,000 --> 00:00:01,000\r\n")?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.run(temp_dir.path()).await?;

    assert!(summary.converted.is_empty());
    assert_eq!(summary.failed.len(), 1);
    assert!(matches!(
        summary.failed[0].error,
        SubtitleError::MalformedCueStructure { markers: 1, lines: 0 }
    ));
    assert!(!temp_dir.path().join("converted/stub.srt").exists());

    Ok(())
}

/// An empty input has no cues on either pass and converts to an empty file
#[tokio::test]
async fn test_run_withEmptyFile_shouldWriteEmptyOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "blank.srt", "")?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.run(temp_dir.path()).await?;

    assert!(summary.is_clean());
    assert_eq!(fs::read_to_string(temp_dir.path().join("converted/blank.srt"))?, "");

    Ok(())
}

/// A destination that cannot be written is logged and the batch moves on
#[tokio::test]
async fn test_run_withBlockedDestination_shouldReportWriteErrorAndContinue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_two_cue_subtitle(temp_dir.path(), "a_blocked.srt")?;
    common::create_two_cue_subtitle(temp_dir.path(), "b_free.srt")?;

    // A directory squatting on the output name makes file creation fail
    fs::create_dir_all(temp_dir.path().join("converted").join("a_blocked.srt"))?;

    let controller = Controller::with_config(Config::default())?;
    let summary = controller.run(temp_dir.path()).await?;

    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].error.is_write_error());
    assert_eq!(summary.converted, vec![temp_dir.path().join("converted").join("b_free.srt")]);

    Ok(())
}
