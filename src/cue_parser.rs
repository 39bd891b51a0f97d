/*!
 * Cue reconstruction for staggered auto-caption subtitles.
 *
 * Auto-captioners emit 4-line blocks (index, time range, two text fragments)
 * where every text line shows up twice: once as the new line of a block and
 * once as context in the block after it. Two cues of the source collapse into
 * one cue of the output, so the reconstruction is a fixed cadence:
 *
 * - time markers: line 2, then every 8th line after the previous marker
 * - first merged line: lines 3 and 7
 * - later merged lines: local positions 4 and 8 of each 8-line window that
 *   starts right after the previous window's second fragment
 *
 * Both scans are small state machines fed one line at a time, so they can be
 * exercised without touching the file system. `parse_file` runs them as two
 * independent tasks over their own file handles and joins them.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::errors::SubtitleError;
use crate::subtitle_processor::CueSheet;

// @const: SRT time range, used for diagnostics only
static TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\d{1,2}:\d{2}:\d{2}[,.]\d{3}\s*-->\s*\d{1,2}:\d{2}:\d{2}[,.]\d{3}").unwrap()
});

/// Line (1-based, from stream start) holding the first time marker
pub const FIRST_MARKER_LINE: usize = 2;

/// Lines (1-based, from stream start) holding the two fragments of the first cue
pub const FIRST_FRAGMENT_LINES: (usize, usize) = (3, 7);

/// Local position of the next marker, counted from the line after the previous one
pub const MARKER_STRIDE: usize = 8;

/// Local positions of the two fragments inside every later 8-line window
pub const GROUP_FRAGMENT_POSITIONS: (usize, usize) = (4, 8);

/// Which window of the cadence a scanner is currently counting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupPhase {
    /// Counting from the start of the stream
    First,
    /// Counting from the end of the previous window
    Subsequent,
}

impl GroupPhase {
    // @returns: Position at which the next time marker is taken
    pub fn marker_position(self) -> usize {
        match self {
            GroupPhase::First => FIRST_MARKER_LINE,
            GroupPhase::Subsequent => MARKER_STRIDE,
        }
    }

    // @returns: Positions of fragment-1 and fragment-2
    pub fn fragment_positions(self) -> (usize, usize) {
        match self {
            GroupPhase::First => FIRST_FRAGMENT_LINES,
            GroupPhase::Subsequent => GROUP_FRAGMENT_POSITIONS,
        }
    }
}

/// Pass A: picks the time marker of every merged cue out of a line stream.
///
/// A trailing window that ends before its marker position yields nothing.
#[derive(Debug)]
pub struct TimeMarkerExtractor {
    phase: GroupPhase,
    position: usize,
    markers: Vec<String>,
}

impl TimeMarkerExtractor {
    pub fn new() -> Self {
        Self {
            phase: GroupPhase::First,
            position: 0,
            markers: Vec::new(),
        }
    }

    /// Feed the next physical line
    pub fn push(&mut self, line: &str) {
        self.position += 1;
        if self.position == self.phase.marker_position() {
            self.markers.push(line.to_string());
            self.position = 0;
            self.phase = GroupPhase::Subsequent;
        }
    }

    pub fn phase(&self) -> GroupPhase {
        self.phase
    }

    pub fn finish(self) -> Vec<String> {
        self.markers
    }
}

impl Default for TimeMarkerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Pass B: joins the two staggered fragments of every cue into one line.
///
/// When the stream stops after fragment-1 but before fragment-2, the partial
/// line is still emitted by `finish` as long as it is not empty.
#[derive(Debug)]
pub struct FragmentMerger {
    phase: GroupPhase,
    position: usize,
    pending: String,
    merged: Vec<String>,
}

impl FragmentMerger {
    pub fn new() -> Self {
        Self {
            phase: GroupPhase::First,
            position: 0,
            pending: String::new(),
            merged: Vec::new(),
        }
    }

    /// Feed the next physical line
    pub fn push(&mut self, line: &str) {
        self.position += 1;
        let (first, second) = self.phase.fragment_positions();

        if self.position == first {
            self.pending.push_str(line);
        } else if self.position == second {
            self.pending.push(' ');
            self.pending.push_str(line);
            self.merged.push(std::mem::take(&mut self.pending));
            self.position = 0;
            self.phase = GroupPhase::Subsequent;
        }
    }

    pub fn phase(&self) -> GroupPhase {
        self.phase
    }

    pub fn finish(mut self) -> Vec<String> {
        if !self.pending.is_empty() {
            self.merged.push(self.pending);
        }
        self.merged
    }
}

impl Default for FragmentMerger {
    fn default() -> Self {
        Self::new()
    }
}

/// Run Pass A over in-memory lines
pub fn extract_time_markers<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut extractor = TimeMarkerExtractor::new();
    for line in lines {
        extractor.push(line.as_ref());
    }
    extractor.finish()
}

/// Run Pass B over in-memory lines
pub fn merge_text_fragments<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut merger = FragmentMerger::new();
    for line in lines {
        merger.push(line.as_ref());
    }
    merger.finish()
}

/// Whether a marker looks like an SRT `start --> end` range
pub fn is_time_range(marker: &str) -> bool {
    TIME_RANGE_REGEX.is_match(marker)
}

/// Stream the lines of `path` through `visit`.
///
/// Accepts `\n` and `\r\n` endings; invalid UTF-8 is replaced rather than rejected.
async fn for_each_line<F>(path: &Path, mut visit: F) -> Result<(), SubtitleError>
where
    F: FnMut(&str),
{
    let read_error = |source| SubtitleError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).await.map_err(read_error)?;
    let mut segments = BufReader::new(file).split(b'\n');

    while let Some(segment) = segments.next_segment().await.map_err(read_error)? {
        let line = String::from_utf8_lossy(&segment);
        let line: &str = &line;
        visit(line.strip_suffix('\r').unwrap_or(line));
    }

    Ok(())
}

/// Pass A over a file, on its own handle
pub async fn read_time_markers(path: &Path) -> Result<Vec<String>, SubtitleError> {
    let mut extractor = TimeMarkerExtractor::new();
    for_each_line(path, |line| extractor.push(line)).await?;
    Ok(extractor.finish())
}

/// Pass B over a file, on its own handle
pub async fn read_merged_lines(path: &Path) -> Result<Vec<String>, SubtitleError> {
    let mut merger = FragmentMerger::new();
    for_each_line(path, |line| merger.push(line)).await?;
    Ok(merger.finish())
}

/// Parse one subtitle file into a validated cue sheet.
///
/// Pass A and Pass B are spawned as separate tasks and both must finish before
/// their results are paired up. A count mismatch is a `MalformedCueStructure`.
pub async fn parse_file(path: &Path) -> Result<CueSheet, SubtitleError> {
    let markers_path = path.to_path_buf();
    let lines_path = path.to_path_buf();

    let markers_task = tokio::spawn(async move { read_time_markers(&markers_path).await });
    let lines_task = tokio::spawn(async move { read_merged_lines(&lines_path).await });

    let (markers, lines) = tokio::join!(markers_task, lines_task);
    let markers = markers.map_err(|e| SubtitleError::TaskFailed(e.to_string()))??;
    let lines = lines.map_err(|e| SubtitleError::TaskFailed(e.to_string()))??;

    debug!(
        "{}: {} time markers, {} merged lines",
        path.display(),
        markers.len(),
        lines.len()
    );

    for (index, marker) in markers.iter().enumerate() {
        if !is_time_range(marker) {
            warn!(
                "{}: cue {} has an unexpected time marker {:?}, the file may not follow the auto-caption cadence",
                path.display(),
                index + 1,
                marker
            );
        }
    }

    CueSheet::from_parts(markers, lines)
}
