use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::errors::SubtitleError;

// @module: One-line cue model and SRT writer

// @struct: Single output cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: 1-based position in the output
    pub ordinal: usize,

    // @field: Time range copied verbatim from the source
    pub time_marker: String,

    // @field: Merged display line
    pub text: String,
}

impl Cue {
    pub fn new(ordinal: usize, time_marker: String, text: String) -> Self {
        Cue {
            ordinal,
            time_marker,
            text,
        }
    }

    /// Append this cue in SRT syntax, followed by the blank separator line
    pub fn write_srt(&self, out: &mut String, line_break: &str) {
        out.push_str(&self.ordinal.to_string());
        out.push_str(line_break);
        out.push_str(&self.time_marker);
        out.push_str(line_break);
        out.push_str(&self.text);
        out.push_str(line_break);
        out.push_str(line_break);
    }
}

/// Ordered cues of one converted file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueSheet {
    pub entries: Vec<Cue>,
}

impl CueSheet {
    /// Pair time markers with merged lines.
    ///
    /// Ordinals are assigned from output position, so whatever indices the
    /// source carried are discarded. Both inputs must have the same length.
    pub fn from_parts(markers: Vec<String>, lines: Vec<String>) -> Result<Self, SubtitleError> {
        if markers.len() != lines.len() {
            return Err(SubtitleError::MalformedCueStructure {
                markers: markers.len(),
                lines: lines.len(),
            });
        }

        let entries = markers
            .into_iter()
            .zip(lines)
            .enumerate()
            .map(|(i, (time_marker, text))| Cue::new(i + 1, time_marker, text))
            .collect();

        Ok(CueSheet { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the whole sheet in SRT syntax
    pub fn to_srt_string(&self, line_break: &str) -> String {
        let mut out = String::new();
        for cue in &self.entries {
            cue.write_srt(&mut out, line_break);
        }
        out
    }

    /// Write the sheet to `path`, replacing any existing content
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P, line_break: &str) -> Result<(), SubtitleError> {
        let path = path.as_ref();
        let write_error = |source| SubtitleError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::create(path).map_err(write_error)?;
        file.write_all(self.to_srt_string(line_break).as_bytes())
            .map_err(write_error)?;
        file.flush().map_err(write_error)?;

        Ok(())
    }
}
