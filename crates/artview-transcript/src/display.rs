//! Transcript line formatting

use artview_model::TranscriptEntry;
use serde::Serialize;
use std::fmt;

/// Format a millisecond offset as `h:mm:ss`
///
/// Hours are not padded, sub-second precision is dropped and negative
/// offsets clamp to zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time_offset(ms: f64) -> String {
    let total_secs = if ms.is_finite() && ms > 0.0 {
        (ms / 1000.0).floor() as u64
    } else {
        0
    };
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// The line shown in the current-transcript panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptDisplay {
    pub start_label: String,
    pub end_label: String,
    pub text: String,
}

impl TranscriptDisplay {
    #[must_use]
    pub fn from_entry(entry: &TranscriptEntry) -> Self {
        Self {
            start_label: format_time_offset(entry.start),
            end_label: format_time_offset(entry.end),
            text: entry.text.clone(),
        }
    }
}

impl fmt::Display for TranscriptDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}] {}", self.start_label, self.end_label, self.text)
    }
}
