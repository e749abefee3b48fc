//! Video transcript records

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// One timed line of a video transcript
///
/// Times are milliseconds from the start of the video. `start` is inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl TranscriptEntry {
    #[inline]
    #[must_use]
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Ordered transcript of a video artifact
///
/// # Invariants
/// - `entries` are ordered by non-decreasing `start`
///
/// Records deserialized from the data layer are trusted as sent; use
/// [`VideoTranscript::new`] or [`VideoTranscript::is_ordered`] to check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoTranscript {
    #[serde(default)]
    pub entries: Vec<TranscriptEntry>,
}

impl VideoTranscript {
    /// Create a transcript, rejecting out-of-order entries
    ///
    /// # Errors
    /// Returns [`ModelError::UnorderedTranscript`] at the first entry whose
    /// `start` is lower than its predecessor's.
    pub fn new(entries: Vec<TranscriptEntry>) -> Result<Self, ModelError> {
        if let Some(index) = first_unordered(&entries) {
            return Err(ModelError::UnorderedTranscript { index });
        }
        Ok(Self { entries })
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether entry starts are non-decreasing
    #[inline]
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        first_unordered(&self.entries).is_none()
    }
}

fn first_unordered(entries: &[TranscriptEntry]) -> Option<usize> {
    entries
        .windows(2)
        .position(|pair| pair[1].start < pair[0].start)
        .map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_equal_starts() {
        let transcript = VideoTranscript::new(vec![
            TranscriptEntry::new(0.0, 10.0, "a"),
            TranscriptEntry::new(0.0, 20.0, "b"),
            TranscriptEntry::new(5.0, 30.0, "c"),
        ])
        .unwrap();
        assert_eq!(transcript.len(), 3);
        assert!(transcript.is_ordered());
    }

    #[test]
    fn new_reports_first_out_of_order_index() {
        let err = VideoTranscript::new(vec![
            TranscriptEntry::new(0.0, 10.0, "a"),
            TranscriptEntry::new(500.0, 900.0, "b"),
            TranscriptEntry::new(100.0, 200.0, "c"),
        ])
        .unwrap_err();
        assert!(matches!(err, ModelError::UnorderedTranscript { index: 2 }));
    }

    #[test]
    fn missing_entries_field_deserializes_empty() {
        let transcript: VideoTranscript = serde_json::from_str("{}").unwrap();
        assert!(transcript.is_empty());
    }
}
