//! Transcript time index
//!
//! Maps a query time onto the transcript entry that should be on screen.
//!
//! # Lookup policy
//! - The active entry is the last one whose `start <= query`
//! - If no entry has started yet, the first entry is shown anyway, so a video
//!   with a transcript never shows an empty panel
//! - No transcript, or an empty one, yields `None`

use artview_model::{Artifact, TranscriptEntry, VideoTranscript};

use crate::display::TranscriptDisplay;
use crate::source::TimeSource;

/// Active entry of `transcript` at `query_ms`
///
/// Linear in the number of entries. Entries are scanned in stored order, so
/// for the ordered transcripts the data layer sends this is the entry with
/// the greatest `start <= query_ms`.
#[must_use]
pub fn active_entry(transcript: Option<&VideoTranscript>, query_ms: f64) -> Option<&TranscriptEntry> {
    let entries = &transcript?.entries;
    let first = entries.first()?;
    Some(
        entries
            .iter()
            .rfind(|entry| entry.start <= query_ms)
            .unwrap_or(first),
    )
}

/// Transcript snapshot taken when an artifact loads
#[derive(Debug, Clone, Default)]
pub struct TimeIndex {
    transcript: Option<VideoTranscript>,
    /// Video length in milliseconds, used by frame-based sources
    duration_ms: Option<f64>,
}

impl TimeIndex {
    #[inline]
    #[must_use]
    pub fn new(transcript: Option<VideoTranscript>, duration_ms: Option<f64>) -> Self {
        Self {
            transcript,
            duration_ms,
        }
    }

    /// Snapshot `videoTranscript` and `videoDuration`
    #[must_use]
    pub fn from_artifact(artifact: &Artifact) -> Self {
        if let Some(transcript) = &artifact.video_transcript {
            if !transcript.is_ordered() {
                tracing::warn!(
                    artifact = %artifact.id,
                    "transcript entries are not ordered by start"
                );
            }
        }
        Self::new(artifact.video_transcript.clone(), artifact.video_duration)
    }

    /// Whether there is at least one entry to show
    #[inline]
    #[must_use]
    pub fn has_entries(&self) -> bool {
        self.transcript.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Active entry at a time in milliseconds
    #[inline]
    #[must_use]
    pub fn entry_at(&self, query_ms: f64) -> Option<&TranscriptEntry> {
        active_entry(self.transcript.as_ref(), query_ms)
    }

    /// Active entry for a playback or scrubber position
    #[must_use]
    pub fn resolve(&self, source: TimeSource) -> Option<&TranscriptEntry> {
        let query_ms = source.query_time_ms(self.duration_ms)?;
        self.entry_at(query_ms)
    }

    /// Display line for a playback or scrubber position
    #[must_use]
    pub fn display(&self, source: TimeSource) -> Option<TranscriptDisplay> {
        self.resolve(source).map(TranscriptDisplay::from_entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two_entries() -> VideoTranscript {
        VideoTranscript::new(vec![
            TranscriptEntry::new(0.0, 2000.0, "A"),
            TranscriptEntry::new(2000.0, 5000.0, "B"),
        ])
        .unwrap()
    }

    fn text_at(transcript: &VideoTranscript, query_ms: f64) -> Option<&str> {
        active_entry(Some(transcript), query_ms).map(|e| e.text.as_str())
    }

    #[test]
    fn picks_latest_started_entry() {
        let t = two_entries();
        assert_eq!(text_at(&t, 2500.0), Some("B"));
        assert_eq!(text_at(&t, 500.0), Some("A"));
    }

    #[test]
    fn start_is_inclusive() {
        assert_eq!(text_at(&two_entries(), 2000.0), Some("B"));
    }

    #[test]
    fn before_first_start_falls_back_to_first() {
        assert_eq!(text_at(&two_entries(), -100.0), Some("A"));

        let late = VideoTranscript::new(vec![TranscriptEntry::new(3000.0, 4000.0, "late")]).unwrap();
        assert_eq!(text_at(&late, 0.0), Some("late"));
    }

    #[test]
    fn missing_or_empty_transcript_has_no_entry() {
        assert!(active_entry(None, 100.0).is_none());
        assert!(active_entry(Some(&VideoTranscript::default()), 100.0).is_none());
    }

    #[test]
    fn equal_starts_resolve_to_last_in_order() {
        let t = VideoTranscript::new(vec![
            TranscriptEntry::new(0.0, 1000.0, "first"),
            TranscriptEntry::new(1000.0, 1500.0, "second"),
            TranscriptEntry::new(1000.0, 2000.0, "third"),
        ])
        .unwrap();
        assert_eq!(text_at(&t, 1200.0), Some("third"));
    }

    #[test]
    fn index_resolves_both_time_sources_alike() {
        let index = TimeIndex::new(Some(two_entries()), Some(5000.0));

        let by_playback = index.resolve(TimeSource::playback(2.5)).unwrap();
        // frame 50 of 100 over 5000ms is 2500ms
        let by_frame = index.resolve(TimeSource::frame(50, 100)).unwrap();

        assert_eq!(by_playback, by_frame);
        assert_eq!(by_playback.text, "B");
    }

    #[test]
    fn zero_frame_count_has_no_entry() {
        let index = TimeIndex::new(Some(two_entries()), Some(5000.0));
        assert!(index.resolve(TimeSource::frame(3, 0)).is_none());
    }

    #[test]
    fn empty_index_has_no_entries() {
        let index = TimeIndex::default();
        assert!(!index.has_entries());
        assert!(index.display(TimeSource::playback(1.0)).is_none());
    }

    fn ordered_transcript() -> impl Strategy<Value = VideoTranscript> {
        proptest::collection::vec(0u32..10_000, 1..25).prop_map(|mut starts| {
            starts.sort_unstable();
            let entries = starts
                .into_iter()
                .enumerate()
                .map(|(i, s)| TranscriptEntry::new(f64::from(s), f64::from(s) + 500.0, i.to_string()))
                .collect();
            VideoTranscript { entries }
        })
    }

    proptest! {
        #[test]
        fn prop_returns_greatest_started_or_first(
            transcript in ordered_transcript(),
            query in 0.0f64..12_000.0,
        ) {
            let entry = active_entry(Some(&transcript), query).unwrap();
            let started: Vec<_> = transcript.entries.iter().filter(|e| e.start <= query).collect();

            match started.last() {
                Some(expected) => {
                    prop_assert_eq!(entry.start, expected.start);
                    prop_assert!(entry.start <= query);
                }
                None => prop_assert_eq!(entry, &transcript.entries[0]),
            }
        }

        #[test]
        fn prop_monotonic_in_query_time(
            transcript in ordered_transcript(),
            a in 0.0f64..12_000.0,
            b in 0.0f64..12_000.0,
        ) {
            let (t1, t2) = if a <= b { (a, b) } else { (b, a) };
            let e1 = active_entry(Some(&transcript), t1).unwrap();
            let e2 = active_entry(Some(&transcript), t2).unwrap();
            prop_assert!(e1.start <= e2.start);
        }
    }
}
