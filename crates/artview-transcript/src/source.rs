//! Time sources driving the transcript
//!
//! The video element reports playback time in seconds; the scrubber reports
//! a frame index out of a frame count. Both reduce to a query time in
//! milliseconds and go through the same lookup.

use serde::{Deserialize, Serialize};

/// A position in the video, as reported by one of its widgets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum TimeSource {
    /// `videoTimeUpdate`: current playback time in seconds
    #[serde(rename_all = "camelCase")]
    Playback { current_time: f64 },

    /// `scrubberFrameChange`: frame `index` out of `number_of_frames`
    #[serde(rename_all = "camelCase")]
    Frame { index: u64, number_of_frames: u64 },
}

impl TimeSource {
    #[inline]
    #[must_use]
    pub fn playback(current_time_secs: f64) -> Self {
        Self::Playback {
            current_time: current_time_secs,
        }
    }

    #[inline]
    #[must_use]
    pub fn frame(index: u64, number_of_frames: u64) -> Self {
        Self::Frame {
            index,
            number_of_frames,
        }
    }

    /// Query time in milliseconds
    ///
    /// Frame positions scale the video duration: `duration / frames * index`.
    /// `None` when the frame count is zero or the duration is unknown.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn query_time_ms(&self, duration_ms: Option<f64>) -> Option<f64> {
        match *self {
            Self::Playback { current_time } => Some(current_time * 1000.0),
            Self::Frame {
                index,
                number_of_frames,
            } => {
                if number_of_frames == 0 {
                    tracing::debug!(index, "scrubber reported zero frames");
                    return None;
                }
                let Some(duration) = duration_ms else {
                    tracing::debug!(index, "frame position without a known video duration");
                    return None;
                };
                Some(duration / number_of_frames as f64 * index as f64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playback_seconds_become_milliseconds() {
        assert_eq!(TimeSource::playback(2.5).query_time_ms(None), Some(2500.0));
    }

    #[test]
    fn frame_scales_duration() {
        let t = TimeSource::frame(25, 100).query_time_ms(Some(8000.0));
        assert_eq!(t, Some(2000.0));
    }

    #[test]
    fn zero_frames_does_not_divide() {
        assert_eq!(TimeSource::frame(0, 0).query_time_ms(Some(8000.0)), None);
    }

    #[test]
    fn frame_without_duration_has_no_time() {
        assert_eq!(TimeSource::frame(3, 10).query_time_ms(None), None);
    }

    #[test]
    fn deserializes_event_payloads() {
        let frame: TimeSource =
            serde_json::from_str(r#"{"kind":"frame","index":4,"numberOfFrames":20}"#).unwrap();
        assert_eq!(frame, TimeSource::frame(4, 20));

        let playback: TimeSource =
            serde_json::from_str(r#"{"kind":"playback","currentTime":1.25}"#).unwrap();
        assert_eq!(playback, TimeSource::playback(1.25));
    }
}
