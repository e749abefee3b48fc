//! Inbound and outbound view events

use serde::Serialize;

use artview_anchor::{AnchoredSelection, RawSelection};
use artview_model::{RegionKey, RegionRecord, VertexId};
use artview_region::{CoordsChange, HoverKind, RegionNotification};
use artview_transcript::TimeSource;

/// Events the view consumes
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// `scrubberFrameChange {index, numberOfFrames}`
    ScrubberFrameChange { index: u64, number_of_frames: u64 },
    /// `videoTimeUpdate {currentTime}` in seconds
    VideoTimeUpdate { current_time: f64 },
    /// `copy` or `cut` on the text surface
    Copy(RawSelection),
    /// `DetectedObjectCoordsChange {id, x1, y1, x2, y2}`
    CoordsChange(CoordsChange),
    /// `termCreated`: an annotation was committed elsewhere
    TermCreated,
    /// `mouseenter`/`mouseleave` on a region tag
    RegionHover { key: RegionKey, kind: HoverKind },
    /// Click on a region tag
    RegionClick { key: RegionKey },
    /// An editor was dismissed
    EditingFinished,
}

impl InboundEvent {
    /// Time source carried by playback and scrubber events
    #[must_use]
    pub fn time_source(&self) -> Option<TimeSource> {
        match *self {
            Self::ScrubberFrameChange { index, number_of_frames } => {
                Some(TimeSource::frame(index, number_of_frames))
            }
            Self::VideoTimeUpdate { current_time } => Some(TimeSource::playback(current_time)),
            _ => None,
        }
    }
}

/// `copydocumenttext` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyDocumentText {
    pub start_offset: usize,
    pub end_offset: usize,
    /// Context snippet markup with the selection wrapped in a span
    pub snippet: String,
    pub vertex_id: VertexId,
    pub text: String,
    pub vertex_title: String,
}

impl CopyDocumentText {
    /// Payload for an anchored selection in the given artifact
    #[must_use]
    pub fn new(anchored: &AnchoredSelection, vertex_id: VertexId, vertex_title: impl Into<String>) -> Self {
        Self {
            start_offset: anchored.offsets.start_offset,
            end_offset: anchored.offsets.end_offset,
            snippet: anchored.snippet.to_markup(),
            vertex_id,
            text: anchored.text.clone(),
            vertex_title: vertex_title.into(),
        }
    }
}

/// Events the view publishes
///
/// Serializes as `{"event": <name>, "data": <payload>}` using the names the
/// rest of the workspace listens for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum OutboundEvent {
    #[serde(rename = "copydocumenttext")]
    CopyDocumentText(CopyDocumentText),
    #[serde(rename = "DetectedObjectEdit")]
    DetectedObjectEdit(RegionRecord),
    #[serde(rename = "DetectedObjectEnter")]
    DetectedObjectEnter(RegionRecord),
    #[serde(rename = "DetectedObjectLeave")]
    DetectedObjectLeave(RegionRecord),
    #[serde(rename = "DetectedObjectDoneEditing")]
    DetectedObjectDoneEditing,
}

impl OutboundEvent {
    /// Event name as seen by listeners
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CopyDocumentText(_) => "copydocumenttext",
            Self::DetectedObjectEdit(_) => "DetectedObjectEdit",
            Self::DetectedObjectEnter(_) => "DetectedObjectEnter",
            Self::DetectedObjectLeave(_) => "DetectedObjectLeave",
            Self::DetectedObjectDoneEditing => "DetectedObjectDoneEditing",
        }
    }
}

impl From<RegionNotification> for OutboundEvent {
    fn from(notification: RegionNotification) -> Self {
        match notification {
            RegionNotification::Edit(record) => Self::DetectedObjectEdit(record),
            RegionNotification::Enter(record) => Self::DetectedObjectEnter(record),
            RegionNotification::Leave(record) => Self::DetectedObjectLeave(record),
            RegionNotification::DoneEditing => Self::DetectedObjectDoneEditing,
        }
    }
}
