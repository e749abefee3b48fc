//! Collaborator seams
//!
//! The view talks to three outside parties: the data layer that loads
//! records, the surface that renders them and the sink that receives
//! outbound events. Each is a trait so hosts and tests can plug in their
//! own.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use ulid::Ulid;

use artview_anchor::{RenderedContent, TextSegment};
use artview_model::{Artifact, VertexId};
use artview_region::{EditorId, EditorRequest};
use artview_transcript::TranscriptDisplay;

use crate::error::Result;
use crate::event::OutboundEvent;

/// HTTP-style status meaning the artifact has no highlighted text
pub const NO_CONTENT: u16 = 204;

/// Highlighted-text response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextResponse {
    pub status: u16,
    pub segments: Vec<TextSegment>,
}

impl TextResponse {
    /// Successful response carrying `segments`
    #[must_use]
    pub fn ok(segments: Vec<TextSegment>) -> Self {
        Self { status: 200, segments }
    }

    /// Empty `204` response
    #[must_use]
    pub fn no_content() -> Self {
        Self {
            status: NO_CONTENT,
            segments: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_no_content(&self) -> bool {
        self.status == NO_CONTENT
    }
}

/// Loads artifact records and their highlighted text
#[async_trait]
pub trait DataLayer: Send + Sync {
    /// Fetch the full artifact record
    async fn refresh(&self, id: &VertexId) -> Result<Artifact>;

    /// Fetch the entity-highlighted text of an artifact
    async fn highlighted_text(&self, id: &VertexId) -> Result<TextResponse>;

    /// Locally cached vertex, if any
    fn vertex(&self, id: &VertexId) -> Option<Artifact>;
}

/// Text area contents
#[derive(Debug, Clone)]
pub enum TextBody<'a> {
    /// Informational notice in place of text
    Notice(&'a str),
    /// Rendered entity-annotated text
    Content(&'a RenderedContent),
}

/// Sub-widget the view attaches to its surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "widget", rename_all = "camelCase")]
pub enum WidgetSpec {
    /// Property panel for the artifact
    #[serde(rename_all = "camelCase")]
    PropertyPanel { vertex_id: VertexId },
    /// Video scrubber with playback
    #[serde(rename_all = "camelCase")]
    VideoScrubber {
        raw_url: Option<String>,
        poster_frame_url: Option<String>,
        video_preview_image_url: Option<String>,
        allow_playback: bool,
    },
    /// Full-size image preview
    #[serde(rename_all = "camelCase")]
    ImagePreview { src: Option<String>, id: VertexId },
}

impl WidgetSpec {
    /// Scrubber for a video artifact
    #[must_use]
    pub fn video_scrubber(artifact: &Artifact) -> Self {
        Self::VideoScrubber {
            raw_url: artifact.image_raw_src.clone(),
            poster_frame_url: artifact.image_src.clone(),
            video_preview_image_url: artifact.image_frames_src.clone(),
            allow_playback: true,
        }
    }

    /// Preview for an image artifact
    #[must_use]
    pub fn image_preview(artifact: &Artifact) -> Self {
        Self::ImagePreview {
            src: artifact.image_raw_src.clone(),
            id: artifact.id.clone(),
        }
    }
}

/// Handle to an attached sub-widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetHandle(pub Ulid);

impl WidgetHandle {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for WidgetHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renders the view and hosts its sub-widgets and editor forms
pub trait ViewSurface: Send + Sync {
    /// Base template for a freshly loaded artifact
    fn render_base(&self, artifact: &Artifact);

    fn set_title(&self, title: &str);

    fn set_text(&self, body: TextBody<'_>);

    /// Transcript line; `None` clears the panel
    fn set_transcript(&self, display: Option<&TranscriptDisplay>);

    fn attach_widget(&self, spec: WidgetSpec) -> WidgetHandle;

    fn teardown_widget(&self, handle: WidgetHandle);

    fn open_editor(&self, request: &EditorRequest);

    fn close_editor(&self, editor: EditorId);
}

/// Receives outbound events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: OutboundEvent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use artview_model::DisplayType;

    #[test]
    fn scrubber_uses_media_urls() {
        let artifact = Artifact::new("v1", DisplayType::Video).with_media(
            "poster.png",
            "raw.mp4",
            Some("frames.png".into()),
        );
        assert_eq!(
            WidgetSpec::video_scrubber(&artifact),
            WidgetSpec::VideoScrubber {
                raw_url: Some("raw.mp4".into()),
                poster_frame_url: Some("poster.png".into()),
                video_preview_image_url: Some("frames.png".into()),
                allow_playback: true,
            }
        );
    }

    #[test]
    fn image_preview_uses_raw_src() {
        let artifact = Artifact::new("i1", DisplayType::Image).with_media("thumb.png", "raw.png", None);
        let spec = WidgetSpec::image_preview(&artifact);
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["widget"], "imagePreview");
        assert_eq!(value["src"], "raw.png");
        assert_eq!(value["id"], "i1");
    }

    #[test]
    fn no_content_status() {
        assert!(TextResponse::no_content().is_no_content());
        assert!(!TextResponse::ok(Vec::new()).is_no_content());
    }
}
