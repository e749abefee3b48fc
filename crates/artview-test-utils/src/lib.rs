//! Testing utilities for the artview workspace
//!
//! In-memory collaborators and fixtures shared by the integration tests.

#![allow(missing_docs)]

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

use artview_anchor::TextSegment;
use artview_core::{
    DataLayer, EventSink, OutboundEvent, TextBody, TextResponse, ViewError, ViewSurface,
    WidgetHandle, WidgetSpec,
};
use artview_model::{
    Artifact, BoundingBox, DetectedObject, DisplayType, EntityVertex, TranscriptEntry, VertexId,
    VertexProperties, VideoTranscript,
};
use artview_region::{EditorId, EditorRequest};
use artview_transcript::TranscriptDisplay;

// ---------------------------------------------------------------------------
// Data layer
// ---------------------------------------------------------------------------

/// Data layer backed by in-memory maps
///
/// Fetches can be held open with [`InMemoryDataLayer::gate_refresh`] and
/// [`InMemoryDataLayer::gate_text`] until the returned sender fires (or is
/// dropped).
#[derive(Debug, Default)]
pub struct InMemoryDataLayer {
    store: DashMap<VertexId, Artifact>,
    cache: DashMap<VertexId, Artifact>,
    texts: DashMap<VertexId, TextResponse>,
    refresh_gate: Mutex<Option<oneshot::Receiver<()>>>,
    text_gate: Mutex<Option<oneshot::Receiver<()>>>,
    text_requests: AtomicUsize,
}

impl InMemoryDataLayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `artifact` from `refresh`
    #[must_use]
    pub fn with_artifact(self, artifact: Artifact) -> Self {
        self.store.insert(artifact.id.clone(), artifact);
        self
    }

    /// Serve `response` from `highlighted_text`
    #[must_use]
    pub fn with_text(self, id: impl Into<VertexId>, response: TextResponse) -> Self {
        self.texts.insert(id.into(), response);
        self
    }

    /// Replace the locally cached copy of a vertex
    pub fn cache_vertex(&self, artifact: Artifact) {
        self.cache.insert(artifact.id.clone(), artifact);
    }

    /// Hold the next `refresh` until the sender fires
    pub fn gate_refresh(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.refresh_gate.lock() = Some(rx);
        tx
    }

    /// Hold the next `highlighted_text` until the sender fires
    pub fn gate_text(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.text_gate.lock() = Some(rx);
        tx
    }

    /// Number of `highlighted_text` calls so far
    #[must_use]
    pub fn text_requests(&self) -> usize {
        self.text_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataLayer for InMemoryDataLayer {
    async fn refresh(&self, id: &VertexId) -> artview_core::Result<Artifact> {
        let gate = self.refresh_gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let artifact = self
            .store
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ViewError::fetch(format!("no vertex {id}")))?;
        self.cache.insert(id.clone(), artifact.clone());
        Ok(artifact)
    }

    async fn highlighted_text(&self, id: &VertexId) -> artview_core::Result<TextResponse> {
        self.text_requests.fetch_add(1, Ordering::SeqCst);
        let gate = self.text_gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(self
            .texts
            .get(id)
            .map_or_else(TextResponse::no_content, |entry| entry.value().clone()))
    }

    fn vertex(&self, id: &VertexId) -> Option<Artifact> {
        self.cache.get(id).map(|entry| entry.value().clone())
    }
}

// ---------------------------------------------------------------------------
// Surface and sink
// ---------------------------------------------------------------------------

/// One call made on a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    RenderBase(VertexId),
    Title(String),
    Notice(String),
    /// Plain text of the rendered content
    Content(String),
    Transcript(Option<TranscriptDisplay>),
    Attach(WidgetHandle, WidgetSpec),
    Teardown(WidgetHandle),
    OpenEditor(EditorRequest),
    CloseEditor(EditorId),
}

/// Surface that records every call
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().clone()
    }

    /// Editors opened and not yet closed
    #[must_use]
    pub fn open_editors(&self) -> Vec<EditorId> {
        let mut open = Vec::new();
        for call in self.calls.lock().iter() {
            match call {
                SurfaceCall::OpenEditor(request) => open.push(request.editor_id),
                SurfaceCall::CloseEditor(id) => open.retain(|editor| editor != id),
                _ => {}
            }
        }
        open
    }

    /// Widgets attached and not yet torn down
    #[must_use]
    pub fn live_widgets(&self) -> Vec<WidgetSpec> {
        let mut live: Vec<(WidgetHandle, WidgetSpec)> = Vec::new();
        for call in self.calls.lock().iter() {
            match call {
                SurfaceCall::Attach(handle, spec) => live.push((*handle, spec.clone())),
                SurfaceCall::Teardown(handle) => live.retain(|(h, _)| h != handle),
                _ => {}
            }
        }
        live.into_iter().map(|(_, spec)| spec).collect()
    }

    /// Most recent transcript update
    #[must_use]
    pub fn last_transcript(&self) -> Option<Option<TranscriptDisplay>> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            SurfaceCall::Transcript(display) => Some(display.clone()),
            _ => None,
        })
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().push(call);
    }
}

impl ViewSurface for RecordingSurface {
    fn render_base(&self, artifact: &Artifact) {
        self.record(SurfaceCall::RenderBase(artifact.id.clone()));
    }

    fn set_title(&self, title: &str) {
        self.record(SurfaceCall::Title(title.to_string()));
    }

    fn set_text(&self, body: TextBody<'_>) {
        self.record(match body {
            TextBody::Notice(notice) => SurfaceCall::Notice(notice.to_string()),
            TextBody::Content(content) => SurfaceCall::Content(content.plain_text()),
        });
    }

    fn set_transcript(&self, display: Option<&TranscriptDisplay>) {
        self.record(SurfaceCall::Transcript(display.cloned()));
    }

    fn attach_widget(&self, spec: WidgetSpec) -> WidgetHandle {
        let handle = WidgetHandle::new();
        self.record(SurfaceCall::Attach(handle, spec));
        handle
    }

    fn teardown_widget(&self, handle: WidgetHandle) {
        self.record(SurfaceCall::Teardown(handle));
    }

    fn open_editor(&self, request: &EditorRequest) {
        self.record(SurfaceCall::OpenEditor(request.clone()));
    }

    fn close_editor(&self, editor: EditorId) {
        self.record(SurfaceCall::CloseEditor(editor));
    }
}

/// Sink that records every outbound event
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<OutboundEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<OutboundEvent> {
        self.events.lock().clone()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(OutboundEvent::name).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: OutboundEvent) {
        self.events.lock().push(event);
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// `[0-2000ms "A", 2000-5000ms "B"]`
pub fn two_entry_transcript() -> VideoTranscript {
    VideoTranscript::new(vec![
        TranscriptEntry::new(0.0, 2000.0, "A"),
        TranscriptEntry::new(2000.0, 5000.0, "B"),
    ])
    .unwrap()
}

/// Regions in right-to-left order, one linked to an entity
pub fn sample_regions() -> Vec<DetectedObject> {
    vec![
        DetectedObject::from_bbox(BoundingBox::new(80.0, 5.0, 120.0, 50.0)).with_row_key("row-2"),
        DetectedObject::from_bbox(BoundingBox::new(10.0, 10.0, 60.0, 60.0))
            .with_graph_vertex_id("obj-1")
            .with_entity(EntityVertex {
                id: VertexId::new("person-9"),
                concept: Some("person".into()),
                properties: VertexProperties::new().with("title", "Ada Lovelace"),
            }),
    ]
}

/// 10 second video with a transcript and two regions
pub fn video_artifact() -> Artifact {
    Artifact::new("video-1", DisplayType::Video)
        .with_title("Interview")
        .with_transcript(two_entry_transcript())
        .with_duration(10_000.0)
        .with_detected_objects(sample_regions())
        .with_media("poster.png", "raw.mp4", Some("frames.png".into()))
}

/// Image with two regions
pub fn image_artifact() -> Artifact {
    Artifact::new("image-1", DisplayType::Image)
        .with_title("Photo")
        .with_detected_objects(sample_regions())
        .with_media("thumb.png", "raw.png", None)
}

/// Plain document
pub fn document_artifact() -> Artifact {
    Artifact::new("doc-1", DisplayType::Document).with_title("Field report")
}

/// `"The quick brown "` + entity `"fox"` at 16..19 + `" jumps\n\nover the lazy dog"`
pub fn document_segments() -> Vec<TextSegment> {
    vec![
        TextSegment::plain("The quick brown "),
        TextSegment::entity("fox", 16, 19),
        TextSegment::plain(" jumps\n\nover the lazy dog"),
    ]
}
