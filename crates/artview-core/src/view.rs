//! Artifact view orchestrator
//!
//! Owns one artifact's snapshot, its [`TimeIndex`], [`SelectionAnchor`] and
//! [`RegionEditSession`], and wires inbound events to them.
//!
//! Lifecycle: [`ArtifactView::attach`] subscribes to the document bus, loads
//! the artifact (cancellable through [`LifecycleHandle`]), renders the base
//! view, then loads highlighted text. [`ArtifactView::teardown`] releases
//! every editor and sub-widget; it is idempotent and also runs on drop.

use futures::future::{AbortRegistration, Abortable, Aborted};
use std::sync::Arc;
use tracing::{debug, info, warn};

use artview_anchor::{RenderedContent, SelectionAnchor};
use artview_model::{
    sort_left_to_right, Artifact, DetectedObject, DisplayType, VertexId, VerticesUpdated, TITLE,
};
use artview_region::{RegionEditSession, RegionNotification, Transition};
use artview_transcript::{TimeIndex, TimeSource};

use crate::bus::{DocumentBus, Subscription};
use crate::collab::{DataLayer, EventSink, TextBody, TextResponse, ViewSurface, WidgetHandle, WidgetSpec};
use crate::config::ViewConfig;
use crate::error::{Result, ViewError};
use crate::event::{CopyDocumentText, InboundEvent, OutboundEvent};
use crate::lifecycle::LifecycleHandle;

/// Sub-widgets attached to the surface
#[derive(Debug, Default)]
struct Widgets {
    panel: Option<WidgetHandle>,
    scrubber: Option<WidgetHandle>,
    image: Option<WidgetHandle>,
}

impl Widgets {
    fn drain(&mut self) -> impl Iterator<Item = WidgetHandle> {
        [self.image.take(), self.panel.take(), self.scrubber.take()]
            .into_iter()
            .flatten()
    }
}

/// Snapshot taken when the artifact load completes
#[derive(Debug)]
struct Loaded {
    artifact: Artifact,
    time_index: TimeIndex,
}

/// Review view over a single artifact
pub struct ArtifactView {
    id: VertexId,
    config: ViewConfig,
    data: Arc<dyn DataLayer>,
    surface: Arc<dyn ViewSurface>,
    sink: Arc<dyn EventSink>,
    bus: DocumentBus,
    lifecycle: LifecycleHandle,
    registration: Option<AbortRegistration>,
    subscription: Option<Subscription>,
    loaded: Option<Loaded>,
    content: Option<RenderedContent>,
    anchor: SelectionAnchor,
    session: RegionEditSession,
    widgets: Widgets,
    torn_down: bool,
}

impl ArtifactView {
    /// View over artifact `id`, not yet attached
    #[must_use]
    pub fn new(
        id: impl Into<VertexId>,
        data: Arc<dyn DataLayer>,
        surface: Arc<dyn ViewSurface>,
        sink: Arc<dyn EventSink>,
        bus: DocumentBus,
    ) -> Self {
        let id = id.into();
        let config = ViewConfig::default();
        let (lifecycle, registration) = LifecycleHandle::new();
        Self {
            anchor: SelectionAnchor::new(config.context_words),
            session: RegionEditSession::new(id.clone()).with_min_extent(config.min_region_extent),
            id,
            config,
            data,
            surface,
            sink,
            bus,
            lifecycle,
            registration: Some(registration),
            subscription: None,
            loaded: None,
            content: None,
            widgets: Widgets::default(),
            torn_down: false,
        }
    }

    /// Replace the configuration; call before `attach`
    #[must_use]
    pub fn with_config(mut self, config: ViewConfig) -> Self {
        self.anchor = SelectionAnchor::new(config.context_words);
        self.session = RegionEditSession::new(self.id.clone()).with_min_extent(config.min_region_extent);
        self.config = config;
        self
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &VertexId {
        &self.id
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Handle that cancels the pending load from elsewhere
    #[must_use]
    pub fn lifecycle(&self) -> LifecycleHandle {
        self.lifecycle.clone()
    }

    /// Loaded artifact snapshot
    #[must_use]
    pub fn artifact(&self) -> Option<&Artifact> {
        self.loaded.as_ref().map(|loaded| &loaded.artifact)
    }

    #[must_use]
    pub fn time_index(&self) -> Option<&TimeIndex> {
        self.loaded.as_ref().map(|loaded| &loaded.time_index)
    }

    /// Rendered highlighted text, once loaded
    #[must_use]
    pub fn content(&self) -> Option<&RenderedContent> {
        self.content.as_ref()
    }

    #[must_use]
    pub fn session(&self) -> &RegionEditSession {
        &self.session
    }

    /// Attached, not cancelled and not torn down
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.torn_down && self.lifecycle.is_alive()
    }

    /// Subscribe, load the artifact, render it, then load its text
    ///
    /// # Errors
    /// [`ViewError::Cancelled`] when the view was cancelled or torn down
    /// before a fetch completed, [`ViewError::AlreadyAttached`] on a second
    /// call, and [`ViewError::Fetch`] when the data layer fails.
    pub async fn attach(&mut self) -> Result<()> {
        if !self.is_alive() {
            return Err(ViewError::Cancelled);
        }
        let registration = self.registration.take().ok_or(ViewError::AlreadyAttached)?;

        info!(artifact = %self.id, "attaching artifact view");
        self.subscription = Some(self.bus.subscribe());

        let data = Arc::clone(&self.data);
        let artifact = match Abortable::new(data.refresh(&self.id), registration).await {
            Ok(result) => result?,
            Err(Aborted) => {
                debug!(artifact = %self.id, "artifact load cancelled");
                return Err(ViewError::Cancelled);
            }
        };
        if !self.is_alive() {
            debug!(artifact = %self.id, "artifact arrived after teardown, dropped");
            return Err(ViewError::Cancelled);
        }
        self.load(artifact);

        let text = data.highlighted_text(&self.id).await;
        if !self.is_alive() {
            debug!(artifact = %self.id, "highlighted text arrived after teardown, dropped");
            return Err(ViewError::Cancelled);
        }
        let text = match text {
            Ok(text) => text,
            Err(err) => {
                warn!(artifact = %self.id, %err, "highlighted text failed");
                return Err(err);
            }
        };
        self.show_text(text);
        self.setup_media();

        info!(artifact = %self.id, "artifact view attached");
        Ok(())
    }

    /// Dispatch one inbound event
    ///
    /// # Errors
    /// [`ViewError::NotLoaded`] before the artifact is loaded,
    /// [`ViewError::Cancelled`] once cancelled or torn down (both silent), and
    /// [`ViewError::Region`] for a gesture naming an unknown region.
    pub fn handle(&mut self, event: InboundEvent) -> Result<()> {
        if !self.is_alive() {
            debug!(?event, "event on dead view, ignored");
            return Err(ViewError::Cancelled);
        }
        if self.loaded.is_none() {
            debug!(?event, "event before artifact load, ignored");
            return Err(ViewError::NotLoaded);
        }

        if let Some(source) = event.time_source() {
            self.show_transcript(source);
            return Ok(());
        }

        match event {
            InboundEvent::Copy(selection) => {
                let Some(content) = self.content.as_ref() else {
                    debug!("copy before text load, ignored");
                    return Ok(());
                };
                if let Some(anchored) = self.anchor.anchor(&selection, content) {
                    let title = self.artifact().map(Artifact::title).unwrap_or_default();
                    let payload = CopyDocumentText::new(&anchored, self.id.clone(), title);
                    self.sink.emit(OutboundEvent::CopyDocumentText(payload));
                }
            }
            InboundEvent::CoordsChange(change) => {
                let objects = self.current_objects();
                let transition = self.session.coords_changed(&change, &objects);
                self.apply(transition);
            }
            InboundEvent::TermCreated | InboundEvent::EditingFinished => {
                let transition = self.session.finish_editing();
                self.apply(transition);
            }
            InboundEvent::RegionHover { key, kind } => {
                let objects = snapshot_objects(self.loaded.as_ref());
                let notification = self.session.hover(&key, kind, objects)?;
                self.notify(notification);
            }
            InboundEvent::RegionClick { key } => {
                let objects = snapshot_objects(self.loaded.as_ref());
                let transition = self.session.click(&key, objects)?;
                self.apply(transition);
            }
            InboundEvent::ScrubberFrameChange { .. } | InboundEvent::VideoTimeUpdate { .. } => {}
        }
        Ok(())
    }

    /// Apply a `verticesUpdated` notification, patching the title only
    ///
    /// Returns whether this view's artifact was affected.
    pub fn on_vertices_updated(&mut self, update: &VerticesUpdated) -> bool {
        if !self.is_alive() {
            return false;
        }
        let Some(loaded) = self.loaded.as_mut() else {
            return false;
        };
        let Some(title) = update
            .find(&self.id)
            .and_then(|vertex| vertex.properties.title())
        else {
            return false;
        };

        loaded.artifact.properties.insert(TITLE, title);
        self.surface.set_title(title);
        debug!(artifact = %self.id, title, "title refreshed");
        true
    }

    /// Apply every pending bus notification, returning how many matched
    pub fn pump(&mut self) -> usize {
        let mut pending = Vec::new();
        if let Some(subscription) = self.subscription.as_mut() {
            while let Some(update) = subscription.try_next() {
                pending.push(update);
            }
        }
        pending
            .iter()
            .filter(|update| self.on_vertices_updated(update))
            .count()
    }

    /// Release editors, sub-widgets and the bus subscription
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.lifecycle.cancel();

        if let Some(editor) = self.session.reset() {
            self.surface.close_editor(editor);
        }
        for handle in self.widgets.drain() {
            self.surface.teardown_widget(handle);
        }
        self.subscription = None;

        info!(artifact = %self.id, "artifact view torn down");
    }

    fn load(&mut self, mut artifact: Artifact) {
        if artifact.display_type().is_media() {
            sort_left_to_right(&mut artifact.detected_objects);
        }
        let time_index = TimeIndex::from_artifact(&artifact);

        self.surface.render_base(&artifact);
        self.widgets.panel = Some(self.surface.attach_widget(WidgetSpec::PropertyPanel {
            vertex_id: artifact.id.clone(),
        }));
        debug!(
            artifact = %artifact.id,
            regions = artifact.detected_objects.len(),
            transcript = time_index.has_entries(),
            "artifact loaded"
        );

        self.loaded = Some(Loaded { artifact, time_index });
    }

    fn show_text(&mut self, response: TextResponse) {
        let media = self
            .artifact()
            .is_some_and(|artifact| artifact.display_type().is_media());

        if response.is_no_content() && !media {
            self.surface.set_text(TextBody::Notice(&self.config.no_text_notice));
            return;
        }

        let content = RenderedContent::render(&response.segments);
        self.surface.set_text(TextBody::Content(&content));
        self.content = Some(content);
    }

    fn setup_media(&mut self) {
        let Some(Loaded { artifact, .. }) = self.loaded.as_ref() else {
            return;
        };
        match artifact.display_type() {
            DisplayType::Video => {
                let spec = WidgetSpec::video_scrubber(artifact);
                self.widgets.scrubber = Some(self.surface.attach_widget(spec));
            }
            DisplayType::Image => {
                let spec = WidgetSpec::image_preview(artifact);
                self.widgets.image = Some(self.surface.attach_widget(spec));
            }
            DisplayType::Document | DisplayType::Other(_) => {}
        }
    }

    fn show_transcript(&self, source: TimeSource) {
        let display = self
            .time_index()
            .and_then(|index| index.display(source));
        self.surface.set_transcript(display.as_ref());
    }

    /// Regions as currently cached by the data layer, else the snapshot
    fn current_objects(&self) -> Vec<DetectedObject> {
        self.data
            .vertex(&self.id)
            .map(|vertex| vertex.detected_objects)
            .unwrap_or_else(|| snapshot_objects(self.loaded.as_ref()).to_vec())
    }

    fn apply(&self, transition: Transition) {
        if let Some(closed) = transition.closed {
            self.surface.close_editor(closed);
        }
        if let Some(request) = &transition.opened {
            self.surface.open_editor(request);
        }
        if let Some(notification) = transition.notification {
            self.notify(notification);
        }
    }

    fn notify(&self, notification: RegionNotification) {
        self.sink.emit(notification.into());
    }
}

fn snapshot_objects(loaded: Option<&Loaded>) -> &[DetectedObject] {
    loaded
        .map(|loaded| loaded.artifact.detected_objects.as_slice())
        .unwrap_or_default()
}

impl Drop for ArtifactView {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for ArtifactView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactView")
            .field("id", &self.id)
            .field("loaded", &self.loaded.is_some())
            .field("state", self.session.state())
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}
