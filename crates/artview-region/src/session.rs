//! Region edit session
//!
//! Turns click, hover and drag gestures over region tags into editor
//! open/close instructions and outbound notifications. The session owns the
//! single [`EditorSlot`] of its overlay; callers apply each [`Transition`] in
//! order: tear down `closed`, then open `opened`, then publish
//! `notification`.

use artview_model::{find_by_key, DetectedObject, RegionKey, RegionRecord, VertexId};
use serde::Serialize;
use tracing::debug;

use crate::error::{RegionError, Result};
use crate::gesture::{CoordsChange, HoverKind, MIN_REGION_EXTENT};
use crate::slot::{EditorAnchor, EditorId, EditorRequest, EditorSlot};
use crate::state::{EditState, Trigger};

/// Notification for the rest of the workspace
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "record")]
pub enum RegionNotification {
    /// `DetectedObjectEdit`
    Edit(RegionRecord),
    /// `DetectedObjectEnter`
    Enter(RegionRecord),
    /// `DetectedObjectLeave`
    Leave(RegionRecord),
    /// `DetectedObjectDoneEditing`
    DoneEditing,
}

/// Effects of one gesture
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transition {
    /// Editor to tear down
    pub closed: Option<EditorId>,
    /// Editor to open after the teardown
    pub opened: Option<EditorRequest>,
    pub notification: Option<RegionNotification>,
}

impl Transition {
    /// Nothing to do
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

/// Edit session over one artifact's regions
#[derive(Debug)]
pub struct RegionEditSession {
    artifact_id: VertexId,
    state: EditState,
    slot: EditorSlot,
    focused: Option<RegionKey>,
    min_extent: f64,
}

impl RegionEditSession {
    #[must_use]
    pub fn new(artifact_id: VertexId) -> Self {
        Self {
            artifact_id,
            state: EditState::Idle,
            slot: EditorSlot::new(),
            focused: None,
            min_extent: MIN_REGION_EXTENT,
        }
    }

    /// Override the smallest accepted width/height of a drawn region
    #[inline]
    #[must_use]
    pub fn with_min_extent(mut self, min_extent: f64) -> Self {
        self.min_extent = min_extent;
        self
    }

    #[inline]
    #[must_use]
    pub fn artifact_id(&self) -> &VertexId {
        &self.artifact_id
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Region tag currently carrying focus
    #[inline]
    #[must_use]
    pub fn focused(&self) -> Option<&RegionKey> {
        self.focused.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn open_editor(&self) -> Option<EditorId> {
        self.slot.current()
    }

    #[inline]
    #[must_use]
    pub fn min_extent(&self) -> f64 {
        self.min_extent
    }

    /// Region tag clicked: focus it, announce the edit and open its editor
    ///
    /// The merged record is marked `existing` and the editor is positioned
    /// next to the clicked tag, replacing any editor already open.
    pub fn click(&mut self, key: &RegionKey, objects: &[DetectedObject]) -> Result<Transition> {
        let object =
            find_by_key(objects, key).ok_or_else(|| RegionError::UnknownRegion(key.clone()))?;

        let mut record = object.flatten();
        record.existing = true;

        self.apply(&Trigger::Clicked(key.clone()));
        self.focused = Some(key.clone());
        debug!(region = %key, "region focused");

        let notification = RegionNotification::Edit(record.clone());
        Ok(Transition {
            notification: Some(notification),
            ..self.open(record, EditorAnchor::Tag(key.clone()))
        })
    }

    /// Region drawn or dragged to new coordinates
    ///
    /// Boxes under the minimum extent discard any open editor and end
    /// editing. Otherwise the editor is (re)opened for the matching existing
    /// region with the new coordinates, or for a fresh region when no
    /// existing one matches. A redrawn region keeps the object's own fields;
    /// its linked entity is not merged in, unlike the click and hover paths.
    pub fn coords_changed(&mut self, change: &CoordsChange, objects: &[DetectedObject]) -> Transition {
        if !change.bbox.meets_minimum_extent(self.min_extent) {
            debug!(
                width = change.bbox.width(),
                height = change.bbox.height(),
                "region below minimum extent, discarding"
            );
            let closed = self.slot.release();
            self.apply(&Trigger::Discarded);
            return Transition {
                closed,
                opened: None,
                notification: Some(RegionNotification::DoneEditing),
            };
        }

        let existing = change
            .id
            .as_ref()
            .and_then(|key| find_by_key(objects, key).map(|object| (key, object)));

        match existing {
            Some((key, object)) => {
                let mut record = object.to_record();
                record.bbox = change.bbox;
                record.existing = true;
                self.apply(&Trigger::Redrawn(key.clone()));
                self.open(record, EditorAnchor::Overlay)
            }
            None => {
                self.apply(&Trigger::Drawn(change.bbox));
                self.open(RegionRecord::drawn(change.bbox), EditorAnchor::Overlay)
            }
        }
    }

    /// Pointer entered or left a region tag
    pub fn hover(
        &mut self,
        key: &RegionKey,
        kind: HoverKind,
        objects: &[DetectedObject],
    ) -> Result<RegionNotification> {
        let object =
            find_by_key(objects, key).ok_or_else(|| RegionError::UnknownRegion(key.clone()))?;
        self.apply(&Trigger::Hovered);

        let record = object.flatten();
        Ok(match kind {
            HoverKind::Enter => RegionNotification::Enter(record),
            HoverKind::Leave => RegionNotification::Leave(record),
        })
    }

    /// Editor dismissed or its entity created
    pub fn finish_editing(&mut self) -> Transition {
        let closed = self.slot.release();
        self.apply(&Trigger::Finished);
        self.focused = None;
        Transition {
            closed,
            opened: None,
            notification: Some(RegionNotification::DoneEditing),
        }
    }

    /// Drop all session state, returning the editor left open
    pub fn reset(&mut self) -> Option<EditorId> {
        self.state = EditState::Idle;
        self.focused = None;
        self.slot.release()
    }

    fn open(&mut self, record: RegionRecord, anchor: EditorAnchor) -> Transition {
        let request = EditorRequest::new(self.artifact_id.clone(), record, anchor);
        let closed = self.slot.open(request.editor_id);
        debug!(editor = %request.editor_id, replaced = closed.is_some(), "editor opened");
        Transition {
            closed,
            opened: Some(request),
            notification: None,
        }
    }

    fn apply(&mut self, trigger: &Trigger) {
        self.state = self.state.on(trigger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artview_model::{BoundingBox, EntityVertex, VertexProperties};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn objects() -> Vec<DetectedObject> {
        vec![
            DetectedObject::from_bbox(BoundingBox::new(10.0, 10.0, 60.0, 60.0))
                .with_graph_vertex_id("obj-1")
                .with_entity(EntityVertex {
                    id: VertexId::new("person-9"),
                    concept: Some("person".into()),
                    properties: VertexProperties::new().with("title", "Ada"),
                }),
            DetectedObject::from_bbox(BoundingBox::new(80.0, 5.0, 120.0, 50.0)).with_row_key("row-2"),
        ]
    }

    fn session() -> RegionEditSession {
        RegionEditSession::new(VertexId::new("artifact-1"))
    }

    #[test]
    fn small_drag_closes_editor_and_finishes() {
        let mut session = session();
        let opened = session.coords_changed(
            &CoordsChange::new(None, BoundingBox::new(0.0, 0.0, 50.0, 40.0)),
            &objects(),
        );
        let editor = opened.opened.unwrap().editor_id;

        let t = session.coords_changed(
            &CoordsChange::new(Some(RegionKey::new("obj-1")), BoundingBox::new(10.0, 10.0, 12.0, 40.0)),
            &objects(),
        );

        assert_eq!(t.closed, Some(editor));
        assert!(t.opened.is_none());
        assert_eq!(t.notification, Some(RegionNotification::DoneEditing));
        assert!(session.state().is_idle());
        assert!(session.open_editor().is_none());
    }

    #[test]
    fn new_region_opens_blank_editor() {
        let mut session = session();
        let t = session.coords_changed(
            &CoordsChange::new(None, BoundingBox::new(0.0, 0.0, 50.0, 40.0)),
            &objects(),
        );

        let request = t.opened.unwrap();
        assert!(t.closed.is_none());
        assert!(t.notification.is_none());
        assert!(!request.existing);
        assert!(request.resolved_vertex.id.is_none());
        assert_eq!(request.data_info.bbox, BoundingBox::new(0.0, 0.0, 50.0, 40.0));
        assert_eq!(request.anchor, EditorAnchor::Overlay);
        assert!(matches!(session.state(), EditState::EditingNew(_)));
    }

    #[test]
    fn redraw_of_existing_keeps_object_fields_and_new_coords() {
        let mut session = session();
        let bbox = BoundingBox::new(15.0, 15.0, 70.0, 70.0);
        let t = session.coords_changed(&CoordsChange::new(Some(RegionKey::new("obj-1")), bbox), &objects());

        let request = t.opened.unwrap();
        assert!(request.existing);
        assert_eq!(request.resolved_vertex.id, None);
        assert_eq!(request.data_info.bbox, bbox);
        assert_eq!(request.data_info.key(), Some(RegionKey::new("obj-1")));
        assert_eq!(request.data_info.concept, None);
        assert_eq!(request.data_info.properties.title(), None);
        assert_eq!(session.state().editing_key(), Some(&RegionKey::new("obj-1")));
    }

    #[test]
    fn unknown_id_is_treated_as_new_region() {
        let mut session = session();
        let t = session.coords_changed(
            &CoordsChange::new(Some(RegionKey::new("ghost")), BoundingBox::new(0.0, 0.0, 30.0, 30.0)),
            &objects(),
        );
        assert!(!t.opened.unwrap().existing);
    }

    #[test]
    fn second_draw_replaces_first_editor() {
        let mut session = session();
        let first = session
            .coords_changed(&CoordsChange::new(None, BoundingBox::new(0.0, 0.0, 50.0, 40.0)), &objects())
            .opened
            .unwrap()
            .editor_id;
        let t = session.coords_changed(
            &CoordsChange::new(None, BoundingBox::new(5.0, 5.0, 55.0, 45.0)),
            &objects(),
        );

        assert_eq!(t.closed, Some(first));
        assert!(t.notification.is_none());
        assert_eq!(session.open_editor(), Some(t.opened.unwrap().editor_id));
    }

    #[test]
    fn click_focuses_and_announces_existing_record() {
        let mut session = session();
        let t = session.click(&RegionKey::new("obj-1"), &objects()).unwrap();

        let Some(RegionNotification::Edit(record)) = t.notification else {
            panic!("expected edit notification");
        };
        assert!(record.existing);
        assert_eq!(record.id, Some(VertexId::new("person-9")));
        assert_eq!(record.properties.title(), Some("Ada"));
        assert_eq!(session.focused(), Some(&RegionKey::new("obj-1")));
    }

    #[test]
    fn click_falls_back_to_row_key() {
        let mut session = session();
        assert!(session.click(&RegionKey::new("row-2"), &objects()).is_ok());
        assert_eq!(
            session.click(&RegionKey::new("nope"), &objects()),
            Err(RegionError::UnknownRegion(RegionKey::new("nope")))
        );
    }

    #[test]
    fn click_opens_editor_next_to_tag() {
        let mut session = session();
        let drawn = session
            .coords_changed(&CoordsChange::new(None, BoundingBox::new(0.0, 0.0, 50.0, 40.0)), &objects())
            .opened
            .unwrap()
            .editor_id;

        let t = session.click(&RegionKey::new("row-2"), &objects()).unwrap();
        let request = t.opened.unwrap();
        assert_eq!(t.closed, Some(drawn));
        assert_eq!(request.anchor, EditorAnchor::Tag(RegionKey::new("row-2")));
        assert!(request.existing);
        assert_eq!(session.open_editor(), Some(request.editor_id));
    }

    #[test]
    fn hover_emits_enter_and_leave_without_state_change() {
        let mut session = session();
        session.click(&RegionKey::new("obj-1"), &objects()).unwrap();
        let before = session.state().clone();

        let enter = session.hover(&RegionKey::new("row-2"), HoverKind::Enter, &objects()).unwrap();
        let leave = session.hover(&RegionKey::new("row-2"), HoverKind::Leave, &objects()).unwrap();

        assert!(matches!(enter, RegionNotification::Enter(_)));
        assert!(matches!(leave, RegionNotification::Leave(_)));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn finish_closes_editor_and_clears_focus() {
        let mut session = session();
        let editor = session
            .click(&RegionKey::new("obj-1"), &objects())
            .unwrap()
            .opened
            .unwrap()
            .editor_id;

        let t = session.finish_editing();
        assert_eq!(t.closed, Some(editor));
        assert_eq!(t.notification, Some(RegionNotification::DoneEditing));
        assert!(session.focused().is_none());
    }

    #[test]
    fn custom_min_extent_applies() {
        let mut session = session().with_min_extent(20.0);
        let t = session.coords_changed(
            &CoordsChange::new(None, BoundingBox::new(0.0, 0.0, 10.0, 30.0)),
            &objects(),
        );
        assert!(t.opened.is_none());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Drag(f64, f64),
        Redraw(usize, f64, f64),
        Click(usize),
        Hover(usize),
        Finish,
        Reset,
    }

    fn any_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0.0f64..40.0, 0.0f64..40.0).prop_map(|(w, h)| Op::Drag(w, h)),
            (0usize..3, 0.0f64..40.0, 0.0f64..40.0).prop_map(|(i, w, h)| Op::Redraw(i, w, h)),
            (0usize..3).prop_map(Op::Click),
            (0usize..3).prop_map(Op::Hover),
            Just(Op::Finish),
            Just(Op::Reset),
        ]
    }

    proptest! {
        #[test]
        fn prop_at_most_one_editor_open(ops in prop::collection::vec(any_op(), 1..40)) {
            let objects = objects();
            let keys = [RegionKey::new("obj-1"), RegionKey::new("row-2"), RegionKey::new("missing")];
            let mut session = session();
            let mut open: Vec<EditorId> = Vec::new();

            for op in ops {
                let t = match op {
                    Op::Drag(w, h) => session.coords_changed(
                        &CoordsChange::new(None, BoundingBox::new(0.0, 0.0, w, h)),
                        &objects,
                    ),
                    Op::Redraw(i, w, h) => session.coords_changed(
                        &CoordsChange::new(Some(keys[i].clone()), BoundingBox::new(10.0, 10.0, 10.0 + w, 10.0 + h)),
                        &objects,
                    ),
                    Op::Click(i) => session.click(&keys[i], &objects).unwrap_or_default(),
                    Op::Hover(i) => {
                        let _ = session.hover(&keys[i], HoverKind::Enter, &objects);
                        Transition::none()
                    }
                    Op::Finish => session.finish_editing(),
                    Op::Reset => Transition { closed: session.reset(), ..Transition::none() },
                };

                if let Some(closed) = t.closed {
                    open.retain(|id| *id != closed);
                }
                if let Some(request) = t.opened {
                    open.push(request.editor_id);
                }

                prop_assert!(open.len() <= 1);
                prop_assert_eq!(open.first().copied(), session.open_editor());
            }
        }

        #[test]
        fn prop_undersized_drag_always_ends_idle(
            key in prop::option::of(0usize..3),
            x1 in -500.0f64..500.0,
            y1 in -500.0f64..500.0,
            (w, h) in prop_oneof![
                (-500.0f64..4.9, -500.0f64..500.0),
                (-500.0f64..500.0, -500.0f64..4.9),
            ],
            click_first in any::<bool>(),
        ) {
            let objects = objects();
            let keys = [RegionKey::new("obj-1"), RegionKey::new("row-2"), RegionKey::new("missing")];
            let mut session = session();
            let before = if click_first {
                session.click(&keys[0], &objects).unwrap().opened.map(|r| r.editor_id)
            } else {
                None
            };

            let t = session.coords_changed(
                &CoordsChange::new(key.map(|i| keys[i].clone()), BoundingBox::new(x1, y1, x1 + w, y1 + h)),
                &objects,
            );

            prop_assert!(t.opened.is_none());
            prop_assert_eq!(t.closed, before);
            prop_assert_eq!(t.notification, Some(RegionNotification::DoneEditing));
            prop_assert!(session.state().is_idle());
            prop_assert!(session.open_editor().is_none());
        }
    }
}
