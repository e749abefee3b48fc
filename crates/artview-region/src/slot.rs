//! The single open-editor slot
//!
//! At most one editor form is open per region overlay. Opening an editor
//! always releases the previous one first; there is no lock, the
//! single-threaded caller applies the returned teardown before the open.

use artview_model::{RegionKey, RegionRecord, VertexId, VertexProperties};
use serde::Serialize;
use std::fmt;
use ulid::Ulid;

/// Identity of one opened editor form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EditorId(pub Ulid);

impl EditorId {
    /// Generate new editor ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for EditorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EditorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the editor form is positioned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "key")]
pub enum EditorAnchor {
    /// Next to a clicked region tag
    Tag(RegionKey),
    /// Against the region overlay as a whole
    Overlay,
}

/// Entity the editor starts from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedVertex {
    pub id: Option<VertexId>,
    pub properties: VertexProperties,
}

/// Seed for an editor form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorRequest {
    pub editor_id: EditorId,
    pub artifact_id: VertexId,
    pub data_info: RegionRecord,
    pub resolved_vertex: ResolvedVertex,
    pub existing: bool,
    pub detected_object: bool,
    pub anchor: EditorAnchor,
}

impl EditorRequest {
    /// Seed a new editor for `record`
    ///
    /// The form treats the record as existing when it was marked so or
    /// already resolves to an entity.
    #[must_use]
    pub fn new(artifact_id: VertexId, record: RegionRecord, anchor: EditorAnchor) -> Self {
        let resolved_vertex = ResolvedVertex {
            id: record.id.clone(),
            properties: record.properties.clone(),
        };
        Self {
            editor_id: EditorId::new(),
            artifact_id,
            existing: record.existing || resolved_vertex.id.is_some(),
            resolved_vertex,
            data_info: record,
            detected_object: true,
            anchor,
        }
    }
}

/// Exclusive editor slot of one overlay
#[derive(Debug, Default)]
pub struct EditorSlot {
    open: Option<EditorId>,
}

impl EditorSlot {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupy the slot, returning the editor that must be torn down first
    pub fn open(&mut self, editor: EditorId) -> Option<EditorId> {
        self.open.replace(editor)
    }

    /// Empty the slot, returning the editor that was open
    pub fn release(&mut self) -> Option<EditorId> {
        self.open.take()
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<EditorId> {
        self.open
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}
