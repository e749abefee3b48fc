//! Detected-object regions
//!
//! A [`DetectedObject`] is a bounding box over an image or video frame,
//! optionally linked to a resolved graph entity. Consumers that only need a
//! flat record (the editor form, hover highlighting) go through
//! [`DetectedObject::flatten`].

use serde::{Deserialize, Serialize};

use crate::ids::{RegionKey, VertexId};
use crate::properties::VertexProperties;

/// Axis-aligned box in pixel or normalized coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    #[inline]
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// `x2 - x1`, negative when the corners are swapped
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// `y2 - y1`, negative when the corners are swapped
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Both dimensions are at least `min`
    ///
    /// Non-finite coordinates never meet the minimum.
    #[inline]
    #[must_use]
    pub fn meets_minimum_extent(&self, min: f64) -> bool {
        self.width() >= min && self.height() >= min
    }
}

/// Graph entity a detected object resolves to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityVertex {
    pub id: VertexId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    #[serde(default)]
    pub properties: VertexProperties,
}

/// Bounding-box region attached to an artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_vertex_id: Option<VertexId>,
    #[serde(rename = "_rowKey", default, skip_serializing_if = "Option::is_none")]
    pub row_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    #[serde(flatten)]
    pub bbox: BoundingBox,
    #[serde(default, skip_serializing_if = "VertexProperties::is_empty")]
    pub properties: VertexProperties,
    /// Weak link to the resolved entity, never owned by the object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_vertex: Option<EntityVertex>,
}

impl DetectedObject {
    /// Object with only coordinates set
    #[must_use]
    pub fn from_bbox(bbox: BoundingBox) -> Self {
        Self {
            graph_vertex_id: None,
            row_key: None,
            concept: None,
            bbox,
            properties: VertexProperties::new(),
            entity_vertex: None,
        }
    }

    #[must_use]
    pub fn with_graph_vertex_id(mut self, id: impl Into<VertexId>) -> Self {
        self.graph_vertex_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_row_key(mut self, key: impl Into<String>) -> Self {
        self.row_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_entity(mut self, entity: EntityVertex) -> Self {
        self.entity_vertex = Some(entity);
        self
    }

    /// Region tag key: `graphVertexId`, falling back to `_rowKey`
    #[must_use]
    pub fn key(&self) -> Option<RegionKey> {
        self.graph_vertex_id
            .as_ref()
            .map(RegionKey::from)
            .or_else(|| self.row_key.as_deref().map(RegionKey::from))
    }

    /// Copy of the object's own fields as a record
    ///
    /// The linked entity is neither merged nor carried, so `id` stays unset.
    #[must_use]
    pub fn to_record(&self) -> RegionRecord {
        RegionRecord {
            id: None,
            graph_vertex_id: self.graph_vertex_id.clone(),
            row_key: self.row_key.clone(),
            concept: self.concept.clone(),
            bbox: self.bbox,
            properties: self.properties.clone(),
            existing: false,
        }
    }

    /// Merge the linked entity into a flat record
    ///
    /// Precedence: entity `id`, `concept` and same-named properties override
    /// the object's own; the entity back-reference is dropped. `existing` is
    /// left `false` for the caller to decide.
    #[must_use]
    pub fn flatten(&self) -> RegionRecord {
        let mut record = self.to_record();

        if let Some(entity) = &self.entity_vertex {
            record.id = Some(entity.id.clone());
            if entity.concept.is_some() {
                record.concept = entity.concept.clone();
            }
            record.properties.overlay(&entity.properties);
        }

        record
    }
}

/// Flattened region record handed to the editor form and hover listeners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    /// Resolved entity id, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VertexId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_vertex_id: Option<VertexId>,
    #[serde(rename = "_rowKey", default, skip_serializing_if = "Option::is_none")]
    pub row_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    #[serde(flatten)]
    pub bbox: BoundingBox,
    #[serde(default)]
    pub properties: VertexProperties,
    #[serde(default)]
    pub existing: bool,
}

impl RegionRecord {
    /// Empty record carrying only coordinates (a region being drawn)
    #[must_use]
    pub fn drawn(bbox: BoundingBox) -> Self {
        DetectedObject::from_bbox(bbox).flatten()
    }

    /// Region tag key of the source object, if it had one
    #[must_use]
    pub fn key(&self) -> Option<RegionKey> {
        self.graph_vertex_id
            .as_ref()
            .map(RegionKey::from)
            .or_else(|| self.row_key.as_deref().map(RegionKey::from))
    }
}

/// Sort regions left to right by `x1`
///
/// Stable: regions sharing an `x1` keep their original relative order.
pub fn sort_left_to_right(objects: &mut [DetectedObject]) {
    objects.sort_by(|a, b| a.bbox.x1.total_cmp(&b.bbox.x1));
}

/// Find a region by its tag key
#[must_use]
pub fn find_by_key<'a>(objects: &'a [DetectedObject], key: &RegionKey) -> Option<&'a DetectedObject> {
    objects.iter().find(|o| o.key().as_ref() == Some(key))
}
