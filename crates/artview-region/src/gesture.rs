//! Pointer gestures over region tags

use artview_model::{BoundingBox, RegionKey};
use serde::{Deserialize, Serialize};

/// Smallest width or height a drawn region may have
pub const MIN_REGION_EXTENT: f64 = 5.0;

/// `DetectedObjectCoordsChange`: a region was drawn or dragged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordsChange {
    /// Key of the region being redrawn; absent or unknown for a new region
    #[serde(default)]
    pub id: Option<RegionKey>,
    #[serde(flatten)]
    pub bbox: BoundingBox,
}

impl CoordsChange {
    #[inline]
    #[must_use]
    pub fn new(id: Option<RegionKey>, bbox: BoundingBox) -> Self {
        Self { id, bbox }
    }
}

/// Pointer entering or leaving a region tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HoverKind {
    Enter,
    Leave,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_change_reads_flat_payload() {
        let change: CoordsChange =
            serde_json::from_str(r#"{"id":"obj-1","x1":10,"y1":10,"x2":12,"y2":40}"#).unwrap();
        assert_eq!(change.id, Some(RegionKey::new("obj-1")));
        assert_eq!(change.bbox.width(), 2.0);
    }

    #[test]
    fn coords_change_without_id_is_new() {
        let change: CoordsChange =
            serde_json::from_str(r#"{"x1":0,"y1":0,"x2":50,"y2":40}"#).unwrap();
        assert!(change.id.is_none());
    }
}
