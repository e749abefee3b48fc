//! Artifact record
//!
//! The artifact under review as returned by the data layer. The review view
//! holds a read snapshot for the duration of one attachment.

use serde::{Deserialize, Serialize};

use crate::display_type::DisplayType;
use crate::ids::VertexId;
use crate::properties::{VertexProperties, TITLE};
use crate::region::DetectedObject;
use crate::transcript::VideoTranscript;

/// Errors related to model records
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Transcript entries out of `start` order
    #[error("transcript entry {index} starts before its predecessor")]
    UnorderedTranscript { index: usize },

    /// Record could not be decoded
    #[error("invalid record: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Concept metadata of an artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub display_type: DisplayType,
}

/// The media or document record under review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub id: VertexId,
    #[serde(default)]
    pub properties: VertexProperties,
    pub concept: Concept,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_transcript: Option<VideoTranscript>,
    /// Video length in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detected_objects: Vec<DetectedObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_raw_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_frames_src: Option<String>,
}

impl Artifact {
    /// Bare artifact of the given display type
    #[must_use]
    pub fn new(id: impl Into<VertexId>, display_type: DisplayType) -> Self {
        Self {
            id: id.into(),
            properties: VertexProperties::new(),
            concept: Concept { display_type },
            video_transcript: None,
            video_duration: None,
            detected_objects: Vec::new(),
            image_src: None,
            image_raw_src: None,
            image_frames_src: None,
        }
    }

    /// Decode from the data layer's JSON shape
    ///
    /// # Errors
    /// Returns [`ModelError::Decode`] if the JSON does not match.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.properties.insert(TITLE, title.into());
        self
    }

    #[must_use]
    pub fn with_transcript(mut self, transcript: VideoTranscript) -> Self {
        self.video_transcript = Some(transcript);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration_ms: f64) -> Self {
        self.video_duration = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn with_detected_objects(mut self, objects: Vec<DetectedObject>) -> Self {
        self.detected_objects = objects;
        self
    }

    /// Set poster, raw and frame-strip URLs
    #[must_use]
    pub fn with_media(
        mut self,
        image_src: impl Into<String>,
        image_raw_src: impl Into<String>,
        image_frames_src: Option<String>,
    ) -> Self {
        self.image_src = Some(image_src.into());
        self.image_raw_src = Some(image_raw_src.into());
        self.image_frames_src = image_frames_src;
        self
    }

    #[inline]
    #[must_use]
    pub fn display_type(&self) -> &DisplayType {
        &self.concept.display_type
    }

    /// Display title, empty when the record has none
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        self.properties.title().unwrap_or_default()
    }
}

/// One changed vertex in a `verticesUpdated` notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexUpdate {
    pub id: VertexId,
    #[serde(default)]
    pub properties: VertexProperties,
}

/// Document-scoped notification that vertices changed in the graph store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerticesUpdated {
    #[serde(default)]
    pub vertices: Vec<VertexUpdate>,
}

impl VerticesUpdated {
    /// First update matching `id`
    #[must_use]
    pub fn find(&self, id: &VertexId) -> Option<&VertexUpdate> {
        self.vertices.iter().find(|v| &v.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_store_record() {
        let artifact = Artifact::from_json(
            &json!({
                "id": "v1",
                "properties": {"title": {"value": "Harbor"}},
                "concept": {"displayType": "video"},
                "videoDuration": 5000.0,
                "videoTranscript": {"entries": [{"start": 0.0, "end": 2000.0, "text": "A"}]},
                "detectedObjects": [{"_rowKey": "r1", "x1": 1.0, "y1": 1.0, "x2": 9.0, "y2": 9.0}],
                "imageRawSrc": "/raw/v1"
            })
            .to_string(),
        )
        .unwrap();

        assert_eq!(artifact.title(), "Harbor");
        assert_eq!(artifact.display_type(), &DisplayType::Video);
        assert_eq!(artifact.video_duration, Some(5000.0));
        assert_eq!(artifact.video_transcript.as_ref().map(VideoTranscript::len), Some(1));
        assert_eq!(artifact.detected_objects.len(), 1);
        assert_eq!(artifact.image_raw_src.as_deref(), Some("/raw/v1"));
    }

    #[test]
    fn decode_error_is_reported() {
        let err = Artifact::from_json("{\"id\": 3}").unwrap_err();
        assert!(err.to_string().starts_with("invalid record"));
    }

    #[test]
    fn untitled_artifact_has_empty_title() {
        assert_eq!(Artifact::new("v1", DisplayType::Document).title(), "");
    }

    #[test]
    fn vertices_updated_finds_matching_id() {
        let event: VerticesUpdated = serde_json::from_value(json!({
            "vertices": [
                {"id": "v2", "properties": {}},
                {"id": "v1", "properties": {"title": {"value": "New Title"}}}
            ]
        }))
        .unwrap();

        let hit = event.find(&VertexId::new("v1")).unwrap();
        assert_eq!(hit.properties.title(), Some("New Title"));
        assert!(event.find(&VertexId::new("v9")).is_none());
    }
}
