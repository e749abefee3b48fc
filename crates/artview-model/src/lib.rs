//! Artifact review model
//!
//! Record shapes shared by every layer of the review view. The field names
//! are contractual: they match what the graph store sends.
//!
//! # Core Concepts
//!
//! - [`Artifact`]: the image, video or document under review
//! - [`VideoTranscript`] / [`TranscriptEntry`]: timed transcript lines
//! - [`DetectedObject`]: bounding-box region, optionally linked to an entity
//! - [`RegionRecord`]: flattened region handed to editors and listeners
//! - [`VerticesUpdated`]: document-scoped change notification
//!
//! # Example
//!
//! ```rust,ignore
//! use artview_model::{Artifact, BoundingBox, DetectedObject, DisplayType};
//!
//! let artifact = Artifact::new("v1", DisplayType::Image)
//!     .with_title("Harbor")
//!     .with_detected_objects(vec![
//!         DetectedObject::from_bbox(BoundingBox::new(10.0, 10.0, 80.0, 60.0)),
//!     ]);
//!
//! let record = artifact.detected_objects[0].flatten();
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod artifact;
mod display_type;
mod ids;
mod properties;
mod region;
mod transcript;

pub use artifact::{Artifact, Concept, ModelError, VertexUpdate, VerticesUpdated};
pub use display_type::DisplayType;
pub use ids::{RegionKey, VertexId};
pub use properties::{Property, VertexProperties, TITLE};
pub use region::{
    find_by_key, sort_left_to_right, BoundingBox, DetectedObject, EntityVertex, RegionRecord,
};
pub use transcript::{TranscriptEntry, VideoTranscript};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
