//! Artifact display types

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an artifact is presented in the review view
///
/// Unknown concept display types are carried through verbatim so that
/// re-serialized records round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DisplayType {
    Image,
    Video,
    Document,
    Other(String),
}

impl DisplayType {
    /// Image or video: the types that carry region overlays
    #[inline]
    #[must_use]
    pub fn is_media(&self) -> bool {
        matches!(self, Self::Image | Self::Video)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Document => "document",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for DisplayType {
    fn from(value: &str) -> Self {
        match value {
            "image" => Self::Image,
            "video" => Self::Video,
            "document" => Self::Document,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for DisplayType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<DisplayType> for String {
    fn from(value: DisplayType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
