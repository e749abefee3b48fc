//! Identifier newtypes
//!
//! Graph vertices and region tags are addressed by opaque strings owned by
//! the external graph store. The newtypes keep the two namespaces apart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a vertex in the knowledge graph
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(String);

impl VertexId {
    /// Create from any string-like value
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VertexId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for VertexId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Key of a rendered region tag
///
/// Either the detected object's `graphVertexId` or, for objects not yet
/// resolved into the graph, its `_rowKey`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionKey(String);

impl RegionKey {
    /// Create from any string-like value
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the raw key
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&VertexId> for RegionKey {
    fn from(value: &VertexId) -> Self {
        Self::new(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_id_serializes_as_plain_string() {
        let id = VertexId::new("v1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"v1\"");
        assert_eq!(id.to_string(), "v1");
    }

    #[test]
    fn region_key_from_vertex_id() {
        let id = VertexId::new("obj-7");
        assert_eq!(RegionKey::from(&id).as_str(), "obj-7");
    }
}
