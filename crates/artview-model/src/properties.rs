//! Vertex property bags
//!
//! The graph store hands out properties as `{name: {value: ...}}` maps.
//! Field order is kept so re-serialized records read the same way the store
//! sent them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the property carrying a vertex's display title
pub const TITLE: &str = "title";

/// A single vertex property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Raw property value
    pub value: Value,
}

impl Property {
    /// Create from any JSON-convertible value
    #[inline]
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Value as a string slice, if it is a JSON string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// Ordered property bag of a vertex
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexProperties(IndexMap<String, Property>);

impl VertexProperties {
    /// Create empty bag
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a property
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), Property::new(value));
    }

    /// Look up a property by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.0.get(name)
    }

    /// The `title` property as text
    #[inline]
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.get(TITLE).and_then(Property::as_str)
    }

    /// Overlay `other` on top of `self`, key by key (other wins)
    pub fn overlay(&mut self, other: &VertexProperties) {
        for (name, property) in &other.0 {
            self.0.insert(name.clone(), property.clone());
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn title_reads_string_value() {
        let props = VertexProperties::new().with(TITLE, "Harbor footage");
        assert_eq!(props.title(), Some("Harbor footage"));
    }

    #[test]
    fn title_ignores_non_string_value() {
        let props = VertexProperties::new().with(TITLE, 42);
        assert_eq!(props.title(), None);
    }

    #[test]
    fn overlay_replaces_matching_keys_and_keeps_order() {
        let mut base = VertexProperties::new()
            .with("a", 1)
            .with(TITLE, "old")
            .with("b", 2);
        let top = VertexProperties::new().with(TITLE, "new").with("c", 3);

        base.overlay(&top);

        let names: Vec<_> = base.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", TITLE, "b", "c"]);
        assert_eq!(base.title(), Some("new"));
    }

    #[test]
    fn deserializes_store_shape() {
        let props: VertexProperties =
            serde_json::from_value(json!({"title": {"value": "New Title"}})).unwrap();
        assert_eq!(props.title(), Some("New Title"));
    }
}
