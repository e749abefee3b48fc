//! View configuration
//!
//! Defaults match the review UI: four words of context on each side of a
//! copied selection, a five-unit minimum region extent and the stock
//! no-text notice.

use serde::{Deserialize, Serialize};
use std::path::Path;

use artview_anchor::DEFAULT_CONTEXT_WORDS;
use artview_region::MIN_REGION_EXTENT;

/// Notice shown for documents without highlighted text
pub const NO_TEXT_NOTICE: &str = "No Text Available";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML did not match the expected shape
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Tunables of an [`crate::ArtifactView`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ViewConfig {
    /// Whole words of context captured on each side of a copied selection
    pub context_words: usize,
    /// Smallest width or height of a drawn region
    pub min_region_extent: f64,
    /// Notice shown when a document has no highlighted text
    pub no_text_notice: String,
}

impl ViewConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_context_words(mut self, words: usize) -> Self {
        self.context_words = words;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_min_region_extent(mut self, extent: f64) -> Self {
        self.min_region_extent = extent;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_no_text_notice(mut self, notice: impl Into<String>) -> Self {
        self.no_text_notice = notice.into();
        self
    }

    /// Parse a TOML document; missing keys keep their defaults
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed TOML and
    /// [`ConfigError::InvalidValue`] when a value is out of range.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// See [`ViewConfig::from_toml_str`]; I/O failures map to
    /// [`ConfigError::Io`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for a negative or non-finite
    /// minimum extent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_region_extent.is_finite() || self.min_region_extent < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "min_region_extent",
                reason: format!("expected a non-negative number, got {}", self.min_region_extent),
            });
        }
        Ok(())
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            context_words: DEFAULT_CONTEXT_WORDS,
            min_region_extent: MIN_REGION_EXTENT,
            no_text_notice: NO_TEXT_NOTICE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ViewConfig::new();
        assert_eq!(config.context_words, 4);
        assert_eq!(config.min_region_extent, 5.0);
        assert_eq!(config.no_text_notice, "No Text Available");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ViewConfig::from_toml_str("context_words = 6\n").unwrap();
        assert_eq!(config.context_words, 6);
        assert_eq!(config.min_region_extent, 5.0);
    }

    #[test]
    fn rejects_negative_extent() {
        let err = ViewConfig::from_toml_str("min_region_extent = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "min_region_extent", .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            ViewConfig::from_toml_str("context_words = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn builder_setters() {
        let config = ViewConfig::new()
            .with_context_words(2)
            .with_min_region_extent(8.0)
            .with_no_text_notice("Nothing here");
        assert_eq!(config.context_words, 2);
        assert_eq!(config.min_region_extent, 8.0);
        assert_eq!(config.no_text_notice, "Nothing here");
    }
}
