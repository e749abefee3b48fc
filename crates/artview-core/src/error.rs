//! Error types for the artifact view
//!
//! Nothing here is fatal to the host application. Cancellation, late
//! responses and events that arrive before the artifact is loaded are
//! reported as silent errors so callers can drop them without surfacing
//! anything to the user.

use artview_model::ModelError;
use artview_region::RegionError;

use crate::config::ConfigError;

/// Main view error type
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// A data-layer request failed
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The view was torn down or its load cancelled
    #[error("view cancelled")]
    Cancelled,

    /// `attach` was called on a view that already attached
    #[error("view already attached")]
    AlreadyAttached,

    /// An event needed the artifact before it was loaded
    #[error("artifact not loaded")]
    NotLoaded,

    /// Region gesture failed
    #[error("region error: {0}")]
    Region(#[from] RegionError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed record
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ViewError {
    /// Build a fetch error from any displayable cause
    #[must_use]
    pub fn fetch(cause: impl std::fmt::Display) -> Self {
        Self::Fetch(cause.to_string())
    }

    /// Whether the error should be dropped without surfacing it
    #[inline]
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Cancelled | Self::NotLoaded)
    }
}

/// Result alias for view operations
pub type Result<T> = std::result::Result<T, ViewError>;
