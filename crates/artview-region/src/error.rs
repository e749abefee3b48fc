//! Region session errors

use artview_model::RegionKey;
use thiserror::Error;

/// Errors from region gestures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    /// Gesture named a region the artifact does not have
    #[error("unknown region: {0}")]
    UnknownRegion(RegionKey),
}

/// Result alias for region operations
pub type Result<T> = std::result::Result<T, RegionError>;
