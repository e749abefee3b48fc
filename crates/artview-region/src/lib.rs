//! Region edit session
//!
//! Exclusive editing of detected-object bounding boxes on an image or
//! video frame.
//!
//! # Core Concepts
//!
//! - [`RegionEditSession`]: turns click, hover and drag gestures into
//!   [`Transition`]s
//! - [`EditorSlot`]: at most one editor form open per overlay
//! - [`EditState`]: idle, editing an existing region or drawing a new one
//!
//! # Example
//!
//! ```rust,ignore
//! use artview_region::{CoordsChange, RegionEditSession};
//!
//! let mut session = RegionEditSession::new(artifact.id.clone());
//! let t = session.coords_changed(&CoordsChange::new(None, bbox), &artifact.detected_objects);
//! if let Some(closed) = t.closed { surface.close_editor(closed); }
//! if let Some(request) = t.opened { surface.open_editor(request); }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod gesture;
mod session;
mod slot;
mod state;

pub use error::{RegionError, Result};
pub use gesture::{CoordsChange, HoverKind, MIN_REGION_EXTENT};
pub use session::{RegionEditSession, RegionNotification, Transition};
pub use slot::{EditorAnchor, EditorId, EditorRequest, EditorSlot, ResolvedVertex};
pub use state::{EditState, Trigger};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
