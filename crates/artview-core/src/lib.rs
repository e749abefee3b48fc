//! Artifact view - anchoring and synchronization engine
//!
//! The orchestrator that:
//! - Loads an artifact and renders it through a [`ViewSurface`]
//! - Keeps the transcript panel in sync with playback and scrubbing
//! - Anchors copied text selections to document offsets
//! - Runs the exclusive region edit session over images and video frames
//! - Tracks `verticesUpdated` on the document bus
//!
//! # Example
//!
//! ```rust,ignore
//! use artview_core::prelude::*;
//!
//! # async fn example(data: Arc<dyn DataLayer>, surface: Arc<dyn ViewSurface>, sink: Arc<dyn EventSink>) -> Result<()> {
//! let bus = DocumentBus::new();
//! let mut view = ArtifactView::new("video-1", data, surface, sink, bus.clone())
//!     .with_config(ViewConfig::new().with_context_words(6));
//!
//! view.attach().await?;
//! view.handle(InboundEvent::VideoTimeUpdate { current_time: 3.5 })?;
//! view.teardown();
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod bus;
pub mod collab;
pub mod config;
pub mod error;
pub mod event;
pub mod lifecycle;
pub mod view;

pub use bus::{DocumentBus, Subscription};
pub use collab::{
    DataLayer, EventSink, TextBody, TextResponse, ViewSurface, WidgetHandle, WidgetSpec, NO_CONTENT,
};
pub use config::{ConfigError, ViewConfig, NO_TEXT_NOTICE};
pub use error::{Result, ViewError};
pub use event::{CopyDocumentText, InboundEvent, OutboundEvent};
pub use lifecycle::LifecycleHandle;
pub use view::ArtifactView;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for hosting an artifact view
    pub use crate::{
        ArtifactView, DataLayer, DocumentBus, EventSink, InboundEvent, OutboundEvent, Result,
        TextBody, TextResponse, ViewConfig, ViewError, ViewSurface, WidgetHandle, WidgetSpec,
    };
    pub use std::sync::Arc;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
