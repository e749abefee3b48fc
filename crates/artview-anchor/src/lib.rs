//! Selection anchoring
//!
//! Maps a user's text selection over rendered, entity-annotated text to
//! stable document offsets and a short context snippet for review.
//!
//! # Core Concepts
//!
//! - [`RenderedContent`]: node tree of the text surface with an explicit
//!   node → [`EntitySpan`] mapping
//! - [`RawSelection`]: anchor/focus boundaries as reported by the surface
//! - [`SelectionAnchor`]: computes [`SelectionOffsets`] and a [`ContextSnippet`]
//!
//! # Example
//!
//! ```rust,ignore
//! use artview_anchor::{Boundary, RawSelection, RenderedContent, SelectionAnchor, TextSegment};
//!
//! let content = RenderedContent::render(&segments);
//! let nodes: Vec<_> = content.text_nodes().collect();
//! let selection = RawSelection::new(Boundary::new(nodes[2], 4), Boundary::new(nodes[0], 1));
//!
//! if let Some(anchored) = SelectionAnchor::default().anchor(&selection, &content) {
//!     println!("{}..{}", anchored.offsets.start_offset, anchored.offsets.end_offset);
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod anchor;
mod content;
mod context;
mod selection;

pub use anchor::{
    base_offset, AnchoredSelection, SelectionAnchor, SelectionOffsets, SelectionRejected,
    DEFAULT_CONTEXT_WORDS,
};
pub use content::{ContentBuilder, EntitySpan, NodeId, RenderedContent, TextSegment};
pub use context::ContextSnippet;
pub use selection::{Boundary, RawSelection};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
