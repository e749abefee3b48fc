//! Transcript synchronization
//!
//! Keeps the current-transcript panel in step with video playback and
//! scrubbing.
//!
//! # Core Concepts
//!
//! - [`active_entry`]: monotonic time search over an ordered transcript
//! - [`TimeIndex`]: per-artifact snapshot of transcript and duration
//! - [`TimeSource`]: playback time or scrubber frame, reduced to milliseconds
//! - [`TranscriptDisplay`]: the formatted line for the panel
//!
//! # Example
//!
//! ```rust,ignore
//! use artview_transcript::{TimeIndex, TimeSource};
//!
//! let index = TimeIndex::from_artifact(&artifact);
//! if let Some(line) = index.display(TimeSource::frame(42, 300)) {
//!     println!("{line}");
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod display;
mod index;
mod source;

pub use display::{format_time_offset, TranscriptDisplay};
pub use index::{active_entry, TimeIndex};
pub use source::TimeSource;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
