//! Edit state and its transition function
//!
//! Every state change of a [`crate::RegionEditSession`] goes through
//! [`EditState::on`], so the reachable states can be checked without any
//! editors or events involved.

use artview_model::{BoundingBox, RegionKey};
use serde::Serialize;

/// What, if anything, is being edited
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "target")]
pub enum EditState {
    /// No editor open
    #[default]
    Idle,
    /// Editing an existing region
    EditingExisting(RegionKey),
    /// Drawing a new region
    EditingNew(BoundingBox),
}

/// Something that happened to the session
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// A region tag was clicked
    Clicked(RegionKey),
    /// An existing region was dragged to new coordinates
    Redrawn(RegionKey),
    /// A new region was drawn
    Drawn(BoundingBox),
    /// A drag was too small to count
    Discarded,
    /// The editor was dismissed or its result committed
    Finished,
    /// Pointer entered or left a region tag
    Hovered,
}

impl EditState {
    /// State after `trigger`
    #[must_use]
    pub fn on(&self, trigger: &Trigger) -> EditState {
        match trigger {
            Trigger::Clicked(key) | Trigger::Redrawn(key) => Self::EditingExisting(key.clone()),
            Trigger::Drawn(bbox) => Self::EditingNew(*bbox),
            Trigger::Discarded | Trigger::Finished => Self::Idle,
            Trigger::Hovered => self.clone(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Key of the region being edited, if it is an existing one
    #[must_use]
    pub fn editing_key(&self) -> Option<&RegionKey> {
        match self {
            Self::EditingExisting(key) => Some(key),
            _ => None,
        }
    }
}
