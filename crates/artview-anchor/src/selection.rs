//! Raw user selections

use serde::{Deserialize, Serialize};

use crate::content::NodeId;

/// One end of a selection: a text node and a character offset into it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Boundary {
    pub node: NodeId,
    pub offset: usize,
}

impl Boundary {
    #[inline]
    #[must_use]
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// Selection as reported by the text surface
///
/// `anchor` is where the drag started, `focus` where it ended; a backwards
/// drag has `focus` before `anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSelection {
    pub anchor: Boundary,
    pub focus: Boundary,
    pub range_count: usize,
}

impl RawSelection {
    /// Single-range selection
    #[inline]
    #[must_use]
    pub fn new(anchor: Boundary, focus: Boundary) -> Self {
        Self {
            anchor,
            focus,
            range_count: 1,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_range_count(mut self, range_count: usize) -> Self {
        self.range_count = range_count;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Boundaries in document order
    #[inline]
    #[must_use]
    pub fn ordered(&self) -> (Boundary, Boundary) {
        if self.focus < self.anchor {
            (self.focus, self.anchor)
        } else {
            (self.anchor, self.focus)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_swaps_backward_drag() {
        let a = Boundary::new(NodeId(3), 2);
        let b = Boundary::new(NodeId(1), 7);
        assert_eq!(RawSelection::new(a, b).ordered(), (b, a));
        assert_eq!(RawSelection::new(b, a).ordered(), (b, a));
    }

    #[test]
    fn same_boundary_is_collapsed() {
        let a = Boundary::new(NodeId(1), 4);
        assert!(RawSelection::new(a, a).is_collapsed());
        assert!(!RawSelection::new(a, Boundary::new(NodeId(1), 5)).is_collapsed());
    }
}
