//! Selection anchoring
//!
//! Turns a raw selection over rendered content into document-level offsets.
//!
//! # Offset recovery
//! Text nodes carry no offsets of their own. Each boundary is resolved
//! against the nearest piece of entity metadata:
//! 1. inside an entity: the entity's recorded `start`
//! 2. right after an entity: that entity's recorded `end`
//! 3. otherwise: `0`
//!
//! plus the boundary's character offset within its node. This is
//! anchor-relative rather than a full document walk, so it is exact only
//! when entity spans are dense relative to plain text runs.

use serde::Serialize;

use crate::content::{NodeId, RenderedContent};
use crate::context::{expand_by_words, ContextSnippet};
use crate::selection::{Boundary, RawSelection};

/// Words of context kept on each side of a selection
pub const DEFAULT_CONTEXT_WORDS: usize = 4;

/// Document character offsets of a selection, always low to high
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionOffsets {
    pub start_offset: usize,
    pub end_offset: usize,
}

impl SelectionOffsets {
    /// Order two offsets
    #[inline]
    #[must_use]
    pub fn sorted(a: usize, b: usize) -> Self {
        Self {
            start_offset: a.min(b),
            end_offset: a.max(b),
        }
    }
}

/// Result of anchoring a selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnchoredSelection {
    pub offsets: SelectionOffsets,
    pub snippet: ContextSnippet,
    /// The selected text as the user sees it
    pub text: String,
}

/// Why a selection could not be anchored
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionRejected {
    #[error("selection is collapsed")]
    Collapsed,

    #[error("selection has {0} ranges, expected exactly one")]
    MultiRange(usize),

    #[error("boundary node {0:?} is not a text node")]
    NotText(NodeId),

    #[error("boundary offset {offset} is past the end of node {node:?} ({len} chars)")]
    OffsetOutOfRange {
        node: NodeId,
        offset: usize,
        len: usize,
    },
}

/// Anchors selections with a fixed amount of context
#[derive(Debug, Clone, Copy)]
pub struct SelectionAnchor {
    context_words: usize,
}

impl Default for SelectionAnchor {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_WORDS)
    }
}

impl SelectionAnchor {
    #[inline]
    #[must_use]
    pub fn new(context_words: usize) -> Self {
        Self { context_words }
    }

    #[inline]
    #[must_use]
    pub fn context_words(&self) -> usize {
        self.context_words
    }

    /// Anchor a selection, `None` if it cannot be anchored
    #[must_use]
    pub fn anchor(&self, selection: &RawSelection, content: &RenderedContent) -> Option<AnchoredSelection> {
        match self.try_anchor(selection, content) {
            Ok(anchored) => Some(anchored),
            Err(reason) => {
                tracing::debug!(%reason, "selection not anchored");
                None
            }
        }
    }

    /// Anchor a selection, reporting why it was rejected
    ///
    /// # Errors
    /// - [`SelectionRejected::Collapsed`] for an empty selection
    /// - [`SelectionRejected::MultiRange`] unless exactly one range is selected
    /// - [`SelectionRejected::NotText`] / [`SelectionRejected::OffsetOutOfRange`]
    ///   for boundaries that do not point into a text node
    pub fn try_anchor(
        &self,
        selection: &RawSelection,
        content: &RenderedContent,
    ) -> Result<AnchoredSelection, SelectionRejected> {
        if selection.range_count != 1 {
            return Err(SelectionRejected::MultiRange(selection.range_count));
        }
        if selection.is_collapsed() {
            return Err(SelectionRejected::Collapsed);
        }

        let anchor = document_offset(content, selection.anchor)?;
        let focus = document_offset(content, selection.focus)?;
        let offsets = SelectionOffsets::sorted(anchor, focus);

        let (start, end) = selection.ordered();
        let snippet = expand_by_words(content, start, end, self.context_words);
        let text = snippet.selected.clone();

        Ok(AnchoredSelection {
            offsets,
            snippet,
            text,
        })
    }
}

/// Base offset a node's local offsets are relative to
#[must_use]
pub fn base_offset(content: &RenderedContent, node: NodeId) -> usize {
    if let Some(span) = content.enclosing_span(node) {
        return span.start;
    }
    content
        .previous_element_sibling(node)
        .and_then(|sibling| content.span(sibling))
        .map_or(0, |span| span.end)
}

fn document_offset(content: &RenderedContent, boundary: Boundary) -> Result<usize, SelectionRejected> {
    let text = content
        .text(boundary.node)
        .ok_or(SelectionRejected::NotText(boundary.node))?;
    let len = text.chars().count();
    if boundary.offset > len {
        return Err(SelectionRejected::OffsetOutOfRange {
            node: boundary.node,
            offset: boundary.offset,
            len,
        });
    }
    Ok(base_offset(content, boundary.node) + boundary.offset)
}
