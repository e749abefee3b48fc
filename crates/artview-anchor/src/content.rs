//! Rendered text content
//!
//! A small node tree standing in for the rendered text surface. Entity
//! metadata is not stored on the nodes: the content owns an explicit
//! node-id → [`EntitySpan`] mapping that anchoring queries by id.
//!
//! Nodes are only ever appended in document order, so a [`NodeId`] also
//! orders nodes in the document.

use artview_model::VertexId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("newline pattern is valid"));

/// Node identifier, ordered by position in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Recorded document offsets of an already-annotated range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertex_id: Option<VertexId>,
}

impl EntitySpan {
    #[inline]
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            vertex_id: None,
        }
    }

    #[must_use]
    pub fn with_vertex(mut self, id: impl Into<VertexId>) -> Self {
        self.vertex_id = Some(id.into());
        self
    }
}

/// One piece of highlighted text as delivered by the data layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum TextSegment {
    /// Unannotated text; newline runs become paragraph breaks
    Plain { text: String },

    /// Text of a resolved or suggested entity
    #[serde(rename_all = "camelCase")]
    Entity {
        text: String,
        start: usize,
        end: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        vertex_id: Option<VertexId>,
    },
}

impl TextSegment {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain { text: text.into() }
    }

    #[must_use]
    pub fn entity(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self::Entity {
            text: text.into(),
            start,
            end,
            vertex_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    /// Block container (the root)
    Block,
    Text(String),
    /// Inline element; entity elements have an entry in the span map
    Inline,
    /// Paragraph break
    Break,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Item of the linear document flow
#[derive(Debug, Clone, Copy)]
pub(crate) enum Flow<'a> {
    Text(NodeId, &'a str),
    Boundary,
}

/// Rendered, entity-annotated text
#[derive(Debug, Clone)]
pub struct RenderedContent {
    nodes: Vec<Node>,
    spans: HashMap<NodeId, EntitySpan>,
}

impl Default for RenderedContent {
    fn default() -> Self {
        ContentBuilder::new().build()
    }
}

impl RenderedContent {
    /// Start building content by hand
    #[inline]
    #[must_use]
    pub fn builder() -> ContentBuilder {
        ContentBuilder::new()
    }

    /// Render highlighted-text segments
    ///
    /// Runs of newlines in plain segments collapse into a single paragraph
    /// break; empty pieces produce no node.
    #[must_use]
    pub fn render(segments: &[TextSegment]) -> Self {
        let mut builder = ContentBuilder::new();
        for segment in segments {
            match segment {
                TextSegment::Plain { text } => {
                    let mut pieces = NEWLINE_RUN.split(text).peekable();
                    while let Some(piece) = pieces.next() {
                        builder = builder.text(piece);
                        if pieces.peek().is_some() {
                            builder = builder.paragraph_break();
                        }
                    }
                }
                TextSegment::Entity {
                    text,
                    start,
                    end,
                    vertex_id,
                } => {
                    let span = EntitySpan {
                        start: *start,
                        end: *end,
                        vertex_id: vertex_id.clone(),
                    };
                    builder = builder.entity(span, text);
                }
            }
        }
        builder.build()
    }

    /// The root block
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Text of a text node, `None` for other nodes
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    /// Span recorded for an element, if it is an entity
    #[inline]
    #[must_use]
    pub fn span(&self, id: NodeId) -> Option<&EntitySpan> {
        self.spans.get(&id)
    }

    /// Span of the nearest entity ancestor of `id`
    #[must_use]
    pub fn enclosing_span(&self, id: NodeId) -> Option<&EntitySpan> {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if let Some(span) = self.span(node) {
                return Some(span);
            }
            current = self.parent(node);
        }
        None
    }

    /// Closest element sibling before `id`, skipping text nodes
    #[must_use]
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = &self.nodes[parent.0].children;
        let position = siblings.iter().position(|&s| s == id)?;
        siblings[..position]
            .iter()
            .rev()
            .copied()
            .find(|s| !matches!(self.nodes[s.0].kind, NodeKind::Text(_)))
    }

    /// Text nodes in document order
    pub fn text_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n.kind, NodeKind::Text(_)))
            .map(|(i, _)| NodeId(i))
    }

    /// Entity spans in document order
    pub fn spans(&self) -> impl Iterator<Item = (NodeId, &EntitySpan)> + '_ {
        let mut spans: Vec<_> = self.spans.iter().map(|(id, span)| (*id, span)).collect();
        spans.sort_by_key(|(id, _)| *id);
        spans.into_iter()
    }

    /// Whole document as text, paragraph breaks as `\n`
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.flow()
            .map(|item| match item {
                Flow::Text(_, text) => text,
                Flow::Boundary => "\n",
            })
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text_nodes().next().is_none()
    }

    /// Linear document flow: text runs and block boundaries
    pub(crate) fn flow(&self) -> impl Iterator<Item = Flow<'_>> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, node)| match &node.kind {
            NodeKind::Text(text) => Some(Flow::Text(NodeId(i), text)),
            NodeKind::Break => Some(Flow::Boundary),
            NodeKind::Block | NodeKind::Inline => None,
        })
    }
}

/// Append-only builder for [`RenderedContent`]
#[derive(Debug)]
pub struct ContentBuilder {
    content: RenderedContent,
    open: Vec<NodeId>,
}

impl ContentBuilder {
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            kind: NodeKind::Block,
            parent: None,
            children: Vec::new(),
        };
        Self {
            content: RenderedContent {
                nodes: vec![root],
                spans: HashMap::new(),
            },
            open: vec![NodeId(0)],
        }
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let parent = self.open.last().copied().unwrap_or(NodeId(0));
        let id = NodeId(self.content.nodes.len());
        self.content.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.content.nodes[parent.0].children.push(id);
        id
    }

    /// Append a text node; empty text is skipped
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        if !text.is_empty() {
            self.push(NodeKind::Text(text.to_string()));
        }
        self
    }

    /// Append an entity element holding `text`
    #[must_use]
    pub fn entity(self, span: EntitySpan, text: &str) -> Self {
        self.open_entity(span).text(text).close_entity()
    }

    /// Open an entity element; following nodes nest inside it
    #[must_use]
    pub fn open_entity(mut self, span: EntitySpan) -> Self {
        let id = self.push(NodeKind::Inline);
        self.content.spans.insert(id, span);
        self.open.push(id);
        self
    }

    /// Close the innermost open entity; the root is never closed
    #[must_use]
    pub fn close_entity(mut self) -> Self {
        if self.open.len() > 1 {
            self.open.pop();
        }
        self
    }

    #[must_use]
    pub fn paragraph_break(mut self) -> Self {
        self.push(NodeKind::Break);
        self
    }

    #[must_use]
    pub fn build(self) -> RenderedContent {
        self.content
    }
}

impl Default for ContentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
