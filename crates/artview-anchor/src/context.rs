//! Context snippets around a selection
//!
//! A reviewer confirming an annotation sees the selected text with a few
//! words of surrounding context. Expansion never crosses a paragraph break.

use serde::Serialize;
use std::fmt;

use crate::content::{Flow, RenderedContent};
use crate::selection::Boundary;

/// Selected text with its surrounding words
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextSnippet {
    pub before: String,
    pub selected: String,
    pub after: String,
}

impl ContextSnippet {
    /// Snippet markup: `...before<span class="selection">selected</span>after...`
    ///
    /// The three pieces are HTML-escaped.
    #[must_use]
    pub fn to_markup(&self) -> String {
        format!(
            "...{}<span class=\"selection\">{}</span>{}...",
            escape(&self.before),
            escape(&self.selected),
            escape(&self.after)
        )
    }
}

impl fmt::Display for ContextSnippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "...{}[{}]{}...", self.before, self.selected, self.after)
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Character slice by char offsets, clamped to the string
fn char_slice(text: &str, from: usize, to: usize) -> &str {
    let byte = |n: usize| text.char_indices().nth(n).map_or(text.len(), |(i, _)| i);
    let (from, to) = (byte(from), byte(to.max(from)));
    &text[from..to]
}

/// Text between two ordered boundaries; paragraph breaks read as `\n`
pub(crate) fn text_between(content: &RenderedContent, start: Boundary, end: Boundary) -> String {
    let mut out = String::new();
    let mut inside = false;

    for item in content.flow() {
        match item {
            Flow::Text(id, text) if id == start.node && id == end.node => {
                return char_slice(text, start.offset, end.offset).to_string();
            }
            Flow::Text(id, text) if id == start.node => {
                out.push_str(char_slice(text, start.offset, usize::MAX));
                inside = true;
            }
            Flow::Text(id, text) if id == end.node => {
                out.push_str(char_slice(text, 0, end.offset));
                break;
            }
            Flow::Text(_, text) if inside => out.push_str(text),
            Flow::Boundary if inside => out.push('\n'),
            _ => {}
        }
    }
    out
}

/// Block-local text before `at`
fn text_before(content: &RenderedContent, at: Boundary) -> String {
    let mut block = String::new();
    for item in content.flow() {
        match item {
            Flow::Boundary => block.clear(),
            Flow::Text(id, text) if id == at.node => {
                block.push_str(char_slice(text, 0, at.offset));
                break;
            }
            Flow::Text(_, text) => block.push_str(text),
        }
    }
    block
}

/// Block-local text after `at`
fn text_after(content: &RenderedContent, at: Boundary) -> String {
    let mut block = String::new();
    let mut started = false;
    for item in content.flow() {
        match item {
            Flow::Text(id, text) if id == at.node => {
                block.push_str(char_slice(text, at.offset, usize::MAX));
                started = true;
            }
            Flow::Text(_, text) if started => block.push_str(text),
            Flow::Boundary if started => break,
            _ => {}
        }
    }
    block
}

/// Suffix of `text` holding its last `n` words
pub(crate) fn trailing_words(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    let mut words = 0;
    let mut in_word = false;
    for (i, c) in text.char_indices().rev() {
        if c.is_whitespace() {
            if in_word {
                words += 1;
                in_word = false;
                if words == n {
                    return &text[i + c.len_utf8()..];
                }
            }
        } else {
            in_word = true;
        }
    }
    text
}

/// Prefix of `text` holding its first `n` words
pub(crate) fn leading_words(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    let mut words = 0;
    let mut in_word = false;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if in_word {
                words += 1;
                in_word = false;
                if words == n {
                    return &text[..i];
                }
            }
        } else {
            in_word = true;
        }
    }
    text
}

/// Expand the range `start..end` by `words` words on each side
pub(crate) fn expand_by_words(
    content: &RenderedContent,
    start: Boundary,
    end: Boundary,
    words: usize,
) -> ContextSnippet {
    let before = text_before(content, start);
    let after = text_after(content, end);
    ContextSnippet {
        before: trailing_words(&before, words).to_string(),
        selected: text_between(content, start, end),
        after: leading_words(&after, words).to_string(),
    }
}
