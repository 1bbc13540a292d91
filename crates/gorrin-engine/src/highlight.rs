//! Live search-term highlighting.
//!
//! The editor rebuilds the decorator on every keystroke in the search field
//! (and on focus-in when the field already holds a value). [`decorate`] is a
//! pure function with no subscription or callback state: the caller
//! re-evaluates, the renderer restyles, the document is never touched.

use serde::{Deserialize, Serialize};

use gorrin_types::{Block, BlockKey, Document};

use crate::matcher::Matcher;

/// A match location a renderer can style: block key plus a half-open byte
/// range into that block's text, valid for the text the span was computed
/// against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub key: BlockKey,
    pub start: usize,
    pub end: usize,
}

/// Per-block decoration function for one search term.
///
/// Holds nothing but the compiled term; produces spans on demand and retains
/// no state between calls.
pub struct Decorator {
    matcher: Option<Matcher>,
}

/// Build the decorator for the current search term.
///
/// An empty term decorates nothing — the editor shows no highlight while the
/// field is blank. A term that fails to compile as a regex also decorates
/// nothing (fail closed, reported once here rather than per block). The term
/// is regex syntax, never escaped — see the crate docs for the hazard note.
pub fn decorate(term: &str) -> Decorator {
    if term.is_empty() {
        return Decorator { matcher: None };
    }
    match Matcher::new(term) {
        Ok(matcher) => Decorator {
            matcher: Some(matcher),
        },
        Err(err) => {
            tracing::warn!(%err, "search term does not compile; highlighting nothing");
            Decorator { matcher: None }
        }
    }
}

impl Decorator {
    /// True when this decorator can never yield a span (empty or
    /// unparseable term).
    pub fn is_inert(&self) -> bool {
        self.matcher.is_none()
    }

    /// Spans to decorate within one block.
    pub fn block_spans(&self, block: &Block) -> Vec<MatchSpan> {
        match &self.matcher {
            None => Vec::new(),
            Some(matcher) => matcher
                .find_spans(&block.text)
                .map(|s| MatchSpan {
                    key: block.key,
                    start: s.start,
                    end: s.end,
                })
                .collect(),
        }
    }

    /// Spans to decorate across the whole document, in block order.
    pub fn document_spans(&self, document: &Document) -> Vec<MatchSpan> {
        document
            .blocks()
            .iter()
            .flat_map(|block| self.block_spans(block))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_term_decorates_nothing() {
        let decorator = decorate("");
        assert!(decorator.is_inert());
        let doc = Document::from_plain_text("anything at all\nmore text");
        assert!(decorator.document_spans(&doc).is_empty());
    }

    #[test]
    fn test_spans_carry_block_keys() {
        let doc = Document::from_plain_text("cat\ndog cat");
        let decorator = decorate("cat");
        let spans = decorator.document_spans(&doc);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].key, doc.blocks()[0].key);
        assert_eq!((spans[0].start, spans[0].end), (0, 3));
        assert_eq!(spans[1].key, doc.blocks()[1].key);
        assert_eq!((spans[1].start, spans[1].end), (4, 7));
    }

    #[test]
    fn test_block_without_match_yields_no_spans() {
        let doc = Document::from_plain_text("cat\nbird");
        let decorator = decorate("cat");
        assert!(decorator.block_spans(&doc.blocks()[1]).is_empty());
    }

    #[test]
    fn test_unparseable_term_is_inert() {
        let decorator = decorate("(unclosed");
        assert!(decorator.is_inert());
        let doc = Document::from_plain_text("(unclosed");
        assert!(decorator.document_spans(&doc).is_empty());
    }

    #[test]
    fn test_term_is_regex() {
        let doc = Document::from_plain_text("color colour");
        let spans = decorate("colou?r").document_spans(&doc);
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_recomputation_is_pure() {
        let doc = Document::from_plain_text("a b a");
        let decorator = decorate("a");
        let first = decorator.document_spans(&doc);
        let second = decorator.document_spans(&doc);
        assert_eq!(first, second);
    }
}
