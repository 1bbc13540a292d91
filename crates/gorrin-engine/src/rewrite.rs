//! Batch document rewriting.

use gorrin_types::{Block, Document, QuickRule, Rule};

use crate::matcher::{Matcher, Span};

/// Apply an ordered rule list to a document, producing a new document.
///
/// The effective sequence is `rules` filtered to `enabled == true`, with
/// `ad_hoc` appended at the end when both of its fields are non-empty — a
/// one-off rule participates in a single pass without being persisted.
///
/// Rules apply sequentially: each rule's output document is the next rule's
/// input, so rule order is observable whenever one rule's replacement can be
/// matched by a later rule's pattern. That order-dependence is intended
/// behavior, not a defect.
///
/// A rule whose pattern does not compile is skipped wholesale — every block
/// passes through unchanged — and reported once for the rule, not once per
/// block. The returned document always has the same block count, keys, and
/// order as the input; only text differs.
pub fn rewrite(document: &Document, rules: &[Rule], ad_hoc: Option<&QuickRule>) -> Document {
    let mut blocks: Vec<Block> = document.blocks().to_vec();

    let enabled = rules
        .iter()
        .filter(|r| r.enabled)
        .map(|r| (r.pattern.as_str(), r.replacement.as_str()));
    let quick = ad_hoc
        .filter(|q| q.is_complete())
        .map(|q| (q.pattern.as_str(), q.replacement.as_str()));

    for (pattern, replacement) in enabled.chain(quick) {
        let matcher = match Matcher::new(pattern) {
            Ok(m) => m,
            Err(err) => {
                tracing::warn!(%err, "skipping rule with unparseable pattern");
                continue;
            }
        };
        for block in &mut blocks {
            substitute(&matcher, replacement, &mut block.text);
        }
    }

    Document::new(blocks)
}

/// Replace every match of `matcher` in `text` with `replacement`, verbatim.
///
/// Spans are materialized up front against the current text, then spliced
/// rightmost-first: splicing never shifts the recorded offsets of a span
/// still waiting to its left, so length-changing replacements stay correct
/// when a block holds several matches. Left-to-right splicing with the
/// captured offsets drifts as soon as `replacement.len() != match.len()`.
///
/// The replacement goes in verbatim; `$1` is two characters, not a group
/// reference.
fn substitute(matcher: &Matcher, replacement: &str, text: &mut String) {
    let spans: Vec<Span> = matcher.find_spans(text).collect();
    for span in spans.iter().rev() {
        text.replace_range(span.start..span.end, replacement);
    }
}

// ============================================================================
// Tests
// ============================================================================
