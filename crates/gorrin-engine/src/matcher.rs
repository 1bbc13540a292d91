//! Compiled pattern and span enumeration.

use regex::Regex;

use crate::PatternError;

/// A half-open byte range into one text where a pattern matched.
///
/// `start < end` always holds: zero-width matches are discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A pattern compiled once, reusable across blocks and passes.
///
/// The pattern is regex syntax, not literal text — nothing is escaped on the
/// caller's behalf. Compilation failures surface here, at construction, so a
/// single bad rule is reported once rather than once per block.
pub struct Matcher {
    re: Regex,
}

impl Matcher {
    /// Compile a pattern with find-all semantics.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let re = Regex::new(pattern).map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { re })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.re.as_str()
    }

    /// Enumerate the ordered, non-overlapping match spans in `text`.
    ///
    /// Matches are found left to right; after a match ending at `e` the scan
    /// resumes at `e`, stepping past one character when the match was empty
    /// so a zero-width pattern (`a*`, `^`, an empty alternation arm) always
    /// terminates. The iterator is lazy and the matcher is free of state, so
    /// the same text can be re-scanned any number of times.
    pub fn find_spans<'m, 't>(&'m self, text: &'t str) -> Spans<'m, 't> {
        Spans {
            inner: self.re.find_iter(text),
        }
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Matcher({:?})", self.re.as_str())
    }
}

/// Lazy iterator over match spans. See [`Matcher::find_spans`].
pub struct Spans<'m, 't> {
    inner: regex::Matches<'m, 't>,
}

impl Iterator for Spans<'_, '_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        // The underlying iterator already steps past empty matches; all
        // that's left is to drop them from the output.
        self.inner.by_ref().find(|m| m.start() < m.end()).map(|m| Span {
            start: m.start(),
            end: m.end(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
