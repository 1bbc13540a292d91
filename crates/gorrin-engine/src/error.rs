//! Error types for the engine.

use thiserror::Error;

/// A pattern that the regex engine refused to compile.
///
/// The engine fails closed on these: an unparseable pattern yields zero
/// matches everywhere instead of aborting the surrounding operation. See
/// [`crate::rewrite`] for how a whole rule is skipped (and reported once)
/// on this error.
#[derive(Debug, Error)]
#[error("invalid pattern {pattern:?}: {source}")]
pub struct PatternError {
    /// The offending pattern, verbatim.
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}
