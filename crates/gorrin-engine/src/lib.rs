//! Match-finding and batch text-rewriting core.
//!
//! # Design Philosophy
//!
//! Everything in this crate is a pure, synchronous function of its inputs:
//! no I/O, no suspension, no retained state. The orchestrating caller owns
//! the document and the rule list; this crate borrows them for one call and
//! hands back new values.
//!
//! Three pieces:
//!
//! - **Matcher**: compile a pattern once, then enumerate the ordered
//!   non-overlapping match spans in any text, any number of times.
//! - **Decorator** ([`decorate`]): the live-highlighting view — pairs the
//!   matcher's spans with block keys so a renderer can style them. Rebuilt
//!   from scratch on every keystroke; deliberately stateless.
//! - **rewrite**: apply an ordered rule list (plus an optional unsaved
//!   ad-hoc rule) to a whole document, producing a new document with the
//!   same block keys and order.
//!
//! # Patterns are regexes, full stop
//!
//! A pattern string is handed to the regex engine as-is. `c.t` matches
//! `cat` and `cot`; `a+` matches runs of `a`. Callers wanting literal
//! matching must escape the pattern themselves (`regex::escape`). This is a
//! sharp edge kept on purpose — power users lean on it, and escaping
//! silently would change what their rules match.

mod error;
mod highlight;
mod matcher;
mod rewrite;

pub use error::PatternError;
pub use highlight::{decorate, Decorator, MatchSpan};
pub use matcher::{Matcher, Span, Spans};
pub use rewrite::rewrite;

pub use gorrin_types::{Block, BlockKey, Document, QuickRule, Rule};
