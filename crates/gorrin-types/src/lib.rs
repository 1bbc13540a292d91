//! Shared data types for gorrin.
//!
//! # Design Philosophy
//!
//! A document is an ordered sequence of plain-text blocks, not flat text.
//! Each block carries a stable opaque key, so a rewrite pass can replace the
//! text of every block while the identity of each block (and therefore any
//! renderer-side state keyed on it) survives intact.
//!
//! Rules are ordered `(pattern, replacement)` pairs; the order of the list is
//! the order they are applied in a rewrite pass. A rule's pattern is a regular
//! expression, never implicitly escaped — see `gorrin-engine` for the hazard
//! notes.

mod block;
mod ids;
mod rule;

pub use block::{Block, Document};
pub use ids::{BlockKey, RuleId};
pub use rule::{QuickRule, Rule};
