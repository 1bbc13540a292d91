//! Search/replace rules.

use serde::{Deserialize, Serialize};

use crate::RuleId;

/// A persisted (or about-to-be-persisted) search/replace rule.
///
/// `pattern` is a regular expression — metacharacters are live, nothing is
/// escaped on the rule's behalf. `enabled` gates participation in a rewrite
/// pass; `dirty` tracks local edits that have not completed an update
/// round-trip with the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Backend-assigned id; `None` until a create round-trip completes.
    pub id: Option<RuleId>,
    /// Regex pattern to search for.
    pub pattern: String,
    /// Verbatim replacement text (no group substitution).
    pub replacement: String,
    /// Only enabled rules participate in a rewrite pass.
    pub enabled: bool,
    /// Local edits pending a successful commit.
    pub dirty: bool,
}

impl Rule {
    /// A fresh, enabled, clean rule without a backend id.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            id: None,
            pattern: pattern.into(),
            replacement: replacement.into(),
            enabled: true,
            dirty: false,
        }
    }

    /// True when both pattern and replacement are non-empty — the
    /// precondition for persisting the rule.
    pub fn is_complete(&self) -> bool {
        !self.pattern.is_empty() && !self.replacement.is_empty()
    }
}

/// The in-progress, unsaved rule being typed into the search/replace inputs.
///
/// Participates in a single rewrite pass (appended after all enabled
/// persisted rules) when both fields are non-empty, without ever being
/// persisted by the rewrite itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuickRule {
    pub pattern: String,
    pub replacement: String,
}

impl QuickRule {
    /// True when both fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.pattern.is_empty() && !self.replacement.is_empty()
    }

    /// Reset both fields, e.g. after the quick rule is promoted to a
    /// persisted one.
    pub fn clear(&mut self) {
        self.pattern.clear();
        self.replacement.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
