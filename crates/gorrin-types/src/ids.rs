//! Typed identifiers for blocks and persisted rules.
//!
//! `BlockKey` wraps a UUIDv7 (time-ordered, globally unique). It is opaque to
//! every component: nothing parses structure out of it, it only has to be
//! stable and unique within a document. The `short()` form (first 8 hex
//! chars) is for human-facing output only — never a lookup key.
//!
//! `RuleId` is the persistence layer's identifier. The backend assigns
//! integers on create, so unlike `BlockKey` it is never minted locally.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, opaque identity of a block within a document (UUIDv7).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(uuid::Uuid);

impl BlockKey {
    /// Mint a new time-ordered key (UUIDv7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// First 8 hex characters — for human display only, not lookup.
    pub fn short(&self) -> String {
        self.0.as_simple().to_string()[..8].to_string()
    }

    /// Full 32-character hex string (no hyphens).
    pub fn to_hex(&self) -> String {
        self.0.as_simple().to_string()
    }

    /// Parse from a hex string (32 chars, no hyphens) or standard UUID format.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

impl Default for BlockKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Full UUID with hyphens for log readability
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockKey({})", self.short())
    }
}

/// Identifier assigned to a rule by the persistence backend.
///
/// Present only on rules that have completed a create round-trip; an unsaved
/// rule has no id yet (`Rule::id` is `None`).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(u64);

impl RuleId {
    /// The raw backend id.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RuleId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
