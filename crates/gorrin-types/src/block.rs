//! Blocks and documents.
//!
//! A `Document` owns an ordered `Vec<Block>`. Order defines reading order and
//! is stable across text edits; keys are minted when a block is created and
//! never change afterwards. The rewrite engine consumes a document and
//! produces a new one with the same keys in the same order — it never edits
//! a document in place.

use serde::{Deserialize, Serialize};

use crate::BlockKey;

/// One unit of document text with a stable identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Stable key — immutable once assigned, unique within a document.
    pub key: BlockKey,
    /// Plain text content. May be replaced wholesale; the key survives.
    pub text: String,
}

impl Block {
    /// Create a block with a freshly minted key.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            key: BlockKey::new(),
            text: text.into(),
        }
    }

    /// Reconstruct a block under an existing key.
    pub fn with_key(key: BlockKey, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
        }
    }
}

/// An ordered sequence of blocks.
///
/// Invariant: no two blocks share a key. Constructors that mint keys uphold
/// this by construction; `Document::new` asserts it in debug builds for
/// callers assembling blocks by hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Assemble a document from existing blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        debug_assert!(
            {
                let mut keys: Vec<BlockKey> = blocks.iter().map(|b| b.key).collect();
                keys.sort();
                keys.windows(2).all(|w| w[0] != w[1])
            },
            "document blocks must have unique keys"
        );
        Self { blocks }
    }

    /// Build a document from plain text, one block per line.
    ///
    /// This mirrors how the editor materializes pasted text: every line
    /// becomes its own block with a fresh key. An empty input yields a
    /// single empty block rather than an empty document.
    pub fn from_plain_text(text: &str) -> Self {
        let blocks: Vec<Block> = if text.is_empty() {
            vec![Block::new("")]
        } else {
            text.lines().map(Block::new).collect()
        };
        Self { blocks }
    }

    /// The blocks, in reading order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Look up a block by key.
    pub fn get(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks.iter().find(|b| b.key == *key)
    }

    /// Re-join the block texts into plain text, newline-separated.
    pub fn full_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_plain_text_one_block_per_line() {
        let doc = Document::from_plain_text("first\nsecond\nthird");
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.blocks()[0].text, "first");
        assert_eq!(doc.blocks()[1].text, "second");
        assert_eq!(doc.blocks()[2].text, "third");
    }

    #[test]
    fn test_from_plain_text_empty_input_yields_one_empty_block() {
        let doc = Document::from_plain_text("");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.blocks()[0].text, "");
    }

    #[test]
    fn test_block_keys_are_unique() {
        let doc = Document::from_plain_text("a\na\na");
        let keys: Vec<_> = doc.blocks().iter().map(|b| b.key).collect();
        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[1], keys[2]);
    }

    #[test]
    fn test_full_text_roundtrip() {
        let text = "one\ntwo\nthree";
        assert_eq!(Document::from_plain_text(text).full_text(), text);
    }

    #[test]
    fn test_get_by_key() {
        let doc = Document::from_plain_text("x\ny");
        let key = doc.blocks()[1].key;
        assert_eq!(doc.get(&key).unwrap().text, "y");
        assert!(doc.get(&BlockKey::new()).is_none());
    }

    #[test]
    fn test_with_key_preserves_identity() {
        let original = Block::new("before");
        let replaced = Block::with_key(original.key, "after");
        assert_eq!(original.key, replaced.key);
        assert_eq!(replaced.text, "after");
    }
}
