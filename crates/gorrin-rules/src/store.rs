//! The in-memory rule store.

use tracing::{info, warn};

use gorrin_types::{QuickRule, Rule, RuleId};

use crate::error::{StoreError, ValidationError};
use crate::remote::{RuleBackend, RuleDraft};

/// Exclusive owner of the ordered rule list plus the unsaved quick rule.
///
/// All mutation goes through these operations; the backing collection is
/// never handed out mutably. Operations that delegate to the backend are
/// single-flight: each takes `&mut self` and completes (or fails) before
/// the next can begin. A failed backend call leaves the store bit-for-bit
/// in its pre-call state; nothing is retried automatically.
#[derive(Default)]
pub struct RuleStore {
    rules: Vec<Rule>,
    quick: QuickRule,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rules, in application order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of persisted rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no persisted rules are loaded.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The unsaved quick rule.
    pub fn quick(&self) -> &QuickRule {
        &self.quick
    }

    // =========================================================================
    // Local edits
    // =========================================================================

    /// Update the quick rule's pattern. Callers should rebuild the live
    /// decorator for the new value so the term highlights as it is typed.
    pub fn set_quick_pattern(&mut self, value: impl Into<String>) {
        self.quick.pattern = value.into();
    }

    /// Update the quick rule's replacement.
    pub fn set_quick_replacement(&mut self, value: impl Into<String>) {
        self.quick.replacement = value.into();
    }

    /// Update a rule's pattern and mark it dirty. As with
    /// [`set_quick_pattern`](Self::set_quick_pattern), callers should
    /// rebuild the live decorator for the edited value.
    pub fn set_pattern(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let rule = self.rule_mut(index)?;
        rule.pattern = value.into();
        rule.dirty = true;
        Ok(())
    }

    /// Update a rule's replacement and mark it dirty.
    pub fn set_replacement(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let rule = self.rule_mut(index)?;
        rule.replacement = value.into();
        rule.dirty = true;
        Ok(())
    }

    /// Set a rule's enabled flag; dirty only when the value actually
    /// changed.
    pub fn set_enabled(&mut self, index: usize, value: bool) -> Result<(), ValidationError> {
        let rule = self.rule_mut(index)?;
        if rule.enabled != value {
            rule.enabled = value;
            rule.dirty = true;
        }
        Ok(())
    }

    /// Set every rule's enabled flag; only rules whose value changes are
    /// marked dirty.
    pub fn set_all_enabled(&mut self, value: bool) {
        for rule in &mut self.rules {
            if rule.enabled != value {
                rule.enabled = value;
                rule.dirty = true;
            }
        }
    }

    fn rule_mut(&mut self, index: usize) -> Result<&mut Rule, ValidationError> {
        self.rules
            .get_mut(index)
            .ok_or(ValidationError::IndexOutOfBounds(index))
    }

    // =========================================================================
    // Backend round-trips
    // =========================================================================

    /// Fetch every persisted rule and replace the store's contents.
    ///
    /// A fetch failure is non-fatal: the store is left empty and the
    /// failure is surfaced as a warning, the same way the editor comes up
    /// usable when its backend is down.
    pub async fn load(&mut self, backend: &dyn RuleBackend) {
        match backend.fetch_rules().await {
            Ok(records) => {
                self.rules = records.into_iter().map(Rule::from).collect();
            }
            Err(err) => {
                warn!(%err, "fetching rules failed; starting with an empty list");
                self.rules.clear();
            }
        }
    }

    /// Persist the quick rule and append the stored result.
    ///
    /// Rejected when either field is empty or an identical
    /// `(pattern, replacement)` pair already exists. On success the new
    /// rule (with its backend-assigned id) lands at the end of the list
    /// and the quick rule is cleared; on failure nothing changes.
    pub async fn add(&mut self, backend: &dyn RuleBackend) -> Result<RuleId, StoreError> {
        if !self.quick.is_complete() {
            return Err(ValidationError::EmptyField.into());
        }
        let duplicate = self
            .rules
            .iter()
            .any(|r| r.pattern == self.quick.pattern && r.replacement == self.quick.replacement);
        if duplicate {
            return Err(ValidationError::Duplicate.into());
        }

        let draft = RuleDraft::new(self.quick.pattern.as_str(), self.quick.replacement.as_str(), true);
        let record = backend.create_rule(&draft).await.inspect_err(|err| {
            warn!(%err, "creating rule failed");
        })?;

        let id = record.id;
        info!(%id, "rule created");
        self.quick.clear();
        self.rules.push(Rule::from(record));
        Ok(id)
    }

    /// Delete a rule from the backend, then remove it locally.
    pub async fn remove(
        &mut self,
        backend: &dyn RuleBackend,
        index: usize,
    ) -> Result<Rule, StoreError> {
        let rule = self
            .rules
            .get(index)
            .ok_or(ValidationError::IndexOutOfBounds(index))?;
        let id = rule.id.ok_or(ValidationError::NotPersisted)?;

        backend.delete_rule(id).await.inspect_err(|err| {
            warn!(%id, %err, "deleting rule failed");
        })?;

        info!(%id, "rule deleted");
        Ok(self.rules.remove(index))
    }

    /// Push a rule's local edits to the backend; dirty clears only on
    /// success.
    pub async fn commit(
        &mut self,
        backend: &dyn RuleBackend,
        index: usize,
    ) -> Result<(), StoreError> {
        let rule = self
            .rules
            .get(index)
            .ok_or(ValidationError::IndexOutOfBounds(index))?;
        if !rule.is_complete() {
            return Err(ValidationError::EmptyField.into());
        }
        let id = rule.id.ok_or(ValidationError::NotPersisted)?;

        let draft = RuleDraft::new(rule.pattern.as_str(), rule.replacement.as_str(), rule.enabled);
        backend.update_rule(id, &draft).await.inspect_err(|err| {
            warn!(%id, %err, "updating rule failed; keeping local edits dirty");
        })?;

        info!(%id, "rule updated");
        self.rules[index].dirty = false;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{MockRuleBackend, RuleRecord};

    fn record(id: u64, pattern: &str, replacement: &str, enabled: bool) -> RuleRecord {
        RuleRecord {
            id: RuleId::from(id),
            pattern: pattern.into(),
            replacement: replacement.into(),
            enabled,
        }
    }

    fn seeded_backend() -> MockRuleBackend {
        MockRuleBackend::with_rules(vec![
            record(1, "cat", "dog", true),
            record(2, "old", "new", false),
        ])
    }

    async fn loaded_store(backend: &MockRuleBackend) -> RuleStore {
        let mut store = RuleStore::new();
        store.load(backend).await;
        store
    }

    // ── load ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_load_populates_in_backend_order() {
        let backend = seeded_backend();
        let store = loaded_store(&backend).await;

        assert_eq!(store.len(), 2);
        assert_eq!(store.rules()[0].pattern, "cat");
        assert_eq!(store.rules()[0].id, Some(RuleId::from(1)));
        assert!(store.rules()[0].enabled);
        assert!(!store.rules()[1].enabled);
        assert!(store.rules().iter().all(|r| !r.dirty));
    }

    #[tokio::test]
    async fn test_load_failure_leaves_store_empty_and_usable() {
        let backend = seeded_backend();
        backend.set_failing(true);

        let mut store = RuleStore::new();
        store.load(&backend).await;
        assert!(store.is_empty());

        // The store still works once the backend recovers.
        backend.set_failing(false);
        store.load(&backend).await;
        assert_eq!(store.len(), 2);
    }

    // ── local edits ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_field_edits_mark_dirty() {
        let backend = seeded_backend();
        let mut store = loaded_store(&backend).await;

        store.set_pattern(0, "feline").unwrap();
        assert!(store.rules()[0].dirty);
        assert_eq!(store.rules()[0].pattern, "feline");

        store.set_replacement(1, "newer").unwrap();
        assert!(store.rules()[1].dirty);
    }

    #[tokio::test]
    async fn test_set_enabled_marks_dirty_only_on_change() {
        let backend = seeded_backend();
        let mut store = loaded_store(&backend).await;

        store.set_enabled(0, true).unwrap(); // already enabled
        assert!(!store.rules()[0].dirty);

        store.set_enabled(0, false).unwrap();
        assert!(store.rules()[0].dirty);
    }

    #[tokio::test]
    async fn test_set_all_enabled_marks_only_changed_rules_dirty() {
        let backend = seeded_backend();
        let mut store = loaded_store(&backend).await;

        store.set_all_enabled(true);
        assert!(!store.rules()[0].dirty); // was already enabled
        assert!(store.rules()[1].dirty); // flipped
        assert!(store.rules().iter().all(|r| r.enabled));
    }

    #[test]
    fn test_edit_out_of_bounds_is_rejected() {
        let mut store = RuleStore::new();
        assert_eq!(
            store.set_pattern(0, "x").unwrap_err(),
            ValidationError::IndexOutOfBounds(0)
        );
    }

    // ── add ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_add_persists_quick_rule_and_clears_it() {
        let backend = MockRuleBackend::new();
        let mut store = RuleStore::new();
        store.set_quick_pattern("find");
        store.set_quick_replacement("replace");

        let id = store.add(&backend).await.unwrap();

        assert_eq!(store.len(), 1);
        let rule = &store.rules()[0];
        assert_eq!(rule.id, Some(id));
        assert_eq!(rule.pattern, "find");
        assert!(rule.enabled);
        assert!(!rule.dirty);
        assert!(store.quick().pattern.is_empty());
        assert_eq!(backend.records().len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_incomplete_quick_rule() {
        let backend = MockRuleBackend::new();
        let mut store = RuleStore::new();
        store.set_quick_pattern("find");

        let err = store.add(&backend).await.unwrap_err();
        assert!(err.is_validation());
        assert!(store.is_empty());
        assert!(backend.records().is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_exact_duplicate() {
        let backend = seeded_backend();
        let mut store = loaded_store(&backend).await;
        store.set_quick_pattern("cat");
        store.set_quick_replacement("dog");

        let err = store.add(&backend).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.len(), 2);
        // The quick rule survives a rejected add.
        assert_eq!(store.quick().pattern, "cat");
    }

    #[tokio::test]
    async fn test_add_failure_leaves_store_and_quick_rule_untouched() {
        let backend = MockRuleBackend::new();
        backend.set_failing(true);

        let mut store = RuleStore::new();
        store.set_quick_pattern("find");
        store.set_quick_replacement("replace");

        let err = store.add(&backend).await.unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
        assert!(store.is_empty());
        assert_eq!(store.quick().pattern, "find");
        assert_eq!(store.quick().replacement, "replace");
    }

    // ── remove ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_remove_deletes_remotely_then_locally() {
        let backend = seeded_backend();
        let mut store = loaded_store(&backend).await;

        let removed = store.remove(&backend, 0).await.unwrap();
        assert_eq!(removed.pattern, "cat");
        assert_eq!(store.len(), 1);
        assert_eq!(backend.records().len(), 1);
        assert_eq!(store.rules()[0].pattern, "old");
    }

    #[tokio::test]
    async fn test_remove_failure_keeps_rule() {
        let backend = seeded_backend();
        let mut store = loaded_store(&backend).await;
        backend.set_failing(true);

        let err = store.remove(&backend, 0).await.unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
        assert_eq!(store.len(), 2);
        assert_eq!(store.rules()[0].pattern, "cat");
    }

    // ── commit ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_commit_clears_dirty_on_success() {
        let backend = seeded_backend();
        let mut store = loaded_store(&backend).await;
        store.set_pattern(0, "feline").unwrap();

        store.commit(&backend, 0).await.unwrap();
        assert!(!store.rules()[0].dirty);
        assert_eq!(backend.records()[0].pattern, "feline");
    }

    #[tokio::test]
    async fn test_commit_failure_keeps_dirty_and_local_edits() {
        let backend = seeded_backend();
        let mut store = loaded_store(&backend).await;
        store.set_pattern(0, "feline").unwrap();
        backend.set_failing(true);

        let err = store.commit(&backend, 0).await.unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
        assert!(store.rules()[0].dirty);
        assert_eq!(store.rules()[0].pattern, "feline");
        assert_eq!(backend.records()[0].pattern, "cat");
    }

    #[tokio::test]
    async fn test_commit_rejects_emptied_fields() {
        let backend = seeded_backend();
        let mut store = loaded_store(&backend).await;
        store.set_pattern(0, "").unwrap();

        let err = store.commit(&backend, 0).await.unwrap_err();
        assert!(err.is_validation());
        // Still dirty — the edit was never persisted.
        assert!(store.rules()[0].dirty);
    }
}
