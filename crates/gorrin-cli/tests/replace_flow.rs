//! End-to-end replace flow: load rules from a backend, edit them through
//! the store, and run a batch rewrite — the same wiring the CLI performs.

use gorrin_engine::{Document, QuickRule, rewrite};
use gorrin_rules::{MockRuleBackend, RuleBackend, RuleDraft, RuleStore};

async fn seeded_backend() -> MockRuleBackend {
    let backend = MockRuleBackend::new();
    backend
        .create_rule(&RuleDraft::new("cat", "dog", true))
        .await
        .expect("seed rule");
    backend
        .create_rule(&RuleDraft::new("dog", "bird", true))
        .await
        .expect("seed rule");
    backend
}

#[tokio::test]
async fn rules_flow_from_backend_to_document() {
    let backend = seeded_backend().await;

    let mut store = RuleStore::new();
    store.load(&backend).await;
    assert_eq!(store.len(), 2);

    let document = Document::from_plain_text("cat\nbird cat");
    let keys: Vec<_> = document.blocks().iter().map(|b| b.key).collect();

    // Sequential application: "cat" -> "dog" first, then "dog" -> "bird"
    // picks up the first rule's output.
    let rewritten = rewrite(&document, store.rules(), None);
    assert_eq!(rewritten.full_text(), "bird\nbird bird");

    let out_keys: Vec<_> = rewritten.blocks().iter().map(|b| b.key).collect();
    assert_eq!(keys, out_keys);
}

#[tokio::test]
async fn disabling_a_rule_changes_the_outcome() {
    let backend = seeded_backend().await;

    let mut store = RuleStore::new();
    store.load(&backend).await;
    store.set_enabled(1, false).expect("rule index");

    let document = Document::from_plain_text("cat");
    let rewritten = rewrite(&document, store.rules(), None);
    assert_eq!(rewritten.full_text(), "dog");
}

#[tokio::test]
async fn quick_rule_applies_last_without_being_persisted() {
    let backend = seeded_backend().await;

    let mut store = RuleStore::new();
    store.load(&backend).await;
    store.set_quick_pattern("bird");
    store.set_quick_replacement("fish");

    let document = Document::from_plain_text("cat");
    let rewritten = rewrite(&document, store.rules(), Some(store.quick()));

    // cat -> dog -> bird -> fish across the three rules in order.
    assert_eq!(rewritten.full_text(), "fish");

    // The rewrite never persisted anything.
    assert_eq!(backend.records().len(), 2);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn backend_outage_still_allows_ad_hoc_replace() {
    let backend = MockRuleBackend::new();
    backend.set_failing(true);

    let mut store = RuleStore::new();
    store.load(&backend).await;
    assert!(store.is_empty());

    let quick = QuickRule {
        pattern: "colou?r".into(),
        replacement: "color".into(),
    };
    let document = Document::from_plain_text("colour color\ncolouring");
    let rewritten = rewrite(&document, store.rules(), Some(&quick));
    assert_eq!(rewritten.full_text(), "color color\ncoloring");
}
