//! Rule persistence and the in-memory rule store.
//!
//! This crate is the async boundary of the system. [`RuleStore`] owns the
//! ordered rule list (plus the unsaved quick rule) exclusively — every
//! mutation flows through its operations, and operations that involve the
//! backend touch local state only after the remote call succeeds, so a
//! failed call leaves the store exactly as it was.
//!
//! The backend itself sits behind [`RuleBackend`]; [`HttpRuleBackend`]
//! speaks the REST + JSON protocol of the rules server, and
//! `MockRuleBackend` (test builds) backs the store tests.

mod error;
mod remote;
mod store;

pub use error::{StoreError, ValidationError};
pub use remote::{
    base_url_from_env, BackendError, HttpRuleBackend, RuleBackend, RuleDraft, RuleRecord,
    DEFAULT_BASE_URL, RULES_URL_ENV,
};
pub use store::RuleStore;

#[cfg(any(test, feature = "test-mock"))]
pub use remote::MockRuleBackend;
