//! REST client for the rules backend.
//!
//! The wire schema predates this crate and names its fields differently
//! from the internal model: "pattern" travels as `text`, "replacement" as
//! `replace`, and the enabled flag as `checked`. The serde renames on
//! [`RuleRecord`] and [`RuleDraft`] are the single place that mapping
//! lives.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gorrin_types::{Rule, RuleId};

/// Base URL used when neither the CLI flag nor the environment overrides it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable overriding the backend base URL.
pub const RULES_URL_ENV: &str = "GORRIN_RULES_URL";

/// Resolve the backend base URL from the environment, falling back to
/// [`DEFAULT_BASE_URL`].
pub fn base_url_from_env() -> String {
    std::env::var(RULES_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// Errors from backend calls.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport or decode failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

/// A rule as the backend stores it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub id: RuleId,
    #[serde(rename = "text")]
    pub pattern: String,
    #[serde(rename = "replace")]
    pub replacement: String,
    #[serde(rename = "checked")]
    pub enabled: bool,
}

impl From<RuleRecord> for Rule {
    fn from(record: RuleRecord) -> Self {
        Rule {
            id: Some(record.id),
            pattern: record.pattern,
            replacement: record.replacement,
            enabled: record.enabled,
            dirty: false,
        }
    }
}

/// Request body for create and update calls (the backend assigns ids, so
/// drafts carry none).
#[derive(Clone, Debug, Serialize)]
pub struct RuleDraft {
    #[serde(rename = "text")]
    pub pattern: String,
    #[serde(rename = "replace")]
    pub replacement: String,
    #[serde(rename = "checked")]
    pub enabled: bool,
}

impl RuleDraft {
    pub fn new(
        pattern: impl Into<String>,
        replacement: impl Into<String>,
        enabled: bool,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            enabled,
        }
    }
}

/// The persistence boundary the rule store delegates to.
#[async_trait]
pub trait RuleBackend: Send + Sync {
    /// `GET /rules` — every persisted rule.
    async fn fetch_rules(&self) -> Result<Vec<RuleRecord>, BackendError>;

    /// `POST /rules` — persist a new rule; the response carries its id.
    async fn create_rule(&self, draft: &RuleDraft) -> Result<RuleRecord, BackendError>;

    /// `PUT /rules/{id}` — replace a rule's fields.
    async fn update_rule(&self, id: RuleId, draft: &RuleDraft) -> Result<RuleRecord, BackendError>;

    /// `DELETE /rules/{id}` — remove a rule. Any success status counts as
    /// acknowledged; the body is ignored.
    async fn delete_rule(&self, id: RuleId) -> Result<(), BackendError>;
}

/// REST implementation of [`RuleBackend`].
pub struct HttpRuleBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRuleBackend {
    /// Build a client against the given base URL (trailing slashes are
    /// tolerated).
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from `GORRIN_RULES_URL`, falling back to the default.
    pub fn from_env() -> Result<Self, BackendError> {
        Self::new(base_url_from_env())
    }

    fn rules_url(&self) -> String {
        format!("{}/rules", self.base_url)
    }

    fn rule_url(&self, id: RuleId) -> String {
        format!("{}/rules/{}", self.base_url, id)
    }

    fn check_status(response: &reqwest::Response, url: &str) -> Result<(), BackendError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::Status {
                status,
                url: url.to_string(),
            })
        }
    }
}

#[async_trait]
impl RuleBackend for HttpRuleBackend {
    async fn fetch_rules(&self) -> Result<Vec<RuleRecord>, BackendError> {
        let url = self.rules_url();
        let response = self.client.get(&url).send().await?;
        Self::check_status(&response, &url)?;
        Ok(response.json().await?)
    }

    async fn create_rule(&self, draft: &RuleDraft) -> Result<RuleRecord, BackendError> {
        let url = self.rules_url();
        let response = self.client.post(&url).json(draft).send().await?;
        Self::check_status(&response, &url)?;
        Ok(response.json().await?)
    }

    async fn update_rule(&self, id: RuleId, draft: &RuleDraft) -> Result<RuleRecord, BackendError> {
        let url = self.rule_url(id);
        let response = self.client.put(&url).json(draft).send().await?;
        Self::check_status(&response, &url)?;
        Ok(response.json().await?)
    }

    async fn delete_rule(&self, id: RuleId) -> Result<(), BackendError> {
        let url = self.rule_url(id);
        let response = self.client.delete(&url).send().await?;
        Self::check_status(&response, &url)
    }
}

// ============================================================================
// Mock backend (test builds)
// ============================================================================

#[cfg(any(test, feature = "test-mock"))]
mod mock {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    use super::*;

    /// In-memory [`RuleBackend`] for tests. Assigns ids like the real
    /// backend does and can be switched into a failing mode to exercise
    /// the store's rollback behavior.
    pub struct MockRuleBackend {
        records: Mutex<Vec<RuleRecord>>,
        next_id: AtomicU64,
        failing: AtomicBool,
    }

    impl MockRuleBackend {
        pub fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                failing: AtomicBool::new(false),
            }
        }

        /// Seed the backend with existing rules.
        pub fn with_rules(records: Vec<RuleRecord>) -> Self {
            let next = records
                .iter()
                .map(|r| r.id.as_u64())
                .max()
                .unwrap_or(0)
                + 1;
            Self {
                records: Mutex::new(records),
                next_id: AtomicU64::new(next),
                failing: AtomicBool::new(false),
            }
        }

        /// While set, every call fails with a 500-style error.
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        /// Snapshot of the stored records.
        pub fn records(&self) -> Vec<RuleRecord> {
            self.records.lock().expect("mock lock poisoned").clone()
        }

        fn check_failing(&self, url: &str) -> Result<(), BackendError> {
            if self.failing.load(Ordering::SeqCst) {
                Err(BackendError::Status {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    url: url.to_string(),
                })
            } else {
                Ok(())
            }
        }

        fn not_found(id: RuleId) -> BackendError {
            BackendError::Status {
                status: reqwest::StatusCode::NOT_FOUND,
                url: format!("mock:///rules/{id}"),
            }
        }
    }

    impl Default for MockRuleBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl RuleBackend for MockRuleBackend {
        async fn fetch_rules(&self) -> Result<Vec<RuleRecord>, BackendError> {
            self.check_failing("mock:///rules")?;
            Ok(self.records())
        }

        async fn create_rule(&self, draft: &RuleDraft) -> Result<RuleRecord, BackendError> {
            self.check_failing("mock:///rules")?;
            let record = RuleRecord {
                id: RuleId::from(self.next_id.fetch_add(1, Ordering::SeqCst)),
                pattern: draft.pattern.clone(),
                replacement: draft.replacement.clone(),
                enabled: draft.enabled,
            };
            self.records
                .lock()
                .expect("mock lock poisoned")
                .push(record.clone());
            Ok(record)
        }

        async fn update_rule(
            &self,
            id: RuleId,
            draft: &RuleDraft,
        ) -> Result<RuleRecord, BackendError> {
            self.check_failing(&format!("mock:///rules/{id}"))?;
            let mut records = self.records.lock().expect("mock lock poisoned");
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| Self::not_found(id))?;
            record.pattern = draft.pattern.clone();
            record.replacement = draft.replacement.clone();
            record.enabled = draft.enabled;
            Ok(record.clone())
        }

        async fn delete_rule(&self, id: RuleId) -> Result<(), BackendError> {
            self.check_failing(&format!("mock:///rules/{id}"))?;
            let mut records = self.records.lock().expect("mock lock poisoned");
            let position = records
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| Self::not_found(id))?;
            records.remove(position);
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-mock"))]
pub use mock::MockRuleBackend;

// ============================================================================
// Tests
// ============================================================================
