//! Local static-policy checker -- decides access from an in-memory rule
//! table instead of a remote service.
//!
//! Used by the CLI's dry-run mode and by tests; never fails.

use crate::AccessChecker;
use async_trait::async_trait;
use std::collections::HashMap;
use warden_core::error::WardenResult;
use warden_core::{AccessDecision, AccessQuery};

/// Rule table keyed by object API name, with a default decision for
/// everything else. Queries without an object API name get the default.
#[derive(Debug, Clone)]
pub struct StaticPolicy {
    rules: HashMap<String, AccessDecision>,
    default: AccessDecision,
}

impl StaticPolicy {
    pub fn new(default: AccessDecision) -> Self {
        Self {
            rules: HashMap::new(),
            default,
        }
    }

    /// Grant everything in edit mode. The dry-run policy.
    pub fn allow_all() -> Self {
        Self::new(AccessDecision::granted(warden_core::AccessMode::Edit))
    }

    /// Deny everything.
    pub fn deny_all() -> Self {
        Self::new(AccessDecision::denied())
    }

    pub fn with_rule(mut self, object_api_name: impl Into<String>, decision: AccessDecision) -> Self {
        self.rules.insert(object_api_name.into(), decision);
        self
    }

    fn decide(&self, query: &AccessQuery) -> AccessDecision {
        query
            .object_api_name
            .as_deref()
            .and_then(|name| self.rules.get(name).copied())
            .unwrap_or(self.default)
    }
}

#[async_trait]
impl AccessChecker for StaticPolicy {
    async fn check_access(&self, query: &AccessQuery) -> WardenResult<AccessDecision> {
        let decision = self.decide(query);
        tracing::debug!(
            record_id = %query.record_id,
            has_access = decision.has_access,
            "static policy decision"
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::AccessMode;

    #[tokio::test]
    async fn rule_overrides_default() {
        let policy = StaticPolicy::deny_all()
            .with_rule("Account", AccessDecision::granted(AccessMode::View));

        let hit = AccessQuery::new("001", Some("Account".into()));
        let miss = AccessQuery::new("001", Some("Case".into()));

        assert!(policy.check_access(&hit).await.unwrap().has_access);
        assert!(!policy.check_access(&miss).await.unwrap().has_access);
    }

    #[tokio::test]
    async fn query_without_object_gets_default() {
        let policy = StaticPolicy::allow_all().with_rule("Account", AccessDecision::denied());
        let query = AccessQuery::new("001", None);
        assert!(policy.check_access(&query).await.unwrap().has_access);
    }
}
