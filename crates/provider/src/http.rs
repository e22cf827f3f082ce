//! HTTP/JSON access checker backed by reqwest.

use crate::AccessChecker;
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;
use warden_core::error::{WardenError, WardenResult};
use warden_core::{AccessDecision, AccessMode, AccessQuery};

/// Asks a remote access-check endpoint whether the viewer may open a record.
///
/// ```ignore
/// let checker = HttpAccessChecker::connect("https://access.example.com/check")?;
/// ```
pub struct HttpAccessChecker {
    client: reqwest::Client,
    endpoint: Url,
}

/// Response body of the access-check service.
///
/// The service reports `hasRecordAccess`; some deployments use the shorter
/// `hasAccess`, accepted as an alias.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDecision {
    #[serde(alias = "hasAccess")]
    has_record_access: bool,
    #[serde(default)]
    mode: Option<AccessMode>,
}

impl HttpAccessChecker {
    pub fn connect(endpoint: &str) -> WardenResult<Self> {
        if endpoint.is_empty() {
            return Err(WardenError::InvalidInput(
                "endpoint URL must not be empty".into(),
            ));
        }

        let endpoint = Url::parse(endpoint)
            .map_err(|e| WardenError::InvalidInput(format!("Invalid endpoint {endpoint}: {e}")))?;

        tracing::info!(endpoint = %endpoint, "configured access checker");

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }
}

#[async_trait]
impl AccessChecker for HttpAccessChecker {
    async fn check_access(&self, query: &AccessQuery) -> WardenResult<AccessDecision> {
        tracing::debug!(
            record_id = %query.record_id,
            endpoint = %self.endpoint,
            "checking record access"
        );

        let body = serde_json::json!({
            "recordId": query.record_id,
            "objectApiName": query.object_api_name,
        });

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                WardenError::Provider(format!(
                    "Failed to reach access service at {}: {e}",
                    self.endpoint
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WardenError::Provider(format!(
                "Access service returned {status} for record {}",
                query.record_id
            )));
        }

        let wire: WireDecision = response.json().await.map_err(|e| {
            WardenError::Provider(format!(
                "Malformed access response for record {}: {e}",
                query.record_id
            ))
        })?;

        tracing::info!(
            record_id = %query.record_id,
            has_access = wire.has_record_access,
            "access check resolved"
        );

        Ok(AccessDecision {
            has_access: wire.has_record_access,
            mode: wire.mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_endpoint_is_rejected() {
        assert!(matches!(
            HttpAccessChecker::connect(""),
            Err(WardenError::InvalidInput(_))
        ));
    }

    #[test]
    fn malformed_endpoint_is_rejected() {
        assert!(HttpAccessChecker::connect("not a url").is_err());
    }

    #[test]
    fn wire_decision_accepts_both_field_names() {
        let long: WireDecision =
            serde_json::from_str(r#"{"hasRecordAccess": true, "mode": "edit"}"#).unwrap();
        assert!(long.has_record_access);
        assert_eq!(long.mode, Some(AccessMode::Edit));

        let short: WireDecision = serde_json::from_str(r#"{"hasAccess": false}"#).unwrap();
        assert!(!short.has_record_access);
        assert!(short.mode.is_none());
    }
}
