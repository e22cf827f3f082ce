//! Domain types for the Warden record-access gate.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Access check
// ---------------------------------------------------------------------------

/// Inputs for one access check: which record, and (optionally) which
/// object API name it belongs to.
///
/// The record id is an opaque identifier assigned by the hosting platform;
/// the object API name may be absent when the hosting context does not
/// supply one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessQuery {
    pub record_id: String,
    pub object_api_name: Option<String>,
}

impl AccessQuery {
    pub fn new(record_id: impl Into<String>, object_api_name: Option<String>) -> Self {
        Self {
            record_id: record_id.into(),
            object_api_name,
        }
    }
}

/// Permission level granted alongside a positive access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    View,
    Edit,
}

impl AccessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::View => "view",
            AccessMode::Edit => "edit",
        }
    }
}

/// Outcome of a successful access check.
///
/// `mode` is meaningless when `has_access` is false. A grant without a mode
/// is treated as view-only by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    pub has_access: bool,
    pub mode: Option<AccessMode>,
}

impl AccessDecision {
    pub fn granted(mode: AccessMode) -> Self {
        Self {
            has_access: true,
            mode: Some(mode),
        }
    }

    pub fn denied() -> Self {
        Self {
            has_access: false,
            mode: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Severity classification for user-facing notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

/// A transient user-facing message. Write-only, fire-and-forget; no
/// lifecycle beyond emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AccessMode::Edit).unwrap(), "\"edit\"");
        assert_eq!(
            serde_json::from_str::<AccessMode>("\"view\"").unwrap(),
            AccessMode::View
        );
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Success).unwrap(), "\"success\"");
    }

    #[test]
    fn denied_decision_carries_no_mode() {
        let d = AccessDecision::denied();
        assert!(!d.has_access);
        assert!(d.mode.is_none());
    }
}
