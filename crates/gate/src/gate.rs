//! The access gate state machine.
//!
//! One gate instance tracks one query at a time:
//! `Pending -> Granted(mode) | Denied | CheckFailed`, terminal per query.
//! Changing the query inputs re-enters `Pending` under a new epoch;
//! deliveries tagged with a superseded epoch are discarded, so a late
//! resolution of an abandoned check can never clobber the current one.

use crate::render::{FormSpec, ViewState};
use crate::sink::NotificationSink;
use warden_core::error::WardenError;
use warden_core::{AccessDecision, AccessMode, AccessQuery, Notification, Severity};

/// Shown instead of the form when access is denied.
pub const DENIED_MESSAGE: &str =
    "Insufficient privileges to open the page; please contact the administrator.";

const CHECK_FAILED_TITLE: &str = "Error";
const CHECK_FAILED_MESSAGE: &str =
    "Error checking record access. Please contact your administrator.";

const SAVE_SUCCESS_TITLE: &str = "Success";
const SAVE_SUCCESS_MESSAGE: &str = "Record updated successfully";

/// Monotonic tag identifying which query a delivery belongs to.
pub type QueryEpoch = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No outcome yet. Also the state before any query is set.
    Pending,
    Granted(AccessMode),
    Denied,
    CheckFailed,
}

/// Gates a record form behind an access check.
///
/// The gate itself is synchronous; the asynchronous check lives behind
/// [`AccessChecker`](warden_provider::AccessChecker) and is fed back in via
/// [`on_decision`](AccessGate::on_decision) /
/// [`on_check_failed`](AccessGate::on_check_failed), tagged with the epoch
/// captured when the check was dispatched.
#[derive(Debug)]
pub struct AccessGate {
    query: Option<AccessQuery>,
    epoch: QueryEpoch,
    state: GateState,
}

impl AccessGate {
    pub fn new() -> Self {
        Self {
            query: None,
            epoch: 0,
            state: GateState::Pending,
        }
    }

    /// Configure the gate for a query. A change of inputs resets the gate
    /// to `Pending` under a fresh epoch; re-setting the current inputs is a
    /// no-op so an already-resolved outcome is not thrown away.
    pub fn set_query(&mut self, query: AccessQuery) -> QueryEpoch {
        if self.query.as_ref() == Some(&query) {
            return self.epoch;
        }

        tracing::debug!(record_id = %query.record_id, "gate reset for new query");
        self.query = Some(query);
        self.epoch += 1;
        self.state = GateState::Pending;
        self.epoch
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn current_epoch(&self) -> QueryEpoch {
        self.epoch
    }

    /// The query awaiting a check, if the gate has one and no outcome yet.
    pub fn pending_query(&self) -> Option<(AccessQuery, QueryEpoch)> {
        match (&self.state, &self.query) {
            (GateState::Pending, Some(q)) => Some((q.clone(), self.epoch)),
            _ => None,
        }
    }

    /// Deliver the outcome of a successful check call.
    ///
    /// A grant without a mode is treated as view-only. Deliveries for a
    /// superseded epoch, or after an outcome has already been acted upon,
    /// are discarded.
    pub fn on_decision(&mut self, epoch: QueryEpoch, decision: AccessDecision) {
        if !self.accepts(epoch, "decision") {
            return;
        }

        if decision.has_access {
            let mode = decision.mode.unwrap_or(AccessMode::View);
            tracing::info!(mode = mode.as_str(), "access granted");
            self.state = GateState::Granted(mode);
        } else {
            tracing::info!("access denied");
            self.state = GateState::Denied;
        }
    }

    /// Deliver a failure of the check call itself.
    ///
    /// Emits exactly one error notification per failed check; the failure
    /// is never propagated to the caller and the view stays empty.
    pub fn on_check_failed(
        &mut self,
        epoch: QueryEpoch,
        error: &WardenError,
        sink: &dyn NotificationSink,
    ) {
        if !self.accepts(epoch, "check failure") {
            return;
        }

        tracing::warn!(error = %error, "access check failed");
        self.state = GateState::CheckFailed;
        sink.notify(Notification::new(
            CHECK_FAILED_TITLE,
            CHECK_FAILED_MESSAGE,
            Severity::Error,
        ));
    }

    /// The rendered form reported a successful save.
    ///
    /// Emits one success notification per signal. Honored only while
    /// `Granted` -- the form does not exist in any other state, so a save
    /// signal arriving outside it is a caller bug and is dropped.
    pub fn on_save_success(&mut self, sink: &dyn NotificationSink) {
        match self.state {
            GateState::Granted(_) => {
                sink.notify(Notification::new(
                    SAVE_SUCCESS_TITLE,
                    SAVE_SUCCESS_MESSAGE,
                    Severity::Success,
                ));
            }
            _ => {
                tracing::warn!(state = ?self.state, "save signal outside granted state ignored");
            }
        }
    }

    /// Pure projection of the current state into something renderable.
    pub fn view(&self) -> ViewState {
        match (&self.state, &self.query) {
            (GateState::Granted(mode), Some(q)) => ViewState::Form(FormSpec {
                record_id: q.record_id.clone(),
                object_api_name: q.object_api_name.clone(),
                mode: *mode,
            }),
            (GateState::Denied, _) => ViewState::Denied {
                message: DENIED_MESSAGE.to_string(),
            },
            _ => ViewState::Empty,
        }
    }

    /// True when a delivery tagged `epoch` should be acted upon.
    fn accepts(&self, epoch: QueryEpoch, what: &str) -> bool {
        if self.query.is_none() {
            tracing::debug!(what, "delivery before any query set; ignored");
            return false;
        }
        if epoch != self.epoch {
            tracing::debug!(what, epoch, current = self.epoch, "stale delivery ignored");
            return false;
        }
        if self.state != GateState::Pending {
            tracing::debug!(what, state = ?self.state, "duplicate delivery ignored");
            return false;
        }
        true
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    const RECORD_ID: &str = "0017F00000XXXXXX";

    fn gate_with_query(object: Option<&str>) -> (AccessGate, QueryEpoch) {
        let mut gate = AccessGate::new();
        let epoch = gate.set_query(AccessQuery::new(RECORD_ID, object.map(String::from)));
        (gate, epoch)
    }

    #[test]
    fn granted_renders_form_with_object_api_name() {
        let (mut gate, epoch) = gate_with_query(Some("Account"));

        gate.on_decision(epoch, AccessDecision::granted(AccessMode::Edit));

        assert_eq!(gate.state(), GateState::Granted(AccessMode::Edit));
        match gate.view() {
            ViewState::Form(form) => {
                assert_eq!(form.object_api_name.as_deref(), Some("Account"));
                assert_eq!(form.record_id, RECORD_ID);
                assert_eq!(form.mode, AccessMode::Edit);
            }
            other => panic!("expected form, got {other:?}"),
        }
    }

    #[test]
    fn denied_renders_exact_message_and_no_form() {
        let (mut gate, epoch) = gate_with_query(None);

        gate.on_decision(epoch, AccessDecision::denied());

        assert_eq!(gate.state(), GateState::Denied);
        match gate.view() {
            ViewState::Denied { message } => assert_eq!(
                message,
                "Insufficient privileges to open the page; please contact the administrator."
            ),
            other => panic!("expected denial, got {other:?}"),
        }
    }

    #[test]
    fn check_failure_emits_exactly_one_error_notification() {
        let sink = MemorySink::new();
        let (mut gate, epoch) = gate_with_query(Some("Account"));
        let err = WardenError::Provider("boom".into());

        gate.on_check_failed(epoch, &err, &sink);
        // A second report of the same failed check must not re-notify.
        gate.on_check_failed(epoch, &err, &sink);

        assert_eq!(gate.state(), GateState::CheckFailed);
        assert_eq!(gate.view(), ViewState::Empty);

        let notifications = sink.take();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "Error");
        assert_eq!(
            notifications[0].message,
            "Error checking record access. Please contact your administrator."
        );
        assert_eq!(notifications[0].severity, Severity::Error);
    }

    #[test]
    fn save_success_emits_success_notification() {
        let sink = MemorySink::new();
        let (mut gate, epoch) = gate_with_query(Some("Account"));
        gate.on_decision(epoch, AccessDecision::granted(AccessMode::Edit));

        gate.on_save_success(&sink);

        let notifications = sink.take();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "Success");
        assert_eq!(notifications[0].message, "Record updated successfully");
        assert_eq!(notifications[0].severity, Severity::Success);
    }

    #[test]
    fn save_signal_outside_granted_is_ignored() {
        let sink = MemorySink::new();
        let (mut gate, epoch) = gate_with_query(Some("Account"));

        gate.on_save_success(&sink);
        gate.on_decision(epoch, AccessDecision::denied());
        gate.on_save_success(&sink);

        assert!(sink.is_empty());
    }

    #[test]
    fn repeated_decision_delivery_is_idempotent() {
        let (mut gate, epoch) = gate_with_query(Some("Account"));
        let decision = AccessDecision::granted(AccessMode::Edit);

        gate.on_decision(epoch, decision);
        let first_view = gate.view();
        gate.on_decision(epoch, decision);

        assert_eq!(gate.view(), first_view);
    }

    #[test]
    fn outcome_after_terminal_state_is_ignored() {
        let (mut gate, epoch) = gate_with_query(Some("Account"));

        gate.on_decision(epoch, AccessDecision::denied());
        // A contradictory late delivery for the same query must not win.
        gate.on_decision(epoch, AccessDecision::granted(AccessMode::Edit));

        assert_eq!(gate.state(), GateState::Denied);
    }

    #[test]
    fn stale_epoch_delivery_is_ignored() {
        let (mut gate, old_epoch) = gate_with_query(Some("Account"));
        let new_epoch = gate.set_query(AccessQuery::new("003ZZ", Some("Case".into())));
        assert_ne!(old_epoch, new_epoch);

        // The superseded check resolves late; the gate must stay pending.
        gate.on_decision(old_epoch, AccessDecision::granted(AccessMode::Edit));
        assert_eq!(gate.state(), GateState::Pending);

        gate.on_decision(new_epoch, AccessDecision::denied());
        assert_eq!(gate.state(), GateState::Denied);
    }

    #[test]
    fn new_query_reenters_pending() {
        let (mut gate, epoch) = gate_with_query(Some("Account"));
        gate.on_decision(epoch, AccessDecision::granted(AccessMode::View));

        gate.set_query(AccessQuery::new("003ZZ", Some("Case".into())));

        assert_eq!(gate.state(), GateState::Pending);
        assert_eq!(gate.view(), ViewState::Empty);
        assert!(gate.pending_query().is_some());
    }

    #[test]
    fn resetting_identical_query_keeps_outcome() {
        let (mut gate, epoch) = gate_with_query(Some("Account"));
        gate.on_decision(epoch, AccessDecision::granted(AccessMode::Edit));

        let same = gate.set_query(AccessQuery::new(RECORD_ID, Some("Account".into())));

        assert_eq!(same, epoch);
        assert_eq!(gate.state(), GateState::Granted(AccessMode::Edit));
    }

    #[test]
    fn grant_without_mode_defaults_to_view() {
        let (mut gate, epoch) = gate_with_query(Some("Account"));

        gate.on_decision(
            epoch,
            AccessDecision {
                has_access: true,
                mode: None,
            },
        );

        assert_eq!(gate.state(), GateState::Granted(AccessMode::View));
    }

    #[test]
    fn delivery_before_any_query_is_ignored() {
        let mut gate = AccessGate::new();

        gate.on_decision(0, AccessDecision::granted(AccessMode::Edit));

        assert_eq!(gate.state(), GateState::Pending);
        assert_eq!(gate.view(), ViewState::Empty);
    }
}
