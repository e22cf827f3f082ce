//! Binds an [`AccessChecker`] to an [`AccessGate`].
//!
//! One call, one check: take the gate's pending query, await the checker,
//! feed the outcome back under the epoch captured before the await. If the
//! query changes while the check is in flight, the gate discards the stale
//! delivery (last-query-wins); no cancellation is attempted.

use crate::gate::AccessGate;
use crate::sink::NotificationSink;
use warden_provider::AccessChecker;

/// Run the gate's pending check to completion.
///
/// Check failure is surfaced through the sink, never returned: the caller
/// has nothing to handle.
pub async fn run_check(
    gate: &mut AccessGate,
    checker: &dyn AccessChecker,
    sink: &dyn NotificationSink,
) {
    let Some((query, epoch)) = gate.pending_query() else {
        tracing::debug!("no pending query; nothing to check");
        return;
    };

    tracing::debug!(record_id = %query.record_id, epoch, "dispatching access check");

    match checker.check_access(&query).await {
        Ok(decision) => gate.on_decision(epoch, decision),
        Err(e) => gate.on_check_failed(epoch, &e, sink),
    }
}
