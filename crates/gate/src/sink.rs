//! Notification emission interface and backends.
//!
//! The gate pushes structured notifications through [`NotificationSink`];
//! what "display" means belongs to the host. Two backends:
//! - [`TracingSink`] -- forwards to the `tracing` macros (CLI default)
//! - [`MemorySink`] -- records in memory, for JSON output and tests

use std::sync::Mutex;
use warden_core::{Notification, Severity};

/// Accepts user-facing notifications for display. Fire-and-forget.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Emits each notification as a tracing event at a level matching its
/// severity.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Error => tracing::error!(title = %n.title, "{}", n.message),
            Severity::Warning => tracing::warn!(title = %n.title, "{}", n.message),
            Severity::Success | Severity::Info => {
                tracing::info!(title = %n.title, "{}", n.message)
            }
        }
    }
}

/// Buffers notifications in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    inner: Mutex<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut self.inner.lock().unwrap())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, notification: Notification) {
        self.inner.lock().unwrap().push(notification);
    }
}
