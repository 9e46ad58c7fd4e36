//! Notification sink.
//!
//! The library defines the trait and callers inject the implementation,
//! so the orchestrator never knows whether it is talking to a desktop
//! notification daemon, a test recorder, or nothing at all. Delivery is
//! fire-and-forget: there is no delivery guarantee and no error path.

use std::sync::Mutex;

use tracing::warn;

/// A fire-and-forget notification sink.
///
/// Implementations must be `Send + Sync`; the scheduler calls this from a
/// spawned task. Failures must be swallowed (log them, don't raise them).
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

/// Desktop notifications via the system notification daemon.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        if let Err(e) = notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .show()
        {
            warn!("Desktop notification failed: {e}");
        }
    }
}

/// Silently drops every notification. For headless runs (`--no-notify`).
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _body: &str) {}
}

/// Records notifications in memory. Used by tests to assert on what the
/// orchestrator announced.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `(title, body)` pairs in delivery order.
    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_order() {
        let n = RecordingNotifier::new();
        n.notify("first", "a");
        n.notify("second", "b");
        let msgs = n.messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].0, "first");
        assert_eq!(msgs[1].1, "b");
    }

    #[test]
    fn null_notifier_is_silent() {
        NullNotifier.notify("anything", "at all");
    }
}
