use crate::service::{Notification, NotificationKind, Notifier};
use std::sync::Mutex;
use tracing::{info, warn};

/// Writes notifications to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Success => info!(%kind, "{}", message),
            NotificationKind::Error => warn!(%kind, "{}", message),
        }
    }
}

/// Keeps every notification in memory, oldest first
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Notifications of one kind
    pub fn of_kind(&self, kind: NotificationKind) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(|n| n.kind == kind)
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(Notification {
                message: message.to_string(),
                kind,
            });
        }
    }
}
