//! User-facing notifications emitted by store and admin actions.
//!
//! # Responsibility
//! - Carry success/error messages from core actions to whatever UI is
//!   attached.
//!
//! # Invariants
//! - Sinks never fail; a notification is fire-and-forget.

use log::{info, warn};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Receiver for notifications.
pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}

/// Default sink: forwards notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => warn!(
                "event=notification module=notify status=error message={}",
                notification.message
            ),
            NotificationLevel::Success => info!(
                "event=notification module=notify status=ok message={}",
                notification.message
            ),
        }
    }
}

/// Sink that buffers notifications for the caller to display later.
///
/// Clones share one buffer, so a UI can keep a handle while the store owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Rc<RefCell<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of buffered notifications, oldest first.
    pub fn entries(&self) -> Vec<Notification> {
        self.entries.borrow().clone()
    }

    /// Removes and returns buffered notifications.
    pub fn drain(&self) -> Vec<Notification> {
        self.entries.borrow_mut().drain(..).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries.borrow().last().cloned()
    }
}

impl NotificationSink for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.entries.borrow_mut().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::{Notification, NotificationLevel, NotificationLog, NotificationSink};

    #[test]
    fn clones_share_one_buffer() {
        let log = NotificationLog::new();
        let handle = log.clone();
        log.notify(Notification::success("saved"));
        log.notify(Notification::error("failed"));

        assert_eq!(handle.entries().len(), 2);
        assert_eq!(
            handle.last().map(|n| n.level),
            Some(NotificationLevel::Error)
        );
        assert_eq!(handle.drain().len(), 2);
        assert!(log.entries().is_empty());
    }
}
