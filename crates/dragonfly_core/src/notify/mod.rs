//! Notification output for screen operations.
//!
//! # Responsibility
//! - Define the message record handed to the toast collaborator.
//! - Provide the sink seam so screens stay free of delivery details.
//!
//! # Invariants
//! - Each completed or rejected screen operation produces exactly one
//!   notification.
//! - Notifications are plain data; the core never renders them.

use log::{info, warn};
use std::sync::{Arc, Mutex, MutexGuard};

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Success,
    /// Destructive operations such as deletes.
    Destructive,
    Error,
}

impl NotificationLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Destructive => "destructive",
            Self::Error => "error",
        }
    }
}

/// Human-readable message with a title and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Success, title, description)
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Destructive, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Error, title, description)
    }

    fn with_level(
        level: NotificationLevel,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level,
        }
    }
}

/// Receiver of screen notifications.
pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}

impl<S: NotificationSink + ?Sized> NotificationSink for Arc<S> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Sink that buffers notifications for later draining.
///
/// Clones share one buffer, so a caller can keep a handle while a screen
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    buffer: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<Notification>> {
        // A panic while pushing cannot leave the Vec half-written.
        self.buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of buffered notifications, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.buffer().clone()
    }

    /// Removes and returns buffered notifications, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.buffer().drain(..).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.buffer().last().cloned()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.buffer().push(notification);
    }
}

/// Sink that forwards notification levels to the `log` facade.
///
/// Only the title is logged; descriptions can carry personal data.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => warn!(
                "event=notification module=notify level={} title={:?}",
                notification.level.as_str(),
                notification.title
            ),
            _ => info!(
                "event=notification module=notify level={} title={:?}",
                notification.level.as_str(),
                notification.title
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Notification, NotificationLevel, NotificationSink, RecordingSink};

    #[test]
    fn recording_sink_clones_share_buffer() {
        let sink = RecordingSink::new();
        let handle = sink.clone();
        sink.notify(Notification::success("Saved", "ok"));

        let drained = handle.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].level, NotificationLevel::Success);
        assert!(sink.notifications().is_empty());
    }
}
