//! Transient user-visible notifications raised by store operations.

use crate::error::{ApiError, StoreError};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

const SHORT: Duration = Duration::from_millis(2000);
const LONG: Duration = Duration::from_millis(5000);

const TRANSPORT_PREFIX: &str =
    "Something went wrong! If this error persists, please contact us with the following error: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// How long a presenter should keep the message visible
    pub duration: Duration,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
            duration: SHORT,
        }
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            duration,
        }
    }

    pub fn saved() -> Self {
        Self::info("Saved")
    }

    pub fn deleted() -> Self {
        Self::info("Deleted!")
    }

    pub fn copied() -> Self {
        Self::info("Copied!")
    }

    /// Rejections carry the bare status code; transport failures the error text
    pub fn from_api_error(error: &ApiError) -> Self {
        match error {
            ApiError::Rejected { status, .. } => Self::error(status.to_string(), SHORT),
            other => Self::error(format!("{}{}", TRANSPORT_PREFIX, other.detail()), LONG),
        }
    }

    pub fn from_store_error(error: &StoreError) -> Self {
        match error {
            StoreError::Remote(api_error) => Self::from_api_error(api_error),
            other => Self::error(other.to_string(), SHORT),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Receiver of store notifications (a snackbar, a terminal, a log).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Keeps every notification in order; useful for tests and deferred rendering.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_carries_status_code() {
        let n = Notification::from_api_error(&ApiError::Rejected {
            status: 500,
            endpoint: "/addPassword".to_string(),
            message: "internal".to_string(),
        });
        assert!(n.is_error());
        assert_eq!(n.message, "500");
        assert_eq!(n.duration, Duration::from_millis(2000));
    }

    #[test]
    fn test_transport_failure_message() {
        let n = Notification::from_api_error(&ApiError::Transport {
            endpoint: "/getPasswords".to_string(),
            message: "connection refused".to_string(),
        });
        assert_eq!(
            n.message,
            "Something went wrong! If this error persists, please contact us with the following error: connection refused"
        );
        assert_eq!(n.duration, Duration::from_millis(5000));
    }

    #[test]
    fn test_store_error_notification() {
        let n = Notification::from_store_error(&StoreError::EntryNotFound);
        assert!(n.is_error());
        assert_eq!(n.message, "Entry is no longer held by the store");
    }

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::saved());
        notifier.notify(Notification::deleted());
        assert_eq!(notifier.last(), Some(Notification::deleted()));

        let drained = notifier.drain();
        assert_eq!(drained, vec![Notification::saved(), Notification::deleted()]);
        assert!(notifier.notifications().is_empty());
    }
}
