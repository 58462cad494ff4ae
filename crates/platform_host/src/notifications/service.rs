//! Notification service contract, message model, and adapters.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

/// Default on-screen lifetime for a toast.
pub const DEFAULT_NOTIFICATION_DURATION_MS: u32 = 5_000;

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Informational message.
    #[default]
    Info,
    /// An operation completed.
    Success,
    /// Something degraded but kept working.
    Warning,
    /// An operation failed.
    Error,
}

impl NotificationLevel {
    /// Returns the CSS class token for this level.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A transient, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Short title.
    pub title: String,
    /// Message body.
    pub body: String,
    /// How long the toast stays visible.
    pub duration_ms: u32,
}

impl Notification {
    /// Creates a notification with the default duration.
    pub fn new(level: NotificationLevel, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
            duration_ms: DEFAULT_NOTIFICATION_DURATION_MS,
        }
    }

    /// Creates an error-level notification.
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title, body)
    }

    /// Creates an info-level notification.
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title, body)
    }
}

/// Host service that shows notifications to the user.
pub trait NotificationService {
    /// Dispatches a notification.
    ///
    /// # Errors
    ///
    /// Returns an error message when the host could not display it.
    fn notify(&self, notification: &Notification) -> Result<(), String>;
}

/// No-op notification service for headless targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn notify(&self, _notification: &Notification) -> Result<(), String> {
        Ok(())
    }
}

/// Notification service that keeps every dispatched message. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotificationService {
    sent: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingNotificationService {
    /// Returns every notification dispatched so far.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.borrow().clone()
    }
}

impl NotificationService for RecordingNotificationService {
    fn notify(&self, notification: &Notification) -> Result<(), String> {
        self.sent.borrow_mut().push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn recording_service_keeps_messages_in_order() {
        let service = RecordingNotificationService::default();
        let shared: &dyn NotificationService = &service.clone();

        shared.notify(&Notification::info("a", "first")).expect("notify");
        shared.notify(&Notification::error("b", "second")).expect("notify");

        let sent = service.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].level, NotificationLevel::Info);
        assert_eq!(sent[1].title, "b");
        assert_eq!(sent[1].duration_ms, DEFAULT_NOTIFICATION_DURATION_MS);
    }

    #[test]
    fn levels_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&NotificationLevel::Warning).unwrap(),
            "\"warning\""
        );
        assert_eq!(NotificationLevel::Error.token(), "error");
    }
}
