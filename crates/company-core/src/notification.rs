//! Ephemeral user notifications
//!
//! At most one notification is visible at a time. Raising a new one
//! replaces the current one and restarts the dismissal timer.

use std::time::{Duration, Instant};

/// Whether the notification reports success or failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Failure,
}

/// A message shown to the user until it expires or is dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    /// When the notification was raised
    pub raised_at: Instant,
}

impl Notification {
    pub fn is_success(&self) -> bool {
        self.level == NotificationLevel::Success
    }
}

/// Holds the current notification and its auto-dismiss deadline
#[derive(Debug)]
pub struct Notifier {
    current: Option<Notification>,
    ttl: Duration,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    /// Show a success message
    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationLevel::Success);
    }

    /// Show a failure message
    pub fn failure(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationLevel::Failure);
    }

    /// Replace any pending notification
    pub fn notify(&mut self, message: impl Into<String>, level: NotificationLevel) {
        self.current = Some(Notification {
            message: message.into(),
            level,
            raised_at: Instant::now(),
        });
    }

    /// The visible notification, if any
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Hide the notification explicitly
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Hide the notification if it has outlived the ttl at `now`
    ///
    /// Returns true if a notification was dismissed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.raised_at) >= self.ttl);
        if expired {
            self.current = None;
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_and_dismiss() {
        let mut notifier = Notifier::new(Duration::from_secs(3));
        assert!(notifier.current().is_none());

        notifier.success("Saved");
        let current = notifier.current().unwrap();
        assert_eq!(current.message, "Saved");
        assert!(current.is_success());

        notifier.dismiss();
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_expires_after_ttl() {
        let mut notifier = Notifier::new(Duration::from_secs(3));
        notifier.failure("Oops");
        let raised_at = notifier.current().unwrap().raised_at;

        assert!(!notifier.expire(raised_at + Duration::from_secs(2)));
        assert!(notifier.current().is_some());

        assert!(notifier.expire(raised_at + Duration::from_secs(3)));
        assert!(notifier.current().is_none());

        // Nothing left to expire
        assert!(!notifier.expire(raised_at + Duration::from_secs(10)));
    }

    #[test]
    fn test_new_notification_restarts_timer() {
        let mut notifier = Notifier::new(Duration::from_secs(3));
        notifier.success("First");
        let first_raised = notifier.current().unwrap().raised_at;

        std::thread::sleep(Duration::from_millis(20));
        notifier.failure("Second");
        let second = notifier.current().unwrap().clone();

        assert_eq!(second.message, "Second");
        assert_eq!(second.level, NotificationLevel::Failure);
        assert!(second.raised_at > first_raised);

        // The first timer's deadline no longer applies
        assert!(!notifier.expire(first_raised + Duration::from_secs(3)));
        assert!(notifier.current().is_some());
    }
}
