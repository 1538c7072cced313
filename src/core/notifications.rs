use std::time::{
    Duration,
    Instant,
};

pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub visible: bool,
}

/// Holds at most one transient message. Each `show` replaces the message and
/// moves the single dismiss deadline, so a pending dismissal can never fire
/// twice or outlive a newer message.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    notification: Option<Notification>,
    dismiss_at: Option<Instant>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.show_at(message, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, now: Instant) {
        self.notification = Some(Notification { message: message.into(), visible: true });
        self.dismiss_at = Some(now + NOTIFICATION_DURATION);
    }

    pub fn hide(&mut self) {
        if let Some(notification) = &mut self.notification {
            notification.visible = false;
        }
        self.dismiss_at = None;
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Fires the pending dismissal if its deadline has passed. Returns true
    /// only on the call that actually hid the notification.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        match self.dismiss_at {
            Some(deadline) if now >= deadline => {
                self.hide();
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.notification.as_ref().is_some_and(|n| n.visible)
    }

    /// The message while visible.
    pub fn message(&self) -> Option<&str> {
        self.notification.as_ref().filter(|n| n.visible).map(|n| n.message.as_str())
    }

    pub fn current(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Time left before the pending dismissal, if any.
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.dismiss_at.map(|deadline| deadline.saturating_duration_since(now))
    }
}
