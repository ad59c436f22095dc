//! Transient on-screen message that hides itself after a fixed duration.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    duration: Duration,
    text: Option<String>,
    remaining: Duration,
}

impl Notification {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            text: None,
            remaining: Duration::ZERO,
        }
    }

    /// Replaces any current message and restarts the timer
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.remaining = self.duration;
    }

    /// Advances the timer by one frame
    pub fn tick(&mut self, dt: Duration) {
        if self.text.is_none() {
            return;
        }
        self.remaining = self.remaining.saturating_sub(dt);
        if self.remaining.is_zero() {
            self.text = None;
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.text.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hides_after_duration() {
        let mut notification = Notification::new(Duration::from_secs(2));
        notification.show("Found: 1. Remaining: 1.");

        notification.tick(Duration::from_millis(1500));
        assert_eq!(notification.text(), Some("Found: 1. Remaining: 1."));

        notification.tick(Duration::from_millis(500));
        assert!(!notification.is_visible());
    }

    #[test]
    fn test_show_restarts_timer() {
        let mut notification = Notification::new(Duration::from_secs(2));
        notification.show("first");
        notification.tick(Duration::from_millis(1900));
        notification.show("second");
        notification.tick(Duration::from_millis(1900));
        assert_eq!(notification.text(), Some("second"));
    }

    #[test]
    fn test_tick_without_message_is_harmless() {
        let mut notification = Notification::new(Duration::from_secs(2));
        notification.tick(Duration::from_secs(5));
        assert!(!notification.is_visible());
    }
}
