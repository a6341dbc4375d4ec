// Status-line notifications with priorities and auto-dismiss

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use nosave_core::launcher::{Notice, NoticeLength};

/// Notification priority levels (higher = more important)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Success => "✓",
            NotificationLevel::Warning => "⚠",
            NotificationLevel::Error => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration: Duration,
    pub shown_at: Option<Instant>,
}

impl Notification {
    fn new(message: impl Into<String>, level: NotificationLevel, secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration: Duration::from_secs(secs),
            shown_at: None,
        }
    }

    /// Info notification (3 seconds)
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info, 3)
    }

    /// Success notification (3 seconds)
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success, 3)
    }

    /// Warning notification (4 seconds)
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning, 4)
    }

    /// Error notification (5 seconds)
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error, 5)
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at
            .map(|shown| shown.elapsed() >= self.duration)
            .unwrap_or(false)
    }

    pub fn mark_shown(&mut self) {
        if self.shown_at.is_none() {
            self.shown_at = Some(Instant::now());
        }
    }
}

/// Launcher notices: long ones ask the user to do something (install the
/// chat app), short ones report a failed attempt.
impl From<Notice> for Notification {
    fn from(notice: Notice) -> Self {
        match notice.length {
            NoticeLength::Long => {
                Notification::warning(notice.message).duration(Duration::from_secs(6))
            }
            NoticeLength::Short => Notification::error(notice.message),
        }
    }
}

/// Queue of notifications with priority handling
#[derive(Debug, Default)]
pub struct NotificationQueue {
    queue: VecDeque<Notification>,
    current: Option<Notification>,
    /// Recently shown messages (hash, expiry) for deduplication
    recent_messages: Vec<(u64, Instant)>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Higher priority notifications replace the current one, which is dropped
    pub fn push(&mut self, notification: Notification) {
        let hash = Self::hash_message(&notification.message);
        let now = Instant::now();

        self.recent_messages.retain(|(_, expiry)| *expiry > now);
        // Same message within the last 2 seconds
        if self.recent_messages.iter().any(|(h, _)| *h == hash) {
            return;
        }
        self.recent_messages.push((hash, now + Duration::from_secs(2)));

        if let Some(ref current) = self.current {
            if notification.level > current.level {
                let mut n = notification;
                n.mark_shown();
                self.current = Some(n);
                return;
            }
        }

        if self.current.is_none() {
            let mut n = notification;
            n.mark_shown();
            self.current = Some(n);
        } else {
            let pos = self
                .queue
                .iter()
                .position(|n| n.level < notification.level)
                .unwrap_or(self.queue.len());
            self.queue.insert(pos, notification);
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
        self.advance();
    }

    /// Advance to the next notification if the current one expired
    pub fn tick(&mut self) {
        if self.current.as_ref().is_some_and(Notification::is_expired) {
            self.current = None;
            self.advance();
        }
    }

    fn advance(&mut self) {
        if self.current.is_none() {
            if let Some(mut next) = self.queue.pop_front() {
                next.mark_shown();
                self.current = Some(next);
            }
        }
    }

    fn hash_message(message: &str) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        message.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_creation() {
        let n = Notification::info("test");
        assert_eq!(n.level, NotificationLevel::Info);
        assert_eq!(n.duration, Duration::from_secs(3));

        let n = Notification::error("error").duration(Duration::from_secs(10));
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.duration, Duration::from_secs(10));
    }

    #[test]
    fn test_queue_basic() {
        let mut q = NotificationQueue::new();
        assert!(q.current().is_none());

        q.push(Notification::info("first"));
        assert_eq!(q.current().unwrap().message, "first");

        q.dismiss();
        assert!(q.current().is_none());
    }

    #[test]
    fn test_priority_replaces_current() {
        let mut q = NotificationQueue::new();

        q.push(Notification::info("Loaded 3 calls"));
        q.push(Notification::error("Error opening WhatsApp"));
        assert_eq!(q.current().unwrap().message, "Error opening WhatsApp");

        // The replaced info notification is dropped, not re-queued
        q.dismiss();
        assert!(q.current().is_none());
    }

    #[test]
    fn test_lower_priority_waits_in_queue() {
        let mut q = NotificationQueue::new();

        q.push(Notification::error("Could not open the app store"));
        q.push(Notification::info("Refreshing"));
        q.push(Notification::warning("Call history access not granted"));

        q.dismiss();
        assert_eq!(
            q.current().unwrap().message,
            "Call history access not granted"
        );
        q.dismiss();
        assert_eq!(q.current().unwrap().message, "Refreshing");
    }

    #[test]
    fn test_duplicate_is_skipped() {
        let mut q = NotificationQueue::new();
        q.push(Notification::info("Refreshing"));
        q.dismiss();
        q.push(Notification::info("Refreshing"));
        assert!(q.current().is_none());
    }

    #[test]
    fn test_tick_expires_current() {
        let mut q = NotificationQueue::new();
        q.push(Notification::info("gone").duration(Duration::ZERO));
        q.push(Notification::info("next"));
        q.tick();
        assert_eq!(q.current().unwrap().message, "next");
    }

    #[test]
    fn test_from_notice() {
        let n = Notification::from(Notice::long("WhatsApp is not installed."));
        assert_eq!(n.level, NotificationLevel::Warning);
        assert_eq!(n.duration, Duration::from_secs(6));

        let n = Notification::from(Notice::short("Error opening WhatsApp"));
        assert_eq!(n.level, NotificationLevel::Error);
    }
}
