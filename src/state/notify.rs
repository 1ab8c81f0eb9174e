//! Transient status notifications (toasts).

use std::time::{Duration, Instant};

/// Severity of a notification; selects title, color and default lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
    /// Something needs attention.
    Warning,
    /// Neutral information.
    Info,
}

impl Severity {
    /// Title shown above the message when none is given.
    pub fn default_title(self) -> &'static str {
        match self {
            Severity::Success => "Success",
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        }
    }

    /// Lifetime used by [`Notifier::push`]. Errors stay a little longer.
    pub fn default_duration(self) -> Duration {
        match self {
            Severity::Error => Duration::from_millis(6000),
            Severity::Success | Severity::Warning | Severity::Info => Duration::from_millis(4000),
        }
    }
}

/// Identifies a toast for [`Notifier::dismiss`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

/// One visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Identifier.
    pub id: ToastId,
    /// Severity.
    pub severity: Severity,
    /// Heading.
    pub title: String,
    /// Body text.
    pub message: String,
    created: Instant,
    duration: Duration,
}

impl Toast {
    /// Sticky toasts (zero duration) are only removed by dismissal.
    pub fn is_sticky(&self) -> bool {
        self.duration.is_zero()
    }

    /// Whether the toast has outlived its duration at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        !self.is_sticky() && now >= self.created + self.duration
    }

    /// Fraction of the lifetime left, from 1.0 down to 0.0 (sticky: always 1.0).
    pub fn remaining_fraction(&self, now: Instant) -> f64 {
        if self.is_sticky() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.created);
        (1.0 - elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Queue of visible toasts in the order they were raised.
#[derive(Debug, Default)]
pub struct Notifier {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl Notifier {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise a toast with the severity's default title and lifetime.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>, now: Instant) -> ToastId {
        self.push_with(
            severity,
            severity.default_title(),
            message,
            severity.default_duration(),
            now,
        )
    }

    /// Raise a toast with an explicit title and lifetime (`Duration::ZERO` = sticky).
    pub fn push_with(
        &mut self,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
        duration: Duration,
        now: Instant,
    ) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);
        self.toasts.push(Toast {
            id,
            severity,
            title: title.into(),
            message: message.into(),
            created: now,
            duration,
        });
        id
    }

    /// Remove one toast. Returns whether it was visible.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Remove every toast.
    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    /// Drop expired toasts; returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired(now));
        before - self.toasts.len()
    }

    /// Toasts currently shown, oldest first.
    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    /// True when nothing is shown.
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
