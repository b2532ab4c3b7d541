//! Short-lived notifications (pin changes, deletes, store failures).

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays on screen unless overridden
const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);
/// Failures stay a little longer
const ERROR_TOAST_DURATION: Duration = Duration::from_secs(5);
const MAX_VISIBLE_TOASTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(id: u64, message: impl Into<String>, toast_type: ToastType) -> Self {
        let duration = match toast_type {
            ToastType::Error => ERROR_TOAST_DURATION,
            _ => DEFAULT_TOAST_DURATION,
        };
        Self {
            id,
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Queue of visible toasts, oldest first.
#[derive(Debug)]
pub struct ToastManager {
    queue: VecDeque<Toast>,
    next_id: u64,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            next_id: 1,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, toast_type: ToastType) {
        let toast = Toast::new(self.next_id, message, toast_type);
        self.push_toast(toast);
    }

    /// Queue a pre-built toast, assigning it the next id.
    pub fn push_toast(&mut self, mut toast: Toast) {
        toast.id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.queue.push_back(toast);
        while self.queue.len() > MAX_VISIBLE_TOASTS {
            self.queue.pop_front();
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, ToastType::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, ToastType::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, ToastType::Error);
    }

    /// Drop expired toasts.
    pub fn update(&mut self) {
        self.queue.retain(|t| !t.is_expired());
    }

    pub fn visible_toasts(&self) -> Vec<&Toast> {
        self.queue.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_keeps_only_newest_toasts() {
        let mut toasts = ToastManager::new();
        for i in 0..6 {
            toasts.success(format!("toast {}", i));
        }
        let visible = toasts.visible_toasts();
        assert_eq!(visible.len(), MAX_VISIBLE_TOASTS);
        assert_eq!(visible[0].message, "toast 2");
        assert_eq!(visible[3].id, 6);
    }

    #[test]
    fn expired_toasts_are_dropped_on_update() {
        let mut toasts = ToastManager::new();
        toasts.push_toast(Toast::new(0, "gone", ToastType::Info).with_duration(Duration::ZERO));
        toasts.error("stays");
        toasts.update();

        let visible = toasts.visible_toasts();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].toast_type, ToastType::Error);
        assert_eq!(visible[0].duration, ERROR_TOAST_DURATION);
    }
}
