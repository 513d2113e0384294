//! Observers - Ordered broadcast of combat notifications

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Receives every combat notification in order
pub trait CombatObserver: Send + Sync {
    fn on_action(&self, message: &str);
}

impl<F> CombatObserver for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_action(&self, message: &str) {
        self(message)
    }
}

/// Deliver `message` to every observer in registration order
///
/// A panicking observer is logged and skipped; later observers still receive
/// the message.
pub(crate) fn broadcast(observers: &[Arc<dyn CombatObserver>], message: &str) {
    for (index, observer) in observers.iter().enumerate() {
        let delivered = panic::catch_unwind(AssertUnwindSafe(|| observer.on_action(message)));
        if delivered.is_err() {
            warn!(observer = index, "combat observer panicked; skipping it for this message");
        }
    }
}

/// Keeps the most recent notifications, dropping the oldest
#[derive(Debug)]
pub struct MessageLog {
    capacity: usize,
    messages: Mutex<VecDeque<String>>,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        MessageLog {
            capacity,
            messages: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Snapshot of the retained messages, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<String>> {
        self.messages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CombatObserver for MessageLog {
    fn on_action(&self, message: &str) {
        if self.capacity == 0 {
            return;
        }
        let mut messages = self.lock();
        if messages.len() == self.capacity {
            messages.pop_front();
        }
        messages.push_back(message.to_string());
    }
}

/// Forwards notifications to `tracing` at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CombatObserver for TracingObserver {
    fn on_action(&self, message: &str) {
        info!(target: "combat", "{}", message);
    }
}
