//! Cancellable delayed tasks.
//!
//! A [`TaskSlot`] holds at most one live task. Scheduling a new task or
//! cancelling a [`TaskHandle`] bumps the slot generation, and a task only
//! runs if its ticket still matches when the timer fires. Debounced autosave
//! and debounced search are both built on this, as is the guard that drops
//! responses of superseded requests.

use gloo_timers::future::TimeoutFuture;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Debug, Default)]
pub struct TaskSlot {
    generation: Arc<AtomicU64>,
}

/// Ticket for one scheduled task
#[derive(Clone, Debug)]
pub struct TaskHandle {
    generation: Arc<AtomicU64>,
    ticket: u64,
}

impl TaskHandle {
    /// Still the latest task of its slot and not cancelled
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.ticket
    }

    /// Invalidate this task; a newer task in the same slot is left alone
    pub fn cancel(&self) {
        let _ = self.generation.compare_exchange(
            self.ticket,
            self.ticket + 1,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede whatever the slot held and hand out a fresh ticket
    pub fn arm(&self) -> TaskHandle {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        TaskHandle {
            generation: self.generation.clone(),
            ticket,
        }
    }

    /// Invalidate every task handed out so far
    pub fn cancel_all(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Run `task` after `delay_ms` unless it is cancelled or superseded first
    pub fn schedule<F>(&self, delay_ms: u32, task: F) -> TaskHandle
    where
        F: FnOnce() + 'static,
    {
        let handle = self.arm();
        let ticket = handle.clone();
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            if ticket.is_current() {
                task();
            }
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let slot = TaskSlot::new();
        let first = slot.arm();
        assert!(first.is_current());
        let second = slot.arm();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn test_cancel_only_affects_own_ticket() {
        let slot = TaskSlot::new();
        let first = slot.arm();
        let second = slot.arm();
        first.cancel();
        assert!(second.is_current());
        second.cancel();
        assert!(!second.is_current());
    }

    #[test]
    fn test_cancel_all() {
        let slot = TaskSlot::new();
        let handle = slot.arm();
        slot.clone().cancel_all();
        assert!(!handle.is_current());
        assert!(slot.arm().is_current());
    }
}
