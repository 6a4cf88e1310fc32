// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred single-shot steps owned by the session.
//!
//! The engine is single-threaded and event-driven; the only asynchronous
//! scheduling it needs is "run this once, later": the zero-delay panel
//! placement (after the popup settles into layout) and the snapshot's
//! stacking-priority raise (fixed delay, avoiding a flash of unstyled
//! content). Time is host-supplied in milliseconds, matching the timestamp
//! convention of the selection state machines; the host drives execution via
//! [`Session::run_due`](crate::Session::run_due).
//!
//! A new selection or a clear does **not** drain the queue — every action
//! re-checks the state it touches and no-ops when that state is gone.
//! Deactivation cancels everything via [`Scheduler::clear`].

use alloc::vec::Vec;

/// What a deferred step does when it fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeferredAction {
    /// Raise the snapshot's stacking priority above the live page.
    RaiseSnapshot,
    /// Compute and emit the attribute panel's final placement.
    PlacePanel,
}

#[derive(Copy, Clone, Debug)]
struct Deferred {
    due: u64,
    action: DeferredAction,
}

/// Queue of pending single-shot steps.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    queue: Vec<Deferred>,
}

impl Scheduler {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` to fire once `now >= due`.
    pub fn schedule(&mut self, due: u64, action: DeferredAction) {
        self.queue.push(Deferred { due, action });
    }

    /// Removes and returns every action due at `now`, in due order.
    pub fn take_due(&mut self, now: u64) -> Vec<DeferredAction> {
        let mut due: Vec<Deferred> = Vec::new();
        self.queue.retain(|d| {
            if d.due <= now {
                due.push(*d);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|d| d.due);
        due.into_iter().map(|d| d.action).collect()
    }

    /// Cancels every pending step. Only deactivation does this; a clear
    /// leaves the queue intact and relies on per-action liveness checks.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Number of pending steps.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_once_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1500, DeferredAction::RaiseSnapshot);

        assert!(scheduler.take_due(1499).is_empty());
        assert_eq!(scheduler.take_due(1500), [DeferredAction::RaiseSnapshot]);
        // Single-shot: gone after firing.
        assert!(scheduler.take_due(2000).is_empty());
    }

    #[test]
    fn due_actions_come_out_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(300, DeferredAction::RaiseSnapshot);
        scheduler.schedule(100, DeferredAction::PlacePanel);
        assert_eq!(
            scheduler.take_due(1000),
            [DeferredAction::PlacePanel, DeferredAction::RaiseSnapshot]
        );
    }

    #[test]
    fn clear_cancels_everything() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(100, DeferredAction::PlacePanel);
        scheduler.clear();
        assert!(scheduler.is_empty());
        assert!(scheduler.take_due(u64::MAX).is_empty());
    }

    #[test]
    fn zero_delay_fires_immediately() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(42, DeferredAction::PlacePanel);
        assert_eq!(scheduler.take_due(42), [DeferredAction::PlacePanel]);
    }
}
