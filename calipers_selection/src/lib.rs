// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calipers Selection: bounded click-window tracking and selection stacks.
//!
//! Two small state machines sit between raw click events and the overlay
//! layer:
//!
//! - [`ClickTracker`] watches for repeated clicks on the same element and
//!   signals when the element should be hidden (with an advisory warning one
//!   click earlier). Each inspection tool owns its own tracker with its own
//!   threshold.
//! - [`SelectionSlot`] (attribute mode) and [`SelectionStack`] (distance
//!   mode) hold the current selection: a single replace-on-click slot, or an
//!   ordered pair with toggle/evict semantics feeding the two-box comparison.
//!
//! Both are generic over the node key `K`, so callers can use any small,
//! comparable handle (for example `calipers_document::NodeId`).
//!
//! ## Example
//!
//! ```
//! use calipers_selection::{ClickOutcome, ClickTracker, SelectionStack};
//!
//! let mut tracker: ClickTracker<u32> = ClickTracker::new(3);
//! assert_eq!(tracker.observe(7), ClickOutcome::Continue);
//! assert_eq!(tracker.observe(7), ClickOutcome::Warn);
//! assert_eq!(tracker.observe(7), ClickOutcome::Remove);
//!
//! let mut stack: SelectionStack<u32> = SelectionStack::new();
//! stack.push(1);
//! stack.push(2);
//! stack.push(3);
//! assert_eq!(stack.entries(), &[2, 3]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod click;
mod stack;

pub use click::{ClickOutcome, ClickTracker};
pub use stack::{SelectionSlot, SelectionStack};
