// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calipers Snapshot: an inert, visually-identical copy of a live document.
//!
//! Inspection interactions must never disturb the real page, so a session
//! starts by cloning the live document into a [`Snapshot`]: a style-isolated
//! container owning its own [`Document`](calipers_document::Document). All
//! subsequent clicks target snapshot nodes; hiding, scroll locking, and
//! overlay bookkeeping happen on the copy exclusively.
//!
//! Construction runs two passes, mirroring how the copy is produced on a
//! real page:
//!
//! 1. **Clone**: the subtree is deep-copied under a fresh container element.
//!    Elements previously injected by the engine itself (marked with the
//!    [`RESERVED_CLASS_PREFIX`] naming convention) are dropped so the copy
//!    does not contain inspection artifacts of an earlier session.
//! 2. **Align**: clone and live tree are walked in lockstep, pairing
//!    children by index. Each paired node gets its scroll offsets copied
//!    (locking the scrolled axis), its inline click handler neutralized, and
//!    a fixed set of layout-affecting style properties copied when tag and
//!    class identity match. Every pair records an [`AlignOutcome`]; shape
//!    divergence skips the unmatched branch and is never an error.
//!
//! Raising the snapshot's stacking priority above the live page is a
//! deferred step (the session schedules it ~500 ms after construction so the
//! alignment settles without a visible flash); [`Snapshot::raise`] tolerates
//! being called on an already-raised snapshot.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod align;
mod snapshot;

pub use align::{AlignOutcome, AlignReport, SkipReason};
pub use snapshot::{RESERVED_CLASS_PREFIX, Snapshot, SnapshotOptions};
