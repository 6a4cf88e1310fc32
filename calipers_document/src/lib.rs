// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calipers Document: the in-memory document tree the inspection engine operates on.
//!
//! This crate models the host page as a slotted arena of elements with
//! generational identifiers. It is the substrate for the other Calipers
//! crates: the snapshot builder clones a `Document` into an inert copy, the
//! selection crates track `NodeId`s, and the overlay layer derives box
//! metrics and style attributes from it.
//!
//! - [`Document`]: arena container managing elements and parent/child links.
//! - [`NodeId`]: generational handle of an element; stale ids are detectable
//!   and every accessor returns `None` for them.
//! - [`ElementData`]: per-element data (tag, classes, text, computed style,
//!   scroll offsets, inline click handler, layout bounds, flags).
//! - [`BoxMetrics`]: the axis-aligned box of an element, derived from its
//!   *current* bounds at call time — never cached across layout changes.
//! - [`NodeKind`]: text/image/generic classification used to pick the
//!   attribute set shown by the inspector.
//!
//! The document does not perform layout. Host code computes positions and
//! sizes with whatever layout system it uses and pushes the resulting
//! world-space boxes in via [`Document::set_bounds`]; metrics queries then
//! reflect whatever the host last reported.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod metrics;
mod types;

pub use document::Document;
pub use metrics::BoxMetrics;
pub use types::{ComputedStyle, ElementData, InlineHandler, NodeFlags, NodeId, NodeKind, Scroll};
