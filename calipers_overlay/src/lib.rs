// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calipers Overlay: computed overlay data and the per-activation session.
//!
//! This crate ties the other Calipers crates together. It owns no pixels:
//! everything user-visible is expressed as [`OverlayDescriptor`] values and
//! transient notification requests handed to a host-provided [`RenderSink`].
//!
//! - [`Session`]: one inspection activation — the snapshot, the per-tool
//!   selection and click state, and the deferred-task scheduler. Construct
//!   with [`Session::activate`], feed clicks in, and call
//!   [`Session::run_due`] from the host's timer to fire deferred steps.
//! - [`OverlayDescriptor`] / [`Label`] / [`OverlayKind`]: the data contract
//!   between the engine and the rendering sink.
//! - Attribute formatting: classification-keyed property tables turning a
//!   node's computed style into display labels.
//! - Conversion helpers: `rgb(a)` → hex display form, and pixel-to-display
//!   conversion with the viewport-ratio default. Each tool accepts an
//!   injected conversion function; when none is configured the default is
//!   substituted.
//!
//! ## Event flow
//!
//! A click → the tool's `ClickTracker` (which may short-circuit into hiding
//! the clicked element) → selection update → metrics extraction → gap
//! geometry (two selected) or attribute formatting (one selected) →
//! descriptors emitted to the sink. The snapshot is built once, at
//! activation, before any clicks are processed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod attributes;
mod convert;
mod descriptor;
mod scheduler;
mod session;
mod sink;

pub use attributes::{PropertyFormat, PropertySpec, format_attributes, specs_for};
pub use convert::{Viewport, format_px, parse_px, rgba_to_hex};
pub use descriptor::{
    CoverValuePlacement, HorizontalAnchor, Label, LabelSideX, LabelSideY, OverlayDescriptor,
    OverlayKind, PanelPlacement, Placement, VerticalAnchor,
};
pub use scheduler::{DeferredAction, Scheduler};
pub use session::{
    ATTRIBUTE_REMOVE_CLICKS, DISTANCE_REMOVE_CLICKS, GestureDisposition, PixelFn, Session,
    SessionOptions, ToolConfig,
};
pub use sink::RenderSink;
