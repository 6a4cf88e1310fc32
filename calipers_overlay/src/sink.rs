// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering capability consumed by the engine.

use crate::descriptor::{OverlayDescriptor, OverlayKind};

/// Host-provided rendering of overlays and transient notices.
///
/// The engine computes geometry and labels; the sink paints them. Showing a
/// descriptor replaces the previously shown visual of the same kind
/// (measuring lines are replaced as a set per refresh). Implementations
/// must tolerate hide calls for kinds that were never shown.
pub trait RenderSink {
    /// Shows (or updates) one overlay.
    fn show(&mut self, overlay: &OverlayDescriptor);

    /// Hides all overlays of a kind.
    fn hide(&mut self, kind: OverlayKind);

    /// Hides every overlay.
    fn hide_all(&mut self);

    /// Requests a transient notification (a toast) for `duration_ms`.
    fn notify(&mut self, message: &str, duration_ms: u64);
}
