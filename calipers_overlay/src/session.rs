// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One inspection activation: snapshot, tool state, and deferred steps.
//!
//! A [`Session`] is constructed per activation and owns everything the
//! activation needs — there is no module-level state, so independent
//! sessions (and tests) never share mutable state. The host:
//!
//! 1. calls [`Session::activate`] with the live document;
//! 2. routes clicks on the snapshot into [`Session::handle_attribute_click`]
//!    or [`Session::handle_distance_click`];
//! 3. drives deferred steps from its timer via [`Session::run_due`];
//! 4. asks [`Session::handle_scroll_gesture`] whether to let scroll
//!    gestures through;
//! 5. ends the activation with [`Session::deactivate`] (idempotent).
//!
//! All computation is synchronous on the triggering call. Time never comes
//! from a clock inside the engine; hosts pass `now` in milliseconds.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;

use calipers_distance::{Direction, compute_gaps};
use calipers_document::{BoxMetrics, Document, NodeId};
use calipers_selection::{ClickOutcome, ClickTracker, SelectionSlot, SelectionStack};
use calipers_snapshot::{Snapshot, SnapshotOptions};
use kurbo::Rect;
use log::debug;

use crate::attributes::format_attributes;
use crate::convert::{Viewport, format_px};
use crate::descriptor::{
    CoverValuePlacement, HorizontalAnchor, Label, LabelSideX, LabelSideY, OverlayDescriptor,
    OverlayKind, PanelPlacement, Placement, VerticalAnchor,
};
use crate::scheduler::{DeferredAction, Scheduler};
use crate::sink::RenderSink;

/// Default removal threshold for the attribute tool.
pub const ATTRIBUTE_REMOVE_CLICKS: usize = 3;
/// Default removal threshold for the distance tool.
pub const DISTANCE_REMOVE_CLICKS: usize = 4;

/// Delay before the snapshot's stacking priority is raised.
const RAISE_DELAY_MS: u64 = 500;
/// Minimum spacing between notifications.
const NOTIFY_MIN_INTERVAL_MS: u64 = 500;
/// Display duration of the removal warning.
const WARN_TOAST_MS: u64 = 1200;
/// Display duration of the scroll-disabled notice.
const SCROLL_TOAST_MS: u64 = 500;
/// Vertical distance between the selection and the attribute panel.
const PANEL_GAP_PX: f64 = 10.0;
/// The panel goes above the selection when this much room is missing below.
const PANEL_SAFE_BOTTOM_PX: f64 = 200.0;
/// Right-edge margin inside which a cover's height label flips outside.
const COVER_SAFE_RIGHT_PX: f64 = 50.0;
/// Top-edge margin inside which a cover's width label flips below.
const COVER_SAFE_TOP_PX: f64 = 20.0;

const REMOVE_WARNING: &str = "one more click removes this element";
const SCROLL_DISABLED: &str = "scrolling is disabled";

/// An injected pixel-to-display conversion. Must be pure.
pub type PixelFn = Box<dyn Fn(f64) -> String>;

/// Per-tool configuration.
#[derive(Default)]
pub struct ToolConfig {
    /// Pixel conversion for this tool's labels. `None` uses the default
    /// viewport-ratio conversion.
    pub pixel: Option<PixelFn>,
    /// Removal click threshold. `None` (or a zero) uses the tool's default;
    /// see [`ATTRIBUTE_REMOVE_CLICKS`] and [`DISTANCE_REMOVE_CLICKS`].
    pub remove_clicks: Option<usize>,
}

impl ToolConfig {
    fn resolve_times(&self, default: usize) -> usize {
        match self.remove_clicks {
            Some(times) if times >= 1 => times,
            _ => default,
        }
    }
}

impl core::fmt::Debug for ToolConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ToolConfig")
            .field(
                "pixel",
                &if self.pixel.is_some() { "custom" } else { "default" },
            )
            .field("remove_clicks", &self.remove_clicks)
            .finish()
    }
}

/// Options for [`Session::activate`].
#[derive(Debug, Default)]
pub struct SessionOptions {
    /// Whether the operator may scroll the snapshot.
    pub scroll_allowed: bool,
    /// Visible-area dimensions.
    pub viewport: Viewport,
    /// Attribute tool configuration.
    pub attribute: ToolConfig,
    /// Distance tool configuration.
    pub distance: ToolConfig,
}

/// What the host should do with a scroll gesture over the snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GestureDisposition {
    /// Let the gesture through.
    Allowed,
    /// The engine consumed it (default prevented); a notice was requested.
    Consumed,
}

/// One inspection activation.
pub struct Session {
    snapshot: Option<Snapshot>,
    attribute_selection: SelectionSlot<NodeId>,
    attribute_tracker: ClickTracker<NodeId>,
    distance_selection: SelectionStack<NodeId>,
    distance_tracker: ClickTracker<NodeId>,
    scheduler: Scheduler,
    viewport: Viewport,
    attribute_cfg: ToolConfig,
    distance_cfg: ToolConfig,
    last_notify: Option<u64>,
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("active", &self.snapshot.is_some())
            .field("pending_steps", &self.scheduler.len())
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Builds the snapshot of the live subtree at `root` and starts a
    /// session over it.
    ///
    /// The snapshot's stacking raise is scheduled [`RAISE_DELAY_MS`] after
    /// `now` so the alignment pass settles before the copy covers the page;
    /// drive it with [`Session::run_due`].
    pub fn activate(
        live: &Document,
        root: NodeId,
        options: SessionOptions,
        now: u64,
    ) -> Self {
        let snapshot = Snapshot::build(
            live,
            root,
            &SnapshotOptions {
                allow_scroll: options.scroll_allowed,
            },
        );
        debug!(
            "session activated: {} node(s) cloned, {} aligned",
            snapshot.document().len(),
            snapshot.align_report().aligned_count()
        );

        let mut scheduler = Scheduler::new();
        scheduler.schedule(now + RAISE_DELAY_MS, DeferredAction::RaiseSnapshot);

        Self {
            snapshot: Some(snapshot),
            attribute_selection: SelectionSlot::new(),
            attribute_tracker: ClickTracker::new(
                options.attribute.resolve_times(ATTRIBUTE_REMOVE_CLICKS),
            ),
            distance_selection: SelectionStack::new(),
            distance_tracker: ClickTracker::new(
                options.distance.resolve_times(DISTANCE_REMOVE_CLICKS),
            ),
            scheduler,
            viewport: options.viewport,
            attribute_cfg: options.attribute,
            distance_cfg: options.distance,
            last_notify: None,
        }
    }

    /// Whether the session still holds a snapshot.
    pub fn is_active(&self) -> bool {
        self.snapshot.is_some()
    }

    /// The snapshot, while active. Hosts hit-test clicks against its
    /// document and route the resulting ids back into the handlers.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Mutable snapshot access (host-driven layout updates on the copy).
    pub fn snapshot_mut(&mut self) -> Option<&mut Snapshot> {
        self.snapshot.as_mut()
    }

    /// Handles a click in attribute mode.
    pub fn handle_attribute_click(
        &mut self,
        node: NodeId,
        now: u64,
        sink: &mut dyn RenderSink,
    ) {
        if self.snapshot.is_none() {
            return;
        }
        match self.attribute_tracker.observe(node) {
            ClickOutcome::Remove => {
                if let Some(snapshot) = &mut self.snapshot {
                    snapshot.document_mut().set_visible(node, false);
                }
                self.attribute_selection.clear();
                sink.hide(OverlayKind::Cover);
                sink.hide(OverlayKind::Panel);
                return;
            }
            ClickOutcome::Warn => self.notify(sink, REMOVE_WARNING, WARN_TOAST_MS, now),
            ClickOutcome::Continue => {}
        }
        self.attribute_selection.replace(node);
        self.refresh_attribute(now, sink);
    }

    /// Handles a click in distance mode.
    pub fn handle_distance_click(
        &mut self,
        node: NodeId,
        now: u64,
        sink: &mut dyn RenderSink,
    ) {
        if self.snapshot.is_none() {
            return;
        }
        match self.distance_tracker.observe(node) {
            ClickOutcome::Remove => {
                if let Some(snapshot) = &mut self.snapshot {
                    snapshot.document_mut().set_visible(node, false);
                }
                self.distance_selection.clear();
                hide_distance_overlays(sink);
                return;
            }
            ClickOutcome::Warn => self.notify(sink, REMOVE_WARNING, WARN_TOAST_MS, now),
            ClickOutcome::Continue => {}
        }
        self.distance_selection.push(node);
        self.refresh_distance(sink);
    }

    /// Reports a scroll/touch-drag gesture over the snapshot.
    ///
    /// When scrolling is locked the gesture is consumed and a notice is
    /// requested (throttled by the notification gate).
    pub fn handle_scroll_gesture(
        &mut self,
        now: u64,
        sink: &mut dyn RenderSink,
    ) -> GestureDisposition {
        let locked = self
            .snapshot
            .as_ref()
            .is_some_and(|snapshot| !snapshot.scroll_allowed());
        if locked {
            self.notify(sink, SCROLL_DISABLED, SCROLL_TOAST_MS, now);
            GestureDisposition::Consumed
        } else {
            GestureDisposition::Allowed
        }
    }

    /// Runs every deferred step due at `now`.
    ///
    /// Steps are never cancelled by a clear or a selection change; each one
    /// re-checks the state it touches and no-ops when that state is gone.
    pub fn run_due(&mut self, now: u64, sink: &mut dyn RenderSink) {
        for action in self.scheduler.take_due(now) {
            match action {
                DeferredAction::RaiseSnapshot => {
                    if let Some(snapshot) = &mut self.snapshot {
                        snapshot.raise();
                    }
                }
                DeferredAction::PlacePanel => self.place_panel(sink),
            }
        }
    }

    /// Deselects everything and hides all overlays.
    ///
    /// Deferred steps stay queued; their liveness checks make them no-op if
    /// the state they targeted is gone by the time they fire.
    pub fn clear(&mut self, sink: &mut dyn RenderSink) {
        self.attribute_selection.clear();
        self.attribute_tracker.clear();
        self.distance_selection.clear();
        self.distance_tracker.clear();
        sink.hide_all();
    }

    /// Ends the activation: clears selection state, cancels deferred steps,
    /// drops the snapshot, and hides all overlays.
    ///
    /// Idempotent — a second call (or a call on a session that never saw a
    /// click) leaves the same end state.
    pub fn deactivate(&mut self, sink: &mut dyn RenderSink) {
        if self.snapshot.take().is_some() {
            debug!("session deactivated");
        }
        self.attribute_selection.clear();
        self.attribute_tracker.clear();
        self.distance_selection.clear();
        self.distance_tracker.clear();
        self.scheduler.clear();
        self.last_notify = None;
        sink.hide_all();
    }

    fn refresh_attribute(&mut self, now: u64, sink: &mut dyn RenderSink) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let Some(&node) = self.attribute_selection.get() else {
            sink.hide(OverlayKind::Cover);
            sink.hide(OverlayKind::Panel);
            return;
        };
        let Some(metrics) = snapshot.document().metrics(node) else {
            sink.hide(OverlayKind::Cover);
            sink.hide(OverlayKind::Panel);
            return;
        };

        let conv = resolve_conv(&self.attribute_cfg, self.viewport);
        sink.show(&cover_descriptor(
            OverlayKind::Cover,
            metrics,
            self.viewport,
            &conv,
            true,
        ));

        // Content first; the final position lands in a zero-delay deferred
        // step once the popup has settled into layout.
        sink.show(&OverlayDescriptor {
            kind: OverlayKind::Panel,
            rect: metrics.rect(),
            labels: format_attributes(snapshot.document(), node, &conv),
            placement: None,
        });
        self.scheduler.schedule(now, DeferredAction::PlacePanel);
    }

    fn place_panel(&self, sink: &mut dyn RenderSink) {
        // The selection may be gone or hidden by the time this fires.
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let Some(&node) = self.attribute_selection.get() else {
            return;
        };
        if snapshot.document().is_visible(node) != Some(true) {
            return;
        }
        let Some(metrics) = snapshot.document().metrics(node) else {
            return;
        };

        let conv = resolve_conv(&self.attribute_cfg, self.viewport);
        sink.show(&OverlayDescriptor {
            kind: OverlayKind::Panel,
            rect: metrics.rect(),
            labels: format_attributes(snapshot.document(), node, &conv),
            placement: Some(Placement::Panel(panel_placement(metrics, self.viewport))),
        });
    }

    fn refresh_distance(&mut self, sink: &mut dyn RenderSink) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let doc = snapshot.document();
        let conv = resolve_conv(&self.distance_cfg, self.viewport);
        let single = self.distance_selection.is_single();

        let compared = self
            .distance_selection
            .compared()
            .and_then(|&id| doc.metrics(id));
        let target = self
            .distance_selection
            .target()
            .and_then(|&id| doc.metrics(id));

        // Box sizes show in single display; the comparison display trades
        // them for measuring lines.
        match compared {
            Some(m) => sink.show(&cover_descriptor(
                OverlayKind::ComparedCover,
                m,
                self.viewport,
                &conv,
                single,
            )),
            None => sink.hide(OverlayKind::ComparedCover),
        }
        match target {
            Some(m) => {
                sink.show(&cover_descriptor(
                    OverlayKind::TargetCover,
                    m,
                    self.viewport,
                    &conv,
                    false,
                ));
                sink.show(&OverlayDescriptor::new(
                    OverlayKind::RulerVertical,
                    Rect::new(m.left(), 0.0, m.right(), self.viewport.height),
                ));
                sink.show(&OverlayDescriptor::new(
                    OverlayKind::RulerHorizontal,
                    Rect::new(0.0, m.top(), self.viewport.width, m.bottom()),
                ));
            }
            None => {
                sink.hide(OverlayKind::TargetCover);
                sink.hide(OverlayKind::RulerVertical);
                sink.hide(OverlayKind::RulerHorizontal);
            }
        }

        sink.hide(OverlayKind::GapLine);
        if let (Some(c), Some(t)) = (compared, target) {
            for segment in compute_gaps(c.rect(), t.rect()) {
                sink.show(&OverlayDescriptor {
                    kind: OverlayKind::GapLine,
                    rect: segment.line_rect(),
                    labels: vec![Label::new(
                        direction_name(segment.direction),
                        conv(segment.length),
                    )],
                    placement: None,
                });
            }
        }
    }

    fn notify(&mut self, sink: &mut dyn RenderSink, message: &str, duration: u64, now: u64) {
        if self
            .last_notify
            .is_some_and(|last| now <= last + NOTIFY_MIN_INTERVAL_MS)
        {
            return;
        }
        self.last_notify = Some(now);
        sink.notify(message, duration);
    }
}

fn hide_distance_overlays(sink: &mut dyn RenderSink) {
    sink.hide(OverlayKind::ComparedCover);
    sink.hide(OverlayKind::TargetCover);
    sink.hide(OverlayKind::RulerVertical);
    sink.hide(OverlayKind::RulerHorizontal);
    sink.hide(OverlayKind::GapLine);
}

fn resolve_conv(cfg: &ToolConfig, viewport: Viewport) -> impl Fn(f64) -> String + '_ {
    move |px| match &cfg.pixel {
        Some(pixel) => pixel(px),
        None => format_px(px, viewport.width, viewport.width),
    }
}

fn cover_descriptor(
    kind: OverlayKind,
    metrics: BoxMetrics,
    viewport: Viewport,
    convert: &dyn Fn(f64) -> String,
    with_size: bool,
) -> OverlayDescriptor {
    let mut labels = alloc::vec::Vec::new();
    if with_size {
        labels.push(Label::new("w", convert(metrics.width())));
        labels.push(Label::new("h", convert(metrics.height())));
    }

    // Keep the value labels readable near the viewport edges.
    let height_label = if viewport.width - COVER_SAFE_RIGHT_PX > metrics.width() + metrics.left()
    {
        LabelSideX::InsideRight
    } else {
        LabelSideX::OutsideLeft
    };
    let width_label = if metrics.top() > COVER_SAFE_TOP_PX {
        LabelSideY::Above
    } else {
        LabelSideY::BelowInside
    };

    OverlayDescriptor {
        kind,
        rect: metrics.rect(),
        labels,
        placement: Some(Placement::CoverValues(CoverValuePlacement {
            height_label,
            width_label,
        })),
    }
}

fn panel_placement(metrics: BoxMetrics, viewport: Viewport) -> PanelPlacement {
    let x = if metrics.left() < viewport.width / 2.0 {
        HorizontalAnchor::Left(metrics.left())
    } else {
        HorizontalAnchor::Right(viewport.width - metrics.left() - metrics.width())
    };
    let y = if metrics.bottom() + PANEL_SAFE_BOTTOM_PX < viewport.height {
        VerticalAnchor::Top(metrics.bottom() + PANEL_GAP_PX)
    } else {
        VerticalAnchor::Bottom(viewport.height - metrics.top() + PANEL_GAP_PX)
    };
    PanelPlacement { x, y }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "up",
        Direction::Down => "down",
        Direction::Left => "left",
        Direction::Right => "right",
    }
}
