// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot construction: deep clone plus lockstep visual alignment.

use alloc::string::String;
use calipers_document::{Document, ElementData, InlineHandler, NodeId, Scroll};
use log::debug;

use crate::align::{AlignOutcome, AlignReport, SkipReason};

/// Class-name prefix reserved for elements injected by the engine.
///
/// Rendering sinks attach this prefix to everything they add to the live
/// page; the clone pass drops such elements so a snapshot never contains
/// inspection artifacts of the engine itself.
pub const RESERVED_CLASS_PREFIX: &str = "calipers-";

/// Style properties copied live → clone during alignment. These are the
/// layout-affecting properties a markup-level clone loses.
const ALIGNED_STYLE_PROPS: [&str; 4] = ["margin", "padding", "border", "font-size"];

/// Stacking priority applied to the container when the snapshot is raised.
const RAISED_Z_INDEX: &str = "5000";

/// Options for [`Snapshot::build`].
///
/// Scrolling defaults to locked: scroll gestures over the copy are consumed
/// and answered with a notice unless `allow_scroll` is set.
#[derive(Copy, Clone, Debug, Default)]
pub struct SnapshotOptions {
    /// Whether the operator may scroll the snapshot.
    pub allow_scroll: bool,
}

/// An inert deep copy of a live document subtree.
///
/// The snapshot exclusively owns its [`Document`]; the live page is never
/// mutated by the engine, and live nodes never alias snapshot nodes.
#[derive(Clone, Debug)]
pub struct Snapshot {
    doc: Document,
    root: NodeId,
    raised: bool,
    scroll_allowed: bool,
    report: AlignReport,
}

impl Snapshot {
    /// Clones the live subtree at `root` and aligns the copy's visual state.
    ///
    /// Cloning never fails; per-node alignment mismatches are recorded in
    /// the report and logged, since partial fidelity beats aborting the
    /// inspection session.
    pub fn build(live: &Document, root: NodeId, options: &SnapshotOptions) -> Self {
        let mut doc = Document::new();

        // Style-isolated container covering the page; overlays and clicks
        // land here instead of on the live document.
        let container = doc.insert(
            None,
            ElementData {
                classes: String::from("calipers-root"),
                style: calipers_document::ComputedStyle::new()
                    .with("position", "absolute")
                    .with("left", "0px")
                    .with("top", "0px")
                    .with("width", "100%"),
                ..ElementData::new("div")
            },
        );

        let cloned_root = clone_subtree(live, root, &mut doc, container);

        let mut report = AlignReport::default();
        if let Some(cloned_root) = cloned_root {
            align_subtree(live, root, &mut doc, cloned_root, &mut report);
        }

        Self {
            doc,
            root: container,
            raised: false,
            scroll_allowed: options.allow_scroll,
            report,
        }
    }

    /// The snapshot's own document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable access to the snapshot's document (hiding nodes, host-driven
    /// layout updates on the copy).
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// The isolation container's id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The cloned subtree root (first content child of the container), if
    /// the cloned subtree was not empty.
    pub fn content_root(&self) -> Option<NodeId> {
        self.doc.children_of(self.root).first().copied()
    }

    /// Whether the operator may scroll the copy.
    pub fn scroll_allowed(&self) -> bool {
        self.scroll_allowed
    }

    /// Raises the snapshot's stacking priority above the live page.
    ///
    /// Deferred by the session after construction; calling it again (or on a
    /// snapshot about to be dropped) is harmless.
    pub fn raise(&mut self) {
        if self.raised {
            return;
        }
        if let Some(data) = self.doc.data_mut(self.root) {
            data.style.set("z-index", RAISED_Z_INDEX);
        }
        self.raised = true;
    }

    /// Whether [`Snapshot::raise`] has run.
    pub fn is_raised(&self) -> bool {
        self.raised
    }

    /// The alignment report recorded during construction.
    pub fn align_report(&self) -> &AlignReport {
        &self.report
    }
}

/// Whether any class token carries the engine's reserved prefix.
fn has_reserved_class(classes: &str) -> bool {
    classes
        .split_whitespace()
        .any(|token| token.starts_with(RESERVED_CLASS_PREFIX))
}

/// Deep-copies `live_id` under `parent` in the clone document, dropping
/// engine-injected elements. Returns the clone's id, or `None` if the
/// element itself was reserved.
fn clone_subtree(
    live: &Document,
    live_id: NodeId,
    doc: &mut Document,
    parent: NodeId,
) -> Option<NodeId> {
    let data = live.data(live_id)?;
    if has_reserved_class(&data.classes) {
        return None;
    }

    // A markup-level clone does not carry scroll positions; alignment
    // restores them afterwards.
    let cloned = doc.insert(
        Some(parent),
        ElementData {
            scroll: Scroll::default(),
            ..data.clone()
        },
    );

    for &child in live.children_of(live_id) {
        clone_subtree(live, child, doc, cloned);
    }
    Some(cloned)
}

/// Walks clone and live tree in lockstep, aligning each paired node.
fn align_subtree(
    live: &Document,
    live_id: NodeId,
    doc: &mut Document,
    clone_id: NodeId,
    report: &mut AlignReport,
) {
    let Some(live_data) = live.data(live_id) else {
        return;
    };

    if let Some(clone_data) = doc.data_mut(clone_id) {
        // Scroll offsets: copy, and lock the scrolled axis so the inert copy
        // cannot drift away from the live view.
        if live_data.scroll.y != 0.0 {
            clone_data.scroll.y = live_data.scroll.y;
            clone_data.style.set("overflow-y", "hidden");
        }
        if live_data.scroll.x != 0.0 {
            clone_data.scroll.x = live_data.scroll.x;
            clone_data.style.set("overflow-x", "hidden");
        }

        // Inline click handlers must not fire a second time from the copy.
        if clone_data.on_click.is_some() {
            clone_data.on_click = Some(InlineHandler::Inert);
        }

        let outcome = if live_data.tag == "script" {
            AlignOutcome::Skipped(SkipReason::Script)
        } else if clone_data.tag == live_data.tag && clone_data.classes == live_data.classes {
            for prop in ALIGNED_STYLE_PROPS {
                if let Some(value) = live_data.style.get(prop) {
                    let value = String::from(value);
                    clone_data.style.set(prop, value);
                }
            }
            AlignOutcome::Aligned
        } else {
            AlignOutcome::Skipped(SkipReason::IdentityMismatch)
        };
        if let AlignOutcome::Skipped(reason) = outcome {
            debug!(
                "alignment skipped for <{}> pair: {reason:?}",
                live_data.tag
            );
        }
        report.record(clone_id, outcome);
    }

    let live_children: alloc::vec::Vec<NodeId> = live.children_of(live_id).to_vec();
    let clone_children: alloc::vec::Vec<NodeId> = doc.children_of(clone_id).to_vec();

    let paired = live_children.len().min(clone_children.len());
    for idx in 0..paired {
        align_subtree(live, live_children[idx], doc, clone_children[idx], report);
    }
    let unmatched = live_children.len().max(clone_children.len()) - paired;
    if unmatched > 0 {
        debug!("alignment skipped {unmatched} unmatched subtree(s)");
        report.record_unmatched(unmatched);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    fn live_page() -> (Document, NodeId) {
        let mut doc = Document::new();
        let html = doc.insert(None, ElementData::new("html"));
        let body = doc.insert(
            Some(html),
            ElementData {
                bounds: Rect::new(0.0, 0.0, 375.0, 800.0),
                ..ElementData::new("body")
            },
        );
        doc.insert(
            Some(body),
            ElementData {
                text: String::from("hello"),
                ..ElementData::new("p")
            },
        );
        (doc, html)
    }

    #[test]
    fn clone_preserves_shape_and_tags() {
        let (live, root) = live_page();
        let snapshot = Snapshot::build(&live, root, &SnapshotOptions::default());
        let doc = snapshot.document();

        // Container plus the three cloned elements.
        assert_eq!(doc.len(), live.len() + 1);

        let html = snapshot.content_root().unwrap();
        assert_eq!(doc.data(html).unwrap().tag, "html");
        let body = doc.children_of(html)[0];
        assert_eq!(doc.data(body).unwrap().tag, "body");
        assert_eq!(doc.data(body).unwrap().bounds.width(), 375.0);
        let p = doc.children_of(body)[0];
        assert_eq!(doc.data(p).unwrap().text, "hello");
    }

    #[test]
    fn clone_nodes_do_not_alias_live_nodes() {
        let (mut live, root) = live_page();
        let snapshot = Snapshot::build(&live, root, &SnapshotOptions::default());
        let html = snapshot.content_root().unwrap();

        // Mutating the live page afterwards must not reach the copy.
        live.set_bounds(root, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_ne!(
            snapshot.document().data(html).unwrap().bounds,
            live.data(root).unwrap().bounds
        );
    }

    #[test]
    fn reserved_elements_are_dropped() {
        let (mut live, root) = live_page();
        let body = live.children_of(root)[0];
        live.insert(
            Some(body),
            ElementData {
                classes: String::from("calipers-cover"),
                ..ElementData::new("div")
            },
        );

        let snapshot = Snapshot::build(&live, root, &SnapshotOptions::default());
        let doc = snapshot.document();
        let html = snapshot.content_root().unwrap();
        let cloned_body = doc.children_of(html)[0];
        // Only the <p> survives under body; the overlay artifact is gone.
        assert_eq!(doc.children_of(cloned_body).len(), 1);
        assert_eq!(
            doc.data(doc.children_of(cloned_body)[0]).unwrap().tag,
            "p"
        );
    }

    #[test]
    fn scroll_offsets_copied_and_axis_locked() {
        let (mut live, root) = live_page();
        let body = live.children_of(root)[0];
        live.set_scroll(body, 0.0, 120.0);

        let snapshot = Snapshot::build(&live, root, &SnapshotOptions::default());
        let doc = snapshot.document();
        let html = snapshot.content_root().unwrap();
        let cloned_body = doc.children_of(html)[0];
        let data = doc.data(cloned_body).unwrap();
        assert_eq!(data.scroll.y, 120.0);
        assert_eq!(data.style.get("overflow-y"), Some("hidden"));
        // The unscrolled axis stays unlocked.
        assert_eq!(data.scroll.x, 0.0);
        assert!(data.style.get("overflow-x").is_none());
    }

    #[test]
    fn inline_click_handlers_are_neutralized() {
        let (mut live, root) = live_page();
        let body = live.children_of(root)[0];
        let button = live.insert(
            Some(body),
            ElementData {
                on_click: Some(InlineHandler::Script(String::from("buy()"))),
                ..ElementData::new("button")
            },
        );
        live.insert(Some(body), ElementData::new("div"));

        let snapshot = Snapshot::build(&live, root, &SnapshotOptions::default());
        let doc = snapshot.document();
        let html = snapshot.content_root().unwrap();
        let cloned_body = doc.children_of(html)[0];
        let children = doc.children_of(cloned_body);
        // children: p, button, div — same order as the live body.
        let cloned_button = children[1];
        let cloned_plain = children[2];
        assert_eq!(
            doc.data(cloned_button).unwrap().on_click,
            Some(InlineHandler::Inert)
        );
        assert_eq!(doc.data(cloned_plain).unwrap().on_click, None);
        // The live handler is untouched.
        assert_eq!(
            live.data(button).unwrap().on_click,
            Some(InlineHandler::Script(String::from("buy()")))
        );
    }

    #[test]
    fn layout_styles_copied_on_identity_match() {
        let (mut live, root) = live_page();
        let body = live.children_of(root)[0];
        let p = live.children_of(body)[0];
        if let Some(data) = live.data_mut(p) {
            data.style.set("margin", "8px");
            data.style.set("font-size", "16px");
            data.style.set("color", "red");
        }

        let snapshot = Snapshot::build(&live, root, &SnapshotOptions::default());
        let doc = snapshot.document();
        let html = snapshot.content_root().unwrap();
        let cloned_body = doc.children_of(html)[0];
        let cloned_p = doc.children_of(cloned_body)[0];
        let style = &doc.data(cloned_p).unwrap().style;
        assert_eq!(style.get("margin"), Some("8px"));
        assert_eq!(style.get("font-size"), Some("16px"));
        assert_eq!(
            snapshot.align_report().outcome_of(cloned_p),
            Some(AlignOutcome::Aligned)
        );
    }

    #[test]
    fn script_elements_skip_style_alignment() {
        let (mut live, root) = live_page();
        let body = live.children_of(root)[0];
        live.insert(Some(body), ElementData::new("script"));

        let snapshot = Snapshot::build(&live, root, &SnapshotOptions::default());
        let doc = snapshot.document();
        let html = snapshot.content_root().unwrap();
        let cloned_body = doc.children_of(html)[0];
        let cloned_script = doc.children_of(cloned_body)[1];
        assert_eq!(
            snapshot.align_report().outcome_of(cloned_script),
            Some(AlignOutcome::Skipped(SkipReason::Script))
        );
    }

    #[test]
    fn fully_matched_tree_reports_full_alignment() {
        let (live, root) = live_page();
        let snapshot = Snapshot::build(&live, root, &SnapshotOptions::default());
        let report = snapshot.align_report();
        assert!(report.is_fully_aligned());
        assert_eq!(report.entries().len(), live.len());
        assert_eq!(report.unmatched_subtrees(), 0);
    }

    #[test]
    fn reserved_stripping_shifts_pairing_and_is_reported() {
        // A reserved element in the middle of the live child list has no
        // clone partner; index pairing shifts and the heuristic identity
        // check flags the mispaired node instead of copying wrong styles.
        let (mut live, root) = live_page();
        let body = live.children_of(root)[0];
        // Rebuild body's children: [reserved div, span].
        let p = live.children_of(body)[0];
        live.remove(p);
        live.insert(
            Some(body),
            ElementData {
                classes: String::from("calipers-panel"),
                ..ElementData::new("div")
            },
        );
        live.insert(Some(body), ElementData::new("span"));

        let snapshot = Snapshot::build(&live, root, &SnapshotOptions::default());
        let report = snapshot.align_report();
        assert!(!report.is_fully_aligned());
        // live [reserved, span] vs clone [span]: one pair mismatches, one
        // live subtree goes unmatched.
        assert_eq!(report.unmatched_subtrees(), 1);
        let doc = snapshot.document();
        let html = snapshot.content_root().unwrap();
        let cloned_body = doc.children_of(html)[0];
        let cloned_span = doc.children_of(cloned_body)[0];
        assert_eq!(
            report.outcome_of(cloned_span),
            Some(AlignOutcome::Skipped(SkipReason::IdentityMismatch))
        );
    }

    #[test]
    fn raise_is_idempotent_and_deferred_by_callers() {
        let (live, root) = live_page();
        let mut snapshot = Snapshot::build(&live, root, &SnapshotOptions::default());
        assert!(!snapshot.is_raised());
        let container = snapshot.root();
        assert!(
            snapshot
                .document()
                .data(container)
                .unwrap()
                .style
                .get("z-index")
                .is_none()
        );

        snapshot.raise();
        snapshot.raise();
        assert!(snapshot.is_raised());
        assert_eq!(
            snapshot
                .document()
                .data(container)
                .unwrap()
                .style
                .get("z-index"),
            Some("5000")
        );
    }

    #[test]
    fn scroll_option_is_carried() {
        let (live, root) = live_page();
        let locked = Snapshot::build(&live, root, &SnapshotOptions::default());
        assert!(!locked.scroll_allowed());
        let free = Snapshot::build(&live, root, &SnapshotOptions { allow_scroll: true });
        assert!(free.scroll_allowed());
    }

    #[test]
    fn container_is_style_isolated() {
        let (live, root) = live_page();
        let snapshot = Snapshot::build(&live, root, &SnapshotOptions::default());
        let data = snapshot.document().data(snapshot.root()).unwrap();
        assert!(has_reserved_class(&data.classes));
        assert_eq!(data.style.get("position"), Some("absolute"));
        assert_eq!(data.style.get("width"), Some("100%"));
    }

    #[test]
    fn reserved_class_detection_checks_tokens() {
        assert!(has_reserved_class("calipers-cover"));
        assert!(has_reserved_class("card calipers-panel"));
        assert!(!has_reserved_class("card panel"));
        assert!(!has_reserved_class("my-calipers-like"));
        assert!(!has_reserved_class(""));
    }
}
