// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end walkthrough: build a small page, activate a session, and
//! replay the clicks an operator would make with both tools.
//!
//! Run with `RUST_LOG=debug` to see the snapshot alignment trace.

use calipers_document::{ComputedStyle, Document, ElementData, InlineHandler, NodeId};
use calipers_overlay::{
    OverlayDescriptor, OverlayKind, RenderSink, Session, SessionOptions, Viewport,
};
use kurbo::Rect;

/// A sink that narrates what a real renderer would paint.
#[derive(Default)]
struct PrintSink;

impl RenderSink for PrintSink {
    fn show(&mut self, overlay: &OverlayDescriptor) {
        print!("show {:?} at {:?}", overlay.kind, overlay.rect);
        for label in &overlay.labels {
            print!("  [{}: {}]", label.text, label.value);
        }
        if let Some(placement) = &overlay.placement {
            print!("  ({placement:?})");
        }
        println!();
    }

    fn hide(&mut self, kind: OverlayKind) {
        println!("hide {kind:?}");
    }

    fn hide_all(&mut self) {
        println!("hide everything");
    }

    fn notify(&mut self, message: &str, duration_ms: u64) {
        println!("toast ({duration_ms}ms): {message}");
    }
}

fn build_page() -> (Document, NodeId) {
    let mut doc = Document::new();
    let html = doc.insert(
        None,
        ElementData {
            bounds: Rect::new(0.0, 0.0, 375.0, 667.0),
            ..ElementData::new("html")
        },
    );
    let body = doc.insert(
        Some(html),
        ElementData {
            bounds: Rect::new(0.0, 0.0, 375.0, 667.0),
            scroll: calipers_document::Scroll { x: 0.0, y: 40.0 },
            ..ElementData::new("body")
        },
    );
    doc.insert(
        Some(body),
        ElementData {
            text: String::from("Product title"),
            bounds: Rect::new(10.0, 100.0, 60.0, 120.0),
            style: ComputedStyle::new()
                .with("font-family", "sans-serif")
                .with("font-size", "14px")
                .with("color", "rgb(34, 34, 34)"),
            ..ElementData::new("h1")
        },
    );
    doc.insert(
        Some(body),
        ElementData {
            bounds: Rect::new(10.0, 200.0, 60.0, 220.0),
            style: ComputedStyle::new()
                .with("border-radius", "4px")
                .with("border-width", "1px")
                .with("border-style", "solid")
                .with("border-color", "rgba(0, 0, 0, 0.5)")
                .with("background-color", "rgb(240, 240, 240)"),
            ..ElementData::new("img")
        },
    );
    doc.insert(
        Some(body),
        ElementData {
            on_click: Some(InlineHandler::Script(String::from("trackClick()"))),
            bounds: Rect::new(10.0, 300.0, 120.0, 340.0),
            ..ElementData::new("button")
        },
    );
    // A leftover overlay from an earlier activation; the snapshot drops it.
    doc.insert(
        Some(body),
        ElementData {
            classes: String::from("calipers-cover"),
            ..ElementData::new("div")
        },
    );
    (doc, html)
}

fn main() {
    env_logger::init();

    let (live, root) = build_page();
    let mut sink = PrintSink;

    let mut session = Session::activate(
        &live,
        root,
        SessionOptions {
            viewport: Viewport {
                width: 375.0,
                height: 667.0,
            },
            ..SessionOptions::default()
        },
        0,
    );
    let snapshot = session.snapshot().expect("freshly activated");
    println!(
        "snapshot: {} nodes, {} aligned, {} skipped",
        snapshot.document().len(),
        snapshot.align_report().aligned_count(),
        snapshot.align_report().skipped_count()
    );

    // The host's hit test resolved these clicks against the snapshot.
    let doc = snapshot.document();
    let body = doc.children_of(snapshot.content_root().expect("cloned root"))[0];
    let title = doc.children_of(body)[0];
    let image = doc.children_of(body)[1];

    println!("\n-- attribute tool: click the title --");
    session.handle_attribute_click(title, 100, &mut sink);
    session.run_due(100, &mut sink); // panel placement settles

    println!("\n-- distance tool: title vs image --");
    session.handle_distance_click(title, 2_000, &mut sink);
    session.handle_distance_click(image, 3_000, &mut sink);

    println!("\n-- scroll attempt over the locked snapshot --");
    session.handle_scroll_gesture(4_000, &mut sink);

    println!("\n-- raise fires late, deactivation wins --");
    session.run_due(5_000, &mut sink);
    session.deactivate(&mut sink);
    session.deactivate(&mut sink); // idempotent
}
