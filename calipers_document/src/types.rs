// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document tree: node identifiers, flags, and element data.

use alloc::string::String;
use hashbrown::HashMap;
use kurbo::Rect;

/// Identifier for an element in the document (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Element is visible. Hiding an element clears this flag only; the
        /// element stays in the tree so neighboring layout is unaffected.
        const VISIBLE  = 0b0000_0001;
        /// Element participates in click targeting.
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Scroll offsets of an element's content, in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Scroll {
    /// Horizontal scroll offset (`scrollLeft`).
    pub x: f64,
    /// Vertical scroll offset (`scrollTop`).
    pub y: f64,
}

/// An inline click handler carried on an element.
///
/// Live documents report handler source text; the snapshot builder replaces
/// it with [`InlineHandler::Inert`] so the cloned page cannot re-trigger the
/// original side effects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InlineHandler {
    /// Handler source as found on the live element.
    Script(String),
    /// A neutralized handler that does nothing when invoked.
    Inert,
}

/// Snapshot of an element's computed style, as property-name → value text.
///
/// Values use the host's computed representation (`"16px"`, `"none"`,
/// `"rgb(255, 255, 255)"`), matching what a style query against the live
/// page returns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComputedStyle {
    props: HashMap<String, String>,
}

impl ComputedStyle {
    /// Creates an empty style snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a property, if present.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.props.get(property).map(String::as_str)
    }

    /// Sets a property value, replacing any previous one.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.props.insert(property.into(), value.into());
    }

    /// Builder-style [`ComputedStyle::set`].
    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Number of properties captured in this snapshot.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Whether the snapshot captures no properties.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

/// Per-element data stored in a [`Document`](crate::Document).
#[derive(Clone, Debug, PartialEq)]
pub struct ElementData {
    /// Lowercase tag name (`"div"`, `"img"`, `"script"`, …).
    pub tag: String,
    /// The `class` attribute text, as written on the element.
    pub classes: String,
    /// Text content of the element (own text, not descendants').
    pub text: String,
    /// Computed style snapshot.
    pub style: ComputedStyle,
    /// Current scroll offsets of the element's content.
    pub scroll: Scroll,
    /// Inline click handler, if the element carries one.
    pub on_click: Option<InlineHandler>,
    /// Current layout bounds in page coordinates. Host-maintained; metrics
    /// queries reflect whatever was last pushed here.
    pub bounds: Rect,
    /// Visibility and picking flags.
    pub flags: NodeFlags,
}

impl ElementData {
    /// Creates element data for a tag with otherwise default fields.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }
}

impl Default for ElementData {
    fn default() -> Self {
        Self {
            tag: String::from("div"),
            classes: String::new(),
            text: String::new(),
            style: ComputedStyle::default(),
            scroll: Scroll::default(),
            on_click: None,
            bounds: Rect::ZERO,
            flags: NodeFlags::default(),
        }
    }
}

/// Classification of an element, selecting which attribute set the inspector
/// shows for it.
///
/// The mapping from kind to concrete style properties lives in the overlay
/// layer; this crate only decides the kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// No element children and non-whitespace text content.
    Text,
    /// An `img`/`image` tag, or any element with a background image.
    Image,
    /// Everything else; shares the image attribute set.
    Generic,
}
