// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core arena implementation: structure, updates, queries.

use alloc::vec::Vec;
use kurbo::Rect;

use crate::metrics::BoxMetrics;
use crate::types::{ElementData, NodeFlags, NodeId, NodeKind};

/// An in-memory document tree.
///
/// Elements live in slots with per-slot generations, so a [`NodeId`] held
/// across a removal becomes stale rather than silently pointing at a reused
/// slot. Every accessor returns `None` (or an empty slice) for stale ids.
///
/// ## Example
///
/// ```rust
/// use calipers_document::{Document, ElementData};
/// use kurbo::Rect;
///
/// let mut doc = Document::new();
/// let body = doc.insert(None, ElementData::new("body"));
/// let p = doc.insert(
///     Some(body),
///     ElementData {
///         bounds: Rect::new(10.0, 10.0, 110.0, 30.0),
///         ..ElementData::new("p")
///     },
/// );
///
/// let m = doc.metrics(p).unwrap();
/// assert_eq!(m.width(), 100.0);
/// assert_eq!(m.bottom(), 30.0);
/// ```
#[derive(Clone, Default)]
pub struct Document {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: ElementData,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new element as a child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<NodeId>, data: ElementData) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node {
                generation,
                parent: None,
                children: Vec::new(),
                data,
            });
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node {
                generation,
                parent: None,
                children: Vec::new(),
                data,
            }));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent {
            if let Some(parent_node) = self.node_opt_mut(p) {
                parent_node.children.push(id);
                self.node_opt_mut(id)
                    .expect("freshly inserted node is live")
                    .parent = Some(p);
            }
        }
        id
    }

    /// Removes an element and its subtree. Stale ids are ignored.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.parent_of(id)
            && let Some(p) = self.node_opt_mut(parent)
        {
            p.children.retain(|c| *c != id);
        }
        let children = self
            .node_opt(id)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Returns true if `id` refers to a live element.
    ///
    /// An id is live if its slot exists and its generation matches the
    /// current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Returns the parent of a live element, or `None` for roots and stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Returns the children of an element, or an empty slice for stale ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Borrows an element's data, if the id is live.
    pub fn data(&self, id: NodeId) -> Option<&ElementData> {
        self.node_opt(id).map(|n| &n.data)
    }

    /// Mutably borrows an element's data, if the id is live.
    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.node_opt_mut(id).map(|n| &mut n.data)
    }

    /// Updates an element's layout bounds. Subsequent [`Document::metrics`]
    /// queries reflect the new value immediately.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.bounds = bounds;
        }
    }

    /// Updates an element's scroll offsets.
    pub fn set_scroll(&mut self, id: NodeId, x: f64, y: f64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.scroll.x = x;
            n.data.scroll.y = y;
        }
    }

    /// Sets or clears the visible flag. Hidden elements stay in the tree so
    /// neighboring layout does not shift.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.flags.set(NodeFlags::VISIBLE, visible);
        }
    }

    /// Whether a live element is visible.
    pub fn is_visible(&self, id: NodeId) -> Option<bool> {
        self.node_opt(id)
            .map(|n| n.data.flags.contains(NodeFlags::VISIBLE))
    }

    /// Derives the box metrics of a live element from its *current* bounds.
    ///
    /// The result is computed fresh on every call and must not be cached by
    /// callers across layout-affecting mutations.
    pub fn metrics(&self, id: NodeId) -> Option<BoxMetrics> {
        self.node_opt(id).map(|n| BoxMetrics::from_rect(n.data.bounds))
    }

    /// Classifies a live element for attribute display.
    ///
    /// Image-bearing wins over text-bearing when both apply, matching the
    /// inspector's attribute-set precedence.
    pub fn classify(&self, id: NodeId) -> Option<NodeKind> {
        let node = self.node_opt(id)?;
        let data = &node.data;
        let is_image = matches!(data.tag.as_str(), "img" | "image")
            || data
                .style
                .get("background-image")
                .is_some_and(|v| v != "none");
        if is_image {
            return Some(NodeKind::Image);
        }
        let is_text =
            node.children.is_empty() && data.text.chars().any(|c| !c.is_whitespace());
        if is_text {
            return Some(NodeKind::Text);
        }
        Some(NodeKind::Generic)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether the document holds no live elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        (n.generation == id.1).then_some(n)
    }
}
