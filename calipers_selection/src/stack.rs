// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection containers: a single replace-on-click slot and the capacity-2
//! comparison stack.

use smallvec::SmallVec;

/// Single-slot selection for the attribute tool.
///
/// Each click simply replaces the current selection; there is no history
/// beyond "last clicked".
#[derive(Clone, Debug, Default)]
pub struct SelectionSlot<K> {
    current: Option<K>,
}

impl<K> SelectionSlot<K> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Replaces the selection with `node`.
    pub fn replace(&mut self, node: K) {
        self.current = Some(node);
    }

    /// The current selection, if any.
    pub fn get(&self) -> Option<&K> {
        self.current.as_ref()
    }

    /// Empties the slot.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

/// Ordered pair of selected elements for the distance tool.
///
/// Insertion order is meaningful: the first entry is the "compared" box, the
/// second the "target" box. Pushing keeps the stack at ≤ 2 entries with
/// sliding-window eviction, and re-clicking the already-selected last entry
/// collapses a full pair down to that entry so the operator can restart a
/// comparison in place.
#[derive(Clone, Debug, Default)]
pub struct SelectionStack<K> {
    entries: SmallVec<[K; 2]>,
}

impl<K: PartialEq> SelectionStack<K> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Pushes a clicked element, applying the toggle/evict rules.
    pub fn push(&mut self, node: K) {
        let is_same_click = self.entries.last().is_some_and(|last| *last == node);

        if !is_same_click {
            self.entries.push(node);
        }

        // Re-clicking the second of a pair restarts the comparison: [A, B]
        // clicked on B collapses to [B].
        if is_same_click && self.entries.len() == 2 {
            self.entries.remove(0);
        }
        if self.entries.len() == 3 {
            self.entries.remove(0);
        }
    }

    /// The "compared" element (first selected), if any.
    pub fn compared(&self) -> Option<&K> {
        self.entries.first()
    }

    /// The "target" element (second selected), if any.
    pub fn target(&self) -> Option<&K> {
        self.entries.get(1)
    }

    /// Current entries in selection order.
    pub fn entries(&self) -> &[K] {
        &self.entries
    }

    /// Number of selected elements (0, 1, or 2).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exactly one element selected: show single-box metrics.
    pub fn is_single(&self) -> bool {
        self.entries.len() == 1
    }

    /// Two elements selected: show the comparison overlays.
    pub fn is_comparison(&self) -> bool {
        self.entries.len() > 1
    }

    /// Empties the stack.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_replaces_on_every_click() {
        let mut slot: SelectionSlot<u32> = SelectionSlot::new();
        assert!(slot.get().is_none());
        slot.replace(1);
        assert_eq!(slot.get(), Some(&1));
        slot.replace(2);
        assert_eq!(slot.get(), Some(&2));
        slot.clear();
        assert!(slot.get().is_none());
    }

    #[test]
    fn push_orders_compared_then_target() {
        let mut stack: SelectionStack<u32> = SelectionStack::new();
        stack.push(1);
        assert!(stack.is_single());
        assert_eq!(stack.compared(), Some(&1));
        assert!(stack.target().is_none());

        stack.push(2);
        assert!(stack.is_comparison());
        assert_eq!(stack.compared(), Some(&1));
        assert_eq!(stack.target(), Some(&2));
    }

    #[test]
    fn same_click_collapses_pair() {
        let mut stack: SelectionStack<u32> = SelectionStack::new();
        stack.push(1);
        stack.push(2);
        stack.push(2);
        assert_eq!(stack.entries(), &[2]);
        assert!(stack.is_single());
    }

    #[test]
    fn third_element_evicts_oldest() {
        let mut stack: SelectionStack<u32> = SelectionStack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.entries(), &[2, 3]);
    }

    #[test]
    fn same_click_on_single_is_a_no_op() {
        let mut stack: SelectionStack<u32> = SelectionStack::new();
        stack.push(1);
        stack.push(1);
        assert_eq!(stack.entries(), &[1]);
    }

    #[test]
    fn length_is_always_bounded() {
        let mut stack: SelectionStack<u32> = SelectionStack::new();
        for n in [1_u32, 1, 2, 3, 3, 4, 5, 5, 5, 6] {
            stack.push(n);
            assert!(stack.len() <= 2, "stack exceeded its bound");
        }
    }

    #[test]
    fn collapse_then_push_forms_new_pair() {
        let mut stack: SelectionStack<u32> = SelectionStack::new();
        stack.push(1);
        stack.push(2);
        stack.push(2); // collapse to [2]
        stack.push(3);
        assert_eq!(stack.entries(), &[2, 3]);
        assert_eq!(stack.compared(), Some(&2));
        assert_eq!(stack.target(), Some(&3));
    }

    #[test]
    fn clear_empties_selection() {
        let mut stack: SelectionStack<u32> = SelectionStack::new();
        stack.push(1);
        stack.push(2);
        stack.clear();
        assert!(stack.is_empty());
        assert!(!stack.is_single());
        assert!(!stack.is_comparison());
    }
}
