// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node alignment outcomes recorded by the snapshot build.

use alloc::vec::Vec;
use calipers_document::NodeId;

/// Why style alignment was skipped for a paired node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Script elements never receive style alignment.
    Script,
    /// Tag or class identity of the pair did not match; the same-identity
    /// check is heuristic, so mispaired nodes land here instead of getting
    /// the wrong styles copied onto them.
    IdentityMismatch,
}

/// Result of aligning one clone node against its live counterpart.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AlignOutcome {
    /// Layout-affecting style properties were copied from the live node.
    Aligned,
    /// Alignment was skipped; the node keeps its cloned state.
    Skipped(SkipReason),
}

/// Summary of the alignment pass over a whole snapshot.
///
/// Entries are keyed by clone-document node ids in visit order. Subtrees on
/// the live side with no clone partner (shape divergence, usually from
/// reserved-prefix stripping) have no per-node entry and are counted in
/// [`AlignReport::unmatched_subtrees`].
#[derive(Clone, Debug, Default)]
pub struct AlignReport {
    entries: Vec<(NodeId, AlignOutcome)>,
    unmatched_subtrees: usize,
}

impl AlignReport {
    pub(crate) fn record(&mut self, id: NodeId, outcome: AlignOutcome) {
        self.entries.push((id, outcome));
    }

    pub(crate) fn record_unmatched(&mut self, count: usize) {
        self.unmatched_subtrees += count;
    }

    /// All per-node outcomes, in visit order.
    pub fn entries(&self) -> &[(NodeId, AlignOutcome)] {
        &self.entries
    }

    /// The outcome recorded for a specific clone node, if it was visited.
    pub fn outcome_of(&self, id: NodeId) -> Option<AlignOutcome> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, outcome)| *outcome)
    }

    /// Number of nodes that received style alignment.
    pub fn aligned_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, o)| matches!(o, AlignOutcome::Aligned))
            .count()
    }

    /// Number of visited nodes that were skipped.
    pub fn skipped_count(&self) -> usize {
        self.entries.len() - self.aligned_count()
    }

    /// Number of live subtrees with no clone partner.
    pub fn unmatched_subtrees(&self) -> usize {
        self.unmatched_subtrees
    }

    /// Whether every visited node aligned and no subtree went unmatched.
    pub fn is_fully_aligned(&self) -> bool {
        self.skipped_count() == 0 && self.unmatched_subtrees == 0
    }
}
