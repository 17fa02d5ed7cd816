// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use super::tree_index::TreeIndex;
use crate::model::BranchId;

/// Where a node landed in the column grid, before any sizes are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub id: BranchId,
    pub depth: usize,
    pub column: usize,
    pub parent: Option<BranchId>,
    /// The node's sibling group in display order, captured for later reordering.
    pub siblings: Vec<BranchId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnAssignment {
    placements: Vec<Placement>,
    by_id: BTreeMap<BranchId, usize>,
    next_column: usize,
}

impl ColumnAssignment {
    /// Placements in placement order: rooted subtrees depth-first, then orphans.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn get(&self, id: &str) -> Option<&Placement> {
        self.by_id.get(id).map(|idx| &self.placements[*idx])
    }

    /// First column no placement uses.
    pub fn next_column(&self) -> usize {
        self.next_column
    }
}

/// Packs every known node into `(depth, column)` slots.
///
/// Each subtree claims a contiguous column range starting at the column its parent offers, the
/// first child sharing its parent's column. Nodes no root reaches (only possible through cycles)
/// are appended at depth 0, one column each.
pub fn assign_columns(index: &TreeIndex) -> ColumnAssignment {
    let mut assigner = ColumnAssigner {
        index,
        assignment: ColumnAssignment::default(),
        visited: BTreeSet::new(),
    };

    let mut next = 0;
    for root in index.roots() {
        next = assigner.place(root, 0, next, None);
    }

    for id in index.nodes() {
        if assigner.visited.contains(id) {
            continue;
        }
        tracing::debug!(branch = %id, column = next, "placing orphan branch");
        assigner.record(id, 0, next, index.parent_of(id.as_str()).cloned());
        next += 1;
    }

    assigner.assignment.next_column = next;
    assigner.assignment
}

struct ColumnAssigner<'a> {
    index: &'a TreeIndex,
    assignment: ColumnAssignment,
    visited: BTreeSet<BranchId>,
}

impl ColumnAssigner<'_> {
    fn place(
        &mut self,
        id: &BranchId,
        depth: usize,
        min_column: usize,
        parent: Option<&BranchId>,
    ) -> usize {
        if self.visited.contains(id) {
            return min_column;
        }
        self.record(id, depth, min_column, parent.cloned());

        let index = self.index;
        let mut next = min_column;
        for child in index.children_of(id.as_str()) {
            next = self.place(child, depth + 1, next, Some(id));
        }

        next.max(min_column + 1)
    }

    fn record(&mut self, id: &BranchId, depth: usize, column: usize, parent: Option<BranchId>) {
        self.visited.insert(id.clone());

        let siblings = if *id == *self.index.default_branch() && parent.is_none() {
            Vec::new()
        } else {
            self.index.sibling_group(id.as_str()).1
        };

        self.assignment.by_id.insert(id.clone(), self.assignment.placements.len());
        self.assignment.placements.push(Placement {
            id: id.clone(),
            depth,
            column,
            parent,
            siblings,
        });
    }
}
