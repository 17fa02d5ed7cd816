// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use smallvec::SmallVec;
use thiserror::Error;

use crate::model::{BranchId, Forest, SiblingKey};

pub(crate) type Siblings = SmallVec<[BranchId; 4]>;

/// How much the indexer trusts the edge list to describe a forest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Reject parent cycles and children with more than one parent.
    #[default]
    Strict,
    /// Keep the first parent edge and let the visited guard skip re-placement. Cyclic portions
    /// end up as depth-0 orphans.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("branch graph contains a cycle involving: {}", join_ids(.nodes))]
    CycleDetected { nodes: Vec<BranchId> },
    #[error("branch {child} has more than one parent: {}", join_ids(.parents))]
    MultipleParents { child: BranchId, parents: Vec<BranchId> },
}

fn join_ids(ids: &[BranchId]) -> String {
    ids.iter().map(BranchId::as_str).collect::<Vec<_>>().join(", ")
}

/// Parent/child lookups over the known nodes of a forest, with siblings already in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeIndex {
    nodes: Vec<BranchId>,
    known: BTreeSet<BranchId>,
    children: BTreeMap<BranchId, Siblings>,
    parents: BTreeMap<BranchId, BranchId>,
    roots: Vec<BranchId>,
    default_branch: BranchId,
}

impl TreeIndex {
    pub fn build(forest: &Forest, policy: ValidationPolicy) -> Result<Self, LayoutError> {
        let mut nodes = Vec::<BranchId>::with_capacity(forest.nodes().len());
        let mut known = BTreeSet::<&BranchId>::new();
        for node in forest.nodes() {
            if known.insert(node.id()) {
                nodes.push(node.id().clone());
            } else {
                tracing::debug!(branch = %node.id(), "skipping duplicate branch node");
            }
        }

        let mut children = BTreeMap::<BranchId, Siblings>::new();
        let mut parents = BTreeMap::<BranchId, BranchId>::new();
        let mut seen_edges = BTreeSet::<(&BranchId, &BranchId)>::new();

        for edge in forest.edges() {
            let (parent, child) = (edge.parent(), edge.child());
            if !known.contains(parent) || !known.contains(child) {
                tracing::debug!(%parent, %child, "dropping dangling edge");
                continue;
            }
            if !seen_edges.insert((parent, child)) {
                continue;
            }
            if parent == child {
                if policy == ValidationPolicy::Strict {
                    return Err(LayoutError::CycleDetected { nodes: vec![child.clone()] });
                }
                continue;
            }

            match parents.get(child) {
                Some(existing) if policy == ValidationPolicy::Strict => {
                    return Err(LayoutError::MultipleParents {
                        child: child.clone(),
                        parents: vec![existing.clone(), parent.clone()],
                    });
                }
                Some(existing) => {
                    tracing::debug!(
                        %child,
                        kept = %existing,
                        dropped = %parent,
                        "ignoring second parent edge"
                    );
                    continue;
                }
                None => {
                    parents.insert(child.clone(), parent.clone());
                }
            }
            children.entry(parent.clone()).or_default().push(child.clone());
        }

        if policy == ValidationPolicy::Strict {
            if let Some(cycle) = find_parent_cycle(&nodes, &parents) {
                return Err(LayoutError::CycleDetected { nodes: cycle });
            }
        }

        let order = forest.sibling_order();
        for (parent, siblings) in children.iter_mut() {
            order.sort_siblings(&SiblingKey::Parent(parent.clone()), siblings);
        }

        let default_branch = forest.default_branch().clone();
        let mut roots = nodes
            .iter()
            .filter(|id| !parents.contains_key(*id) && **id != default_branch)
            .cloned()
            .collect::<Vec<_>>();
        order.sort_siblings(&SiblingKey::Roots, &mut roots);
        if known.contains(&default_branch) && !parents.contains_key(&default_branch) {
            roots.insert(0, default_branch.clone());
        }

        let known = nodes.iter().cloned().collect();
        Ok(Self { nodes, known, children, parents, roots, default_branch })
    }

    /// Known node ids in input order, duplicates removed.
    pub fn nodes(&self) -> &[BranchId] {
        &self.nodes
    }

    pub fn contains(&self, id: &str) -> bool {
        self.known.contains(id)
    }

    /// Children of `parent` in display order.
    pub fn children_of(&self, parent: &str) -> &[BranchId] {
        self.children.get(parent).map(|siblings| siblings.as_slice()).unwrap_or(&[])
    }

    pub fn parent_of(&self, child: &str) -> Option<&BranchId> {
        self.parents.get(child)
    }

    /// Parentless nodes, default branch first.
    pub fn roots(&self) -> &[BranchId] {
        &self.roots
    }

    pub fn default_branch(&self) -> &BranchId {
        &self.default_branch
    }

    /// The siblings a node is ordered among, plus the key their custom order is stored under.
    pub fn sibling_group(&self, id: &str) -> (SiblingKey, Vec<BranchId>) {
        match self.parent_of(id) {
            Some(parent) => {
                (SiblingKey::Parent(parent.clone()), self.children_of(parent.as_str()).to_vec())
            }
            None => (
                SiblingKey::Roots,
                self.roots.iter().filter(|root| **root != self.default_branch).cloned().collect(),
            ),
        }
    }

    /// The top-level branches the focus separator partitions.
    ///
    /// Children of the default branch when it is a known root; otherwise the parentless
    /// branches other than the default branch.
    pub fn root_siblings(&self) -> Vec<BranchId> {
        if self.roots.first() == Some(&self.default_branch) {
            return self.children_of(self.default_branch.as_str()).to_vec();
        }
        self.roots.clone()
    }
}

fn find_parent_cycle(
    nodes: &[BranchId],
    parents: &BTreeMap<BranchId, BranchId>,
) -> Option<Vec<BranchId>> {
    let mut cleared = BTreeSet::<&BranchId>::new();

    for start in nodes {
        let mut path = Vec::<&BranchId>::new();
        let mut on_path = BTreeSet::<&BranchId>::new();
        let mut current = Some(start);

        while let Some(node) = current {
            if cleared.contains(node) {
                break;
            }
            if !on_path.insert(node) {
                let first = path.iter().position(|id| *id == node).unwrap_or(0);
                let mut cycle = path[first..].iter().map(|id| (*id).clone()).collect::<Vec<_>>();
                cycle.sort();
                return Some(cycle);
            }
            path.push(node);
            current = parents.get(node);
        }

        cleared.extend(path);
    }

    None
}
