// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ids::BranchId;
use super::sibling_order::SiblingOrder;

/// Literal branch name that is always drawn minimized next to the default branch.
pub const DEVELOP_BRANCH: &str = "develop";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    Real,
    Tentative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchNode {
    id: BranchId,
    #[serde(default)]
    kind: NodeKind,
}

impl BranchNode {
    pub fn new(id: BranchId) -> Self {
        Self { id, kind: NodeKind::Real }
    }

    pub fn id(&self) -> &BranchId {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }
}

/// A parent → child relation between two branches.
///
/// `designed` marks edges drawn from a plan rather than observed in git. The layout never
/// interprets it; it is carried through to [`crate::layout::LayoutEdge`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    parent: BranchId,
    child: BranchId,
    #[serde(default)]
    designed: bool,
}

impl Edge {
    pub fn new(parent: BranchId, child: BranchId) -> Self {
        Self { parent, child, designed: false }
    }

    pub fn designed(parent: BranchId, child: BranchId) -> Self {
        Self { parent, child, designed: true }
    }

    pub fn parent(&self) -> &BranchId {
        &self.parent
    }

    pub fn child(&self) -> &BranchId {
        &self.child
    }

    pub fn is_designed(&self) -> bool {
        self.designed
    }
}

/// A draft task from a planning overlay. It is not a branch yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TentativeTask {
    id: BranchId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

impl TentativeTask {
    pub fn new(id: BranchId) -> Self {
        Self { id, title: None }
    }

    pub fn with_title(id: BranchId, title: impl Into<String>) -> Self {
        Self { id, title: Some(title.into()) }
    }

    pub fn id(&self) -> &BranchId {
        &self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// A secondary tree of tentative tasks hanging off an already placed branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TentativePlan {
    base_branch: BranchId,
    #[serde(default)]
    tasks: Vec<TentativeTask>,
    /// Parent → child relations between tasks.
    #[serde(default)]
    edges: Vec<Edge>,
}

impl TentativePlan {
    pub fn new(base_branch: BranchId) -> Self {
        Self { base_branch, tasks: Vec::new(), edges: Vec::new() }
    }

    pub fn base_branch(&self) -> &BranchId {
        &self.base_branch
    }

    pub fn tasks(&self) -> &[TentativeTask] {
        &self.tasks
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn push_task(&mut self, task: TentativeTask) {
        self.tasks.push(task);
    }

    pub fn push_edge(&mut self, parent: BranchId, child: BranchId) {
        self.edges.push(Edge::new(parent, child));
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Snapshot of the "minimize" filter the host UI owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimizeState {
    #[serde(default)]
    pub filter_enabled: bool,
    #[serde(default)]
    pub checked: BTreeSet<BranchId>,
}

impl MinimizeState {
    pub fn filtered(checked: impl IntoIterator<Item = BranchId>) -> Self {
        Self { filter_enabled: true, checked: checked.into_iter().collect() }
    }

    pub fn toggle(&mut self, id: &BranchId) {
        if !self.checked.remove(id) {
            self.checked.insert(id.clone());
        }
    }
}

/// Every input a layout pass depends on.
///
/// The layout is a pure function of this value (plus metrics and validation policy); hosts can
/// memoize on it directly since it is `Eq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forest {
    nodes: Vec<BranchNode>,
    edges: Vec<Edge>,
    default_branch: BranchId,
    tentative: Option<TentativePlan>,
    sibling_order: SiblingOrder,
    minimize: MinimizeState,
}

impl Forest {
    pub fn new(default_branch: BranchId) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            default_branch,
            tentative: None,
            sibling_order: SiblingOrder::default(),
            minimize: MinimizeState::default(),
        }
    }

    pub fn from_parts(
        nodes: Vec<BranchNode>,
        edges: Vec<Edge>,
        default_branch: BranchId,
        tentative: Option<TentativePlan>,
    ) -> Self {
        Self {
            nodes,
            edges,
            default_branch,
            tentative,
            sibling_order: SiblingOrder::default(),
            minimize: MinimizeState::default(),
        }
    }

    pub fn nodes(&self) -> &[BranchNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn default_branch(&self) -> &BranchId {
        &self.default_branch
    }

    pub fn tentative(&self) -> Option<&TentativePlan> {
        self.tentative.as_ref()
    }

    pub fn sibling_order(&self) -> &SiblingOrder {
        &self.sibling_order
    }

    pub fn minimize(&self) -> &MinimizeState {
        &self.minimize
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.tentative.as_ref().map_or(true, TentativePlan::is_empty)
    }

    pub fn push_branch(&mut self, id: BranchId) {
        self.nodes.push(BranchNode::new(id));
    }

    pub fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn set_tentative(&mut self, plan: Option<TentativePlan>) {
        self.tentative = plan;
    }

    pub fn set_sibling_order(&mut self, order: SiblingOrder) {
        self.sibling_order = order;
    }

    pub fn set_minimize(&mut self, minimize: MinimizeState) {
        self.minimize = minimize;
    }

    /// Replaces `child`'s parent edge(s) with a single edge from `parent`.
    ///
    /// Returns `false` when the edge already exists.
    pub fn reparent(&mut self, parent: &BranchId, child: &BranchId) -> bool {
        if self.edges.iter().any(|edge| edge.parent() == parent && edge.child() == child) {
            return false;
        }
        self.edges.retain(|edge| edge.child() != child);
        self.edges.push(Edge::new(parent.clone(), child.clone()));
        true
    }
}
