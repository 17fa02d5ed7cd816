// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::columns::assign_columns;
use super::dimensions::{DimensionResolver, SizeClass};
use super::metrics::LayoutMetrics;
use super::position::{canvas_size, stacked_y, ColumnMember, ColumnTable};
use super::rect::Rect;
use super::tentative::place_tentative;
use super::tree_index::{LayoutError, TreeIndex, ValidationPolicy};
use crate::model::{BranchId, Forest, NodeKind};

/// A positioned node. Created fresh by every layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    id: BranchId,
    kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    depth: usize,
    column: usize,
    size_class: SizeClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_branch: Option<BranchId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    siblings: Vec<BranchId>,
}

impl LayoutNode {
    pub fn id(&self) -> &BranchId {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_tentative(&self) -> bool {
        self.kind == NodeKind::Tentative
    }

    /// Display text: the task title for tentative nodes, the branch name otherwise.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(self.id.as_str())
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn size_class(&self) -> SizeClass {
        self.size_class
    }

    pub fn parent_branch(&self) -> Option<&BranchId> {
        self.parent_branch.as_ref()
    }

    /// The sibling group captured at placement time, in display order.
    pub fn siblings(&self) -> &[BranchId] {
        &self.siblings
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutEdge {
    parent: BranchId,
    child: BranchId,
    designed: bool,
    /// Synthesized for the tentative overlay; not a real git relation.
    tentative: bool,
}

impl LayoutEdge {
    pub fn parent(&self) -> &BranchId {
        &self.parent
    }

    pub fn child(&self) -> &BranchId {
        &self.child
    }

    pub fn is_designed(&self) -> bool {
        self.designed
    }

    pub fn is_tentative(&self) -> bool {
        self.tentative
    }
}

/// The complete output of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForestLayout {
    width: f64,
    height: f64,
    nodes: Vec<LayoutNode>,
    edges: Vec<LayoutEdge>,
    #[serde(skip)]
    columns: ColumnTable,
    #[serde(skip)]
    by_id: BTreeMap<BranchId, usize>,
    #[serde(skip)]
    children: BTreeMap<BranchId, Vec<BranchId>>,
    #[serde(skip)]
    root_siblings: Vec<BranchId>,
    #[serde(skip)]
    default_branch: BranchId,
}

impl ForestLayout {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.by_id.get(id).map(|idx| &self.nodes[*idx])
    }

    pub fn columns(&self) -> &ColumnTable {
        &self.columns
    }

    pub fn default_branch(&self) -> &BranchId {
        &self.default_branch
    }

    /// Primary children of `id` in display order.
    pub fn children_of(&self, id: &str) -> &[BranchId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Top-level branches partitioned by the focus separator, in display order.
    pub fn root_siblings(&self) -> &[BranchId] {
        &self.root_siblings
    }

    /// `id` and its primary descendants, depth-first.
    pub fn subtree(&self, id: &str) -> Vec<&LayoutNode> {
        let mut out = Vec::new();
        let mut seen = BTreeSet::<&str>::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            let Some(node) = self.node(current) else {
                continue;
            };
            out.push(node);
            for child in self.children_of(current).iter().rev() {
                stack.push(child.as_str());
            }
        }
        out
    }

    pub fn is_in_subtree(&self, root: &str, id: &str) -> bool {
        self.subtree(root).iter().any(|node| node.id().as_str() == id)
    }
}

/// Deterministic columnar layout for a branch forest.
///
/// - Places every known branch with [`assign_columns`], then the tentative overlay to its right.
/// - Packs column widths over the combined node set and centers nodes within their columns.
/// - Stacks each node below its parent.
///
/// The result depends only on the arguments, so equal inputs yield equal layouts.
pub fn layout_forest(
    forest: &Forest,
    metrics: &LayoutMetrics,
    policy: ValidationPolicy,
) -> Result<ForestLayout, LayoutError> {
    let index = TreeIndex::build(forest, policy)?;
    let assignment = assign_columns(&index);
    let tentative = forest
        .tentative()
        .map(|plan| place_tentative(plan, &assignment))
        .unwrap_or_default();

    let default_branch = forest.default_branch();
    let resolver = DimensionResolver::new(default_branch, forest.minimize(), metrics);
    let kinds = forest
        .nodes()
        .iter()
        .map(|node| (node.id().as_str(), node.kind()))
        .collect::<BTreeMap<_, _>>();

    let primary_sizes = assignment
        .placements()
        .iter()
        .map(|placement| resolver.resolve(placement.id.as_str()))
        .collect::<Vec<_>>();
    let tentative_sizes = tentative
        .iter()
        .map(|placement| resolver.resolve(placement.id.as_str()))
        .collect::<Vec<_>>();

    let members = assignment
        .placements()
        .iter()
        .zip(&primary_sizes)
        .map(|(placement, size)| ColumnMember {
            column: placement.column,
            width: size.width,
            is_default: placement.id == *default_branch,
        })
        .chain(tentative.iter().zip(&tentative_sizes).map(|(placement, size)| ColumnMember {
            column: placement.column,
            width: size.width,
            is_default: false,
        }))
        .collect::<Vec<_>>();
    let columns = ColumnTable::pack(&members, metrics);

    let mut nodes = Vec::<LayoutNode>::with_capacity(members.len());
    let mut by_id = BTreeMap::<BranchId, usize>::new();

    for ((placement, size), member) in
        assignment.placements().iter().zip(&primary_sizes).zip(&members)
    {
        let parent_box = placement
            .parent
            .as_ref()
            .filter(|_| placement.depth > 0)
            .and_then(|parent| by_id.get(parent))
            .map(|idx| (nodes[*idx].y, nodes[*idx].height));

        by_id.insert(placement.id.clone(), nodes.len());
        nodes.push(LayoutNode {
            id: placement.id.clone(),
            kind: kinds.get(placement.id.as_str()).copied().unwrap_or_default(),
            title: None,
            x: columns.node_x(member),
            y: stacked_y(parent_box, metrics),
            width: size.width,
            height: size.height,
            depth: placement.depth,
            column: placement.column,
            size_class: size.class,
            parent_branch: placement.parent.clone(),
            siblings: placement.siblings.clone(),
        });
    }

    let base_branch = forest.tentative().map(|plan| plan.base_branch());
    let tentative_members = &members[assignment.placements().len()..];
    for ((placement, size), member) in tentative.iter().zip(&tentative_sizes).zip(tentative_members)
    {
        let parent = placement
            .tentative_parent
            .as_ref()
            .or(base_branch)
            .filter(|parent| by_id.contains_key(parent.as_str()));
        let parent_box = parent
            .and_then(|parent| by_id.get(parent.as_str()))
            .map(|idx| (nodes[*idx].y, nodes[*idx].height));

        by_id.insert(placement.id.clone(), nodes.len());
        nodes.push(LayoutNode {
            id: placement.id.clone(),
            kind: NodeKind::Tentative,
            title: placement.title.clone(),
            x: columns.node_x(member),
            y: stacked_y(parent_box, metrics),
            width: size.width,
            height: size.height,
            depth: placement.depth,
            column: placement.column,
            size_class: size.class,
            parent_branch: parent.cloned(),
            siblings: Vec::new(),
        });
    }

    let mut edges = Vec::<LayoutEdge>::new();
    let mut seen_edges = BTreeSet::<(&BranchId, &BranchId)>::new();
    for edge in forest.edges() {
        let (parent, child) = (edge.parent(), edge.child());
        let known = index.contains(parent.as_str()) && index.contains(child.as_str());
        if !known || parent == child || !seen_edges.insert((parent, child)) {
            continue;
        }
        edges.push(LayoutEdge {
            parent: parent.clone(),
            child: child.clone(),
            designed: edge.is_designed(),
            tentative: false,
        });
    }
    for node in nodes.iter().filter(|node| node.is_tentative()) {
        if let Some(parent) = node.parent_branch() {
            edges.push(LayoutEdge {
                parent: parent.clone(),
                child: node.id.clone(),
                designed: false,
                tentative: true,
            });
        }
    }

    let (width, height) = canvas_size(
        nodes.iter().map(|node| (node.x, node.y, node.width, node.height)),
        metrics,
    );

    let children = index
        .nodes()
        .iter()
        .filter(|id| !index.children_of(id.as_str()).is_empty())
        .map(|id| (id.clone(), index.children_of(id.as_str()).to_vec()))
        .collect::<BTreeMap<_, _>>();

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        columns = columns.len(),
        width,
        height,
        "laid out forest"
    );

    Ok(ForestLayout {
        width,
        height,
        nodes,
        edges,
        columns,
        by_id,
        children,
        root_siblings: index.root_siblings(),
        default_branch: default_branch.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::{layout_forest, ForestLayout};
    use crate::layout::dimensions::SizeClass;
    use crate::layout::metrics::LayoutMetrics;
    use crate::layout::tree_index::{LayoutError, ValidationPolicy};
    use crate::model::fixtures::{bid, forest_with_edges, three_features};
    use crate::model::{
        Edge, Forest, MinimizeState, NodeKind, SiblingKey, SiblingOrder, TentativePlan,
        TentativeTask,
    };

    fn layout(forest: &Forest) -> ForestLayout {
        layout_forest(forest, &LayoutMetrics::pixels(), ValidationPolicy::Strict).expect("layout")
    }

    fn column_of(layout: &ForestLayout, id: &str) -> usize {
        layout.node(id).expect("node").column()
    }

    fn two_features() -> Forest {
        forest_with_edges(
            "main",
            &["main", "feature-a", "feature-b"],
            &[("main", "feature-a"), ("main", "feature-b")],
        )
    }

    #[test]
    fn alphabetical_children_left_to_right() {
        let layout = layout(&two_features());

        assert_eq!(column_of(&layout, "main"), 0);
        assert_eq!(column_of(&layout, "feature-a"), 0);
        assert_eq!(column_of(&layout, "feature-b"), 1);
        assert!(layout.node("feature-a").unwrap().x() < layout.node("feature-b").unwrap().x());
    }

    #[test]
    fn custom_sibling_order_swaps_columns() {
        let mut forest = two_features();
        forest.set_sibling_order(SiblingOrder::new().with(
            SiblingKey::Parent(bid("main")),
            vec![bid("feature-b"), bid("feature-a")],
        ));
        let layout = layout(&forest);

        assert_eq!(column_of(&layout, "feature-b"), 0);
        assert_eq!(column_of(&layout, "feature-a"), 1);
        assert!(layout.node("feature-b").unwrap().x() < layout.node("feature-a").unwrap().x());
    }

    #[test]
    fn default_branch_is_left_aligned_in_column_zero() {
        let metrics = LayoutMetrics::pixels();
        let layout = layout(&three_features());
        let main = layout.node("main").unwrap();

        assert_eq!(main.column(), 0);
        assert_eq!(main.x(), metrics.left_padding);
        assert_eq!(main.size_class(), SizeClass::AlwaysMinimized);
        assert_eq!(layout.columns().column_width(0), metrics.node_width);
    }

    #[test]
    fn children_stack_below_parent() {
        let metrics = LayoutMetrics::pixels();
        let layout = layout(&three_features());
        let main = layout.node("main").unwrap();
        let a = layout.node("feature-a").unwrap();
        let a2 = layout.node("feature-a-2").unwrap();

        assert_eq!(main.y(), metrics.top_padding);
        assert_eq!(a.y(), main.y() + main.height() + metrics.vertical_gap);
        assert_eq!(a2.y(), a.y() + a.height() + metrics.vertical_gap);
    }

    #[test]
    fn filter_minimized_column_narrows_but_keeps_height() {
        let metrics = LayoutMetrics::pixels();
        let mut forest = three_features();
        forest.set_minimize(MinimizeState::filtered([bid("feature-b")]));
        let layout = layout(&forest);
        let b = layout.node("feature-b").unwrap();

        assert_eq!(b.width(), metrics.minimized_node_width);
        assert_eq!(b.height(), metrics.node_height);
        assert_eq!(layout.columns().column_width(1), metrics.minimized_node_width);
        let c = layout.node("feature-c").unwrap();
        assert_eq!(
            c.x(),
            metrics.left_padding
                + metrics.node_width
                + metrics.horizontal_gap
                + metrics.minimized_node_width
                + metrics.horizontal_gap
        );
    }

    #[test]
    fn column_width_is_max_of_members() {
        let layout = layout(&three_features());
        let default = layout.default_branch().clone();
        for column in 0..layout.columns().len() {
            let widest = layout
                .nodes()
                .iter()
                .filter(|node| node.column() == column && *node.id() != default)
                .map(|node| node.width())
                .fold(0.0_f64, f64::max);
            assert_eq!(layout.columns().column_width(column), widest);
        }
    }

    #[test]
    fn reordering_siblings_keeps_other_columns_in_place() {
        let forest = forest_with_edges(
            "main",
            &["main", "a", "b", "b1", "b2", "c"],
            &[("main", "a"), ("main", "b"), ("main", "c"), ("b", "b1"), ("b", "b2")],
        );
        let before = layout(&forest);

        let mut reordered = forest.clone();
        reordered.set_sibling_order(
            SiblingOrder::new().with(SiblingKey::Parent(bid("b")), vec![bid("b2"), bid("b1")]),
        );
        let after = layout(&reordered);

        for id in ["main", "a", "b", "c"] {
            assert_eq!(before.node(id), after.node(id), "{id} moved");
        }
        assert_eq!(before.node("b1").unwrap().x(), after.node("b2").unwrap().x());
    }

    #[test]
    fn layout_is_deterministic() {
        let forest = crate::model::demo_forest();
        let first = layout(&forest);
        let second = layout(&forest);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn empty_forest_yields_minimum_canvas() {
        let metrics = LayoutMetrics::pixels();
        let layout = layout(&Forest::new(bid("main")));

        assert!(layout.nodes().is_empty());
        assert!(layout.edges().is_empty());
        assert_eq!(layout.width(), metrics.min_canvas_width);
        assert_eq!(layout.height(), metrics.min_canvas_height);
    }

    #[test]
    fn dangling_edges_are_dropped_and_designed_flag_kept() {
        let mut forest = two_features();
        forest.push_edge(Edge::new(bid("main"), bid("ghost")));
        forest.push_edge(Edge::designed(bid("feature-a"), bid("feature-b")));
        let layout = layout_forest(&forest, &LayoutMetrics::pixels(), ValidationPolicy::Lenient)
            .expect("layout");

        assert_eq!(layout.edges().len(), 3);
        assert!(layout.edges().iter().all(|edge| edge.child().as_str() != "ghost"));
        let designed = layout.edges().iter().find(|edge| edge.is_designed()).expect("designed");
        assert_eq!(designed.parent().as_str(), "feature-a");
    }

    #[test]
    fn strict_layout_reports_cycles() {
        let forest = forest_with_edges("main", &["main", "a", "b"], &[("a", "b"), ("b", "a")]);
        let err = layout_forest(&forest, &LayoutMetrics::pixels(), ValidationPolicy::Strict)
            .unwrap_err();
        assert!(matches!(err, LayoutError::CycleDetected { .. }));

        let lenient = layout_forest(&forest, &LayoutMetrics::pixels(), ValidationPolicy::Lenient)
            .expect("layout");
        assert_eq!(lenient.nodes().len(), 3);
        assert!(lenient.nodes().iter().all(|node| node.depth() == 0));
    }

    #[test]
    fn tentative_overlay_sits_right_of_primary_and_below_base() {
        let metrics = LayoutMetrics::pixels();
        let mut forest = three_features();
        let mut plan = TentativePlan::new(bid("feature-b"));
        plan.push_task(TentativeTask::with_title(bid("t1"), "Write tests"));
        plan.push_task(TentativeTask::new(bid("t2")));
        plan.push_edge(bid("t1"), bid("t2"));
        forest.set_tentative(Some(plan));
        let layout = layout(&forest);

        let base = layout.node("feature-b").unwrap();
        let t1 = layout.node("t1").unwrap();
        let t2 = layout.node("t2").unwrap();
        let rightmost_primary = layout.node("feature-c").unwrap();

        assert_eq!(t1.kind(), NodeKind::Tentative);
        assert_eq!(t1.label(), "Write tests");
        assert_eq!(t1.column(), 3);
        assert_eq!(t2.column(), 3);
        assert!(t1.x() > rightmost_primary.x() + rightmost_primary.width());
        assert_eq!(t1.y(), base.y() + base.height() + metrics.vertical_gap);
        assert_eq!(t1.parent_branch().map(|id| id.as_str()), Some("feature-b"));

        let synthesized = layout.edges().iter().filter(|edge| edge.is_tentative()).collect::<Vec<_>>();
        assert_eq!(synthesized.len(), 2);
        assert_eq!(synthesized[0].parent().as_str(), "feature-b");
        assert_eq!(synthesized[1].parent().as_str(), "t1");
    }

    #[test]
    fn tentative_only_input_still_lays_out() {
        let mut forest = Forest::new(bid("main"));
        let mut plan = TentativePlan::new(bid("main"));
        plan.push_task(TentativeTask::new(bid("t")));
        forest.set_tentative(Some(plan));
        let layout = layout(&forest);

        let t = layout.node("t").unwrap();
        assert_eq!(t.column(), 0);
        assert_eq!(t.depth(), 0);
        assert!(layout.edges().is_empty());
    }

    #[test]
    fn subtree_walks_primary_descendants_in_order() {
        let layout = layout(&three_features());
        let ids = layout
            .subtree("main")
            .iter()
            .map(|node| node.id().as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["main", "feature-a", "feature-a-2", "feature-b", "feature-c"]);
        assert!(layout.is_in_subtree("feature-a", "feature-a-2"));
        assert!(!layout.is_in_subtree("feature-b", "feature-a-2"));
    }
}
