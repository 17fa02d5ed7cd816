// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Placement of the tentative (planning) overlay.
//!
//! Tentative tasks use their own column rule: the first child continues its parent's column so a
//! linear plan reads as a vertical chain, and every further child opens a fresh column. All of
//! the overlay lives to the right of the primary tree.

use std::collections::{BTreeMap, BTreeSet};

use super::columns::ColumnAssignment;
use crate::model::{BranchId, TentativePlan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TentativePlacement {
    pub id: BranchId,
    pub title: Option<String>,
    pub depth: usize,
    pub column: usize,
    /// The tentative parent, or `None` when the task hangs directly off the base branch.
    pub tentative_parent: Option<BranchId>,
}

pub fn place_tentative(plan: &TentativePlan, primary: &ColumnAssignment) -> Vec<TentativePlacement> {
    let mut tasks = Vec::<&BranchId>::new();
    let mut titles = BTreeMap::<&BranchId, Option<&str>>::new();
    for task in plan.tasks() {
        if primary.get(task.id().as_str()).is_some() {
            tracing::debug!(task = %task.id(), "tentative task shadows a branch; skipping");
            continue;
        }
        if titles.insert(task.id(), task.title()).is_some() {
            continue;
        }
        tasks.push(task.id());
    }

    let mut declared = BTreeMap::<&BranchId, &BranchId>::new();
    for edge in plan.edges() {
        let (parent, child) = (edge.parent(), edge.child());
        if parent == child || !titles.contains_key(parent) || !titles.contains_key(child) {
            continue;
        }
        declared.entry(child).or_insert(parent);
    }

    let parents = break_cycles(&tasks, &declared);

    let root_depth = primary
        .get(plan.base_branch().as_str())
        .map_or(0, |placement| placement.depth + 1);
    let mut depths = BTreeMap::<&BranchId, usize>::new();
    for &task in &tasks {
        depth_of(task, &parents, root_depth, &mut depths);
    }

    let mut children = BTreeMap::<&BranchId, Vec<&BranchId>>::new();
    let mut roots = Vec::<&BranchId>::new();
    for &task in &tasks {
        match parents.get(task).copied().flatten() {
            Some(parent) => children.entry(parent).or_default().push(task),
            None => roots.push(task),
        }
    }

    let mut placer = TentativePlacer {
        children: &children,
        parents: &parents,
        depths: &depths,
        titles: &titles,
        next_column: primary.next_column(),
        placements: Vec::with_capacity(tasks.len()),
    };
    for root in roots {
        let column = placer.claim_column();
        placer.place(root, column);
    }

    placer.placements
}

/// Resolves each task's tentative parent, cutting the edge that closes a cycle.
fn break_cycles<'a>(
    tasks: &[&'a BranchId],
    declared: &BTreeMap<&'a BranchId, &'a BranchId>,
) -> BTreeMap<&'a BranchId, Option<&'a BranchId>> {
    let mut resolved = BTreeMap::<&BranchId, Option<&BranchId>>::new();

    for start in tasks {
        let mut path = Vec::<&BranchId>::new();
        let mut on_path = BTreeSet::<&BranchId>::new();
        let mut current = *start;

        loop {
            if resolved.contains_key(current) {
                break;
            }
            on_path.insert(current);
            path.push(current);
            match declared.get(current) {
                Some(parent) if on_path.contains(*parent) => {
                    tracing::debug!(task = %current, parent = %parent, "cutting tentative cycle");
                    resolved.insert(current, None);
                    break;
                }
                Some(parent) => current = *parent,
                None => break,
            }
        }

        for id in path {
            let parent = declared.get(id).copied();
            resolved.entry(id).or_insert(parent);
        }
    }

    resolved
}

fn depth_of<'a>(
    task: &'a BranchId,
    parents: &BTreeMap<&'a BranchId, Option<&'a BranchId>>,
    root_depth: usize,
    memo: &mut BTreeMap<&'a BranchId, usize>,
) -> usize {
    if let Some(depth) = memo.get(task) {
        return *depth;
    }
    let depth = match parents.get(task).copied().flatten() {
        Some(parent) => depth_of(parent, parents, root_depth, memo) + 1,
        None => root_depth,
    };
    memo.insert(task, depth);
    depth
}

struct TentativePlacer<'p, 'a> {
    children: &'p BTreeMap<&'a BranchId, Vec<&'a BranchId>>,
    parents: &'p BTreeMap<&'a BranchId, Option<&'a BranchId>>,
    depths: &'p BTreeMap<&'a BranchId, usize>,
    titles: &'p BTreeMap<&'a BranchId, Option<&'a str>>,
    next_column: usize,
    placements: Vec<TentativePlacement>,
}

impl<'a> TentativePlacer<'_, 'a> {
    fn claim_column(&mut self) -> usize {
        let column = self.next_column;
        self.next_column += 1;
        column
    }

    fn place(&mut self, id: &'a BranchId, column: usize) {
        self.placements.push(TentativePlacement {
            id: id.clone(),
            title: self.titles.get(id).copied().flatten().map(ToOwned::to_owned),
            depth: self.depths.get(id).copied().unwrap_or(0),
            column,
            tentative_parent: self.parents.get(id).copied().flatten().cloned(),
        });

        let children = self.children;
        for (idx, &child) in children.get(id).into_iter().flatten().enumerate() {
            let child_column = if idx == 0 { column } else { self.claim_column() };
            self.place(child, child_column);
        }
    }
}
