// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeSet, HashSet};

use crate::layout::ForestLayout;
use crate::model::BranchId;

/// `None` means "everything focused", i.e. the separator sits after the last root sibling.
pub fn effective_separator_index(index: Option<usize>, root_count: usize) -> usize {
    index.map_or(root_count, |index| index.min(root_count))
}

/// The root sibling `id` descends from (or `id` itself when it is one).
///
/// Walks parent links, including tentative ones; a parent loop ends the walk with `None`.
pub fn root_ancestor<'l>(layout: &'l ForestLayout, id: &str) -> Option<&'l BranchId> {
    let roots = layout.root_siblings();
    let mut seen = HashSet::<&str>::new();
    let mut current = id;

    loop {
        if let Some(root) = roots.iter().find(|root| root.as_str() == current) {
            return Some(root);
        }
        if !seen.insert(current) {
            return None;
        }
        current = layout.node(current)?.parent_branch()?.as_str();
    }
}

pub fn is_unfocused(layout: &ForestLayout, id: &str, separator_index: Option<usize>) -> bool {
    let roots = layout.root_siblings();
    let separator = effective_separator_index(separator_index, roots.len());
    root_ancestor(layout, id)
        .and_then(|root| roots.iter().position(|candidate| candidate == root))
        .is_some_and(|position| position >= separator)
}

/// Every laid-out node the separator currently de-emphasizes.
pub fn unfocused_ids(layout: &ForestLayout, separator_index: Option<usize>) -> BTreeSet<BranchId> {
    layout
        .nodes()
        .iter()
        .filter(|node| is_unfocused(layout, node.id().as_str(), separator_index))
        .map(|node| node.id().clone())
        .collect()
}
