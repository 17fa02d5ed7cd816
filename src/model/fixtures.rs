// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::forest::{Edge, Forest, TentativePlan, TentativeTask};
use super::ids::BranchId;

#[cfg(test)]
pub(crate) fn bid(value: &str) -> BranchId {
    BranchId::new(value).expect("branch id")
}

const fn id(value: &'static str) -> BranchId {
    BranchId::from_static(value)
}

pub(crate) fn forest_with_edges(
    default_branch: &'static str,
    nodes: &[&'static str],
    edges: &[(&'static str, &'static str)],
) -> Forest {
    let mut forest = Forest::new(id(default_branch));
    for node in nodes {
        forest.push_branch(id(*node));
    }
    for (parent, child) in edges {
        forest.push_edge(Edge::new(id(*parent), id(*child)));
    }
    forest
}

/// `main` with three feature branches, one of which has a follow-up branch.
#[cfg(test)]
pub(crate) fn three_features() -> Forest {
    forest_with_edges(
        "main",
        &["main", "feature-a", "feature-b", "feature-c", "feature-a-2"],
        &[
            ("main", "feature-a"),
            ("main", "feature-b"),
            ("main", "feature-c"),
            ("feature-a", "feature-a-2"),
        ],
    )
}

/// The forest shown when no document is given on the command line.
pub fn demo_forest() -> Forest {
    let mut forest = forest_with_edges(
        "main",
        &[
            "main",
            "develop",
            "feature/auth",
            "feature/auth-ui",
            "feature/billing",
            "fix/typo",
            "spike/cache",
        ],
        &[
            ("main", "develop"),
            ("main", "feature/billing"),
            ("main", "fix/typo"),
            ("develop", "feature/auth"),
            ("feature/auth", "feature/auth-ui"),
        ],
    );
    forest.push_edge(Edge::designed(id("main"), id("spike/cache")));

    let mut plan = TentativePlan::new(id("feature/billing"));
    plan.push_task(TentativeTask::with_title(id("task/invoices"), "Invoices"));
    plan.push_task(TentativeTask::with_title(id("task/invoice-pdf"), "Invoice PDF"));
    plan.push_task(TentativeTask::with_title(id("task/refunds"), "Refunds"));
    plan.push_edge(id("task/invoices"), id("task/invoice-pdf"));
    plan.push_edge(id("task/invoices"), id("task/refunds"));
    forest.set_tentative(Some(plan));

    forest
}
