// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Deterministic forests for benchmarks (no RNG).

use canopy::model::{BranchId, Edge, Forest, TentativePlan, TentativeTask};

fn bid(value: &str) -> BranchId {
    BranchId::new(value).expect("branch id")
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// Many short root subtrees: stresses column packing.
    Wide,
    /// A few long chains: stresses depth stacking.
    Deep,
    /// Fan-out at every level plus a tentative plan.
    Bushy,
}

pub fn fixture(case: Case) -> Forest {
    match case {
        Case::Wide => forest(Params { roots: 64, fanout: 2, depth: 2, tasks: 0 }),
        Case::Deep => forest(Params { roots: 6, fanout: 1, depth: 40, tasks: 0 }),
        Case::Bushy => forest(Params { roots: 8, fanout: 3, depth: 4, tasks: 12 }),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Params {
    pub roots: usize,
    pub fanout: usize,
    pub depth: usize,
    pub tasks: usize,
}

/// `main` with `roots` children, each growing a `fanout`-ary subtree `depth` levels deep.
pub fn forest(params: Params) -> Forest {
    let mut forest = Forest::new(bid("main"));
    forest.push_branch(bid("main"));

    let mut frontier = Vec::new();
    for root in 0..params.roots {
        let id = bid(&format!("r{root}"));
        forest.push_branch(id.clone());
        forest.push_edge(Edge::new(bid("main"), id.clone()));
        frontier.push(id);
    }

    for level in 1..params.depth {
        let mut next = Vec::with_capacity(frontier.len() * params.fanout);
        for parent in &frontier {
            for child in 0..params.fanout {
                let id = bid(&format!("{parent}/{level}.{child}"));
                forest.push_branch(id.clone());
                forest.push_edge(Edge::new(parent.clone(), id.clone()));
                next.push(id);
            }
        }
        frontier = next;
    }

    if params.tasks > 0 {
        let mut plan = TentativePlan::new(bid("r0"));
        for task in 0..params.tasks {
            plan.push_task(TentativeTask::new(bid(&format!("task/{task}"))));
            if task > 0 {
                let parent = bid(&format!("task/{}", (task - 1) / 2));
                plan.push_edge(parent, bid(&format!("task/{task}")));
            }
        }
        forest.set_tentative(Some(plan));
    }

    forest
}
