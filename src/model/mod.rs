// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout inputs: branches, edges, the tentative overlay and the host-owned view state.

pub(crate) mod fixtures;
pub mod forest;
pub mod ids;
pub mod sibling_order;

pub use fixtures::demo_forest;
pub use forest::{
    BranchNode, Edge, Forest, MinimizeState, NodeKind, TentativePlan, TentativeTask,
    DEVELOP_BRANCH,
};
pub use ids::{BranchId, IdError};
pub use sibling_order::{SiblingKey, SiblingOrder, ROOTS_KEY};
