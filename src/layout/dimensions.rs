// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use super::metrics::LayoutMetrics;
use crate::model::{BranchId, MinimizeState, DEVELOP_BRANCH};

/// Why a node is drawn at the size it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    #[default]
    Normal,
    /// Narrow because the filter checked it; keeps the normal height.
    FilterMinimized,
    /// Narrow and short: the default branch and `develop`.
    AlwaysMinimized,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSize {
    pub width: f64,
    pub height: f64,
    pub class: SizeClass,
}

/// Resolves box sizes from two independent predicates.
///
/// The asymmetry matters: filter minimization narrows a node but leaves its height alone, while
/// the always-minimized branches shrink in both directions.
#[derive(Debug, Clone, Copy)]
pub struct DimensionResolver<'a> {
    default_branch: &'a BranchId,
    minimize: &'a MinimizeState,
    metrics: &'a LayoutMetrics,
}

impl<'a> DimensionResolver<'a> {
    pub fn new(
        default_branch: &'a BranchId,
        minimize: &'a MinimizeState,
        metrics: &'a LayoutMetrics,
    ) -> Self {
        Self { default_branch, minimize, metrics }
    }

    pub fn always_minimized(&self, id: &str) -> bool {
        id == self.default_branch.as_str() || id == DEVELOP_BRANCH
    }

    pub fn filter_minimized(&self, id: &str) -> bool {
        self.minimize.filter_enabled && self.minimize.checked.contains(id)
    }

    pub fn resolve(&self, id: &str) -> NodeSize {
        let always = self.always_minimized(id);
        let filtered = self.filter_minimized(id);

        let width = if always || filtered {
            self.metrics.minimized_node_width
        } else {
            self.metrics.node_width
        };
        let height =
            if always { self.metrics.minimized_node_height } else { self.metrics.node_height };
        let class = if always {
            SizeClass::AlwaysMinimized
        } else if filtered {
            SizeClass::FilterMinimized
        } else {
            SizeClass::Normal
        };

        NodeSize { width, height, class }
    }
}
