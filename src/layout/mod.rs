// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic columnar layout for branch forests.
//!
//! The pipeline runs leaves first: [`TreeIndex`] orders siblings, [`assign_columns`] packs
//! subtrees into contiguous column ranges, [`place_tentative`] appends the planning overlay, and
//! [`layout_forest`] sizes, packs and stacks the result.

pub mod columns;
pub mod dimensions;
pub mod forest;
pub mod metrics;
pub mod position;
pub mod rect;
pub mod tentative;
pub mod tree_index;

pub use columns::{assign_columns, ColumnAssignment, Placement};
pub use dimensions::{DimensionResolver, NodeSize, SizeClass};
pub use forest::{layout_forest, ForestLayout, LayoutEdge, LayoutNode};
pub use metrics::LayoutMetrics;
pub use position::{canvas_size, stacked_y, ColumnMember, ColumnTable};
pub use rect::{Point, Rect};
pub use tentative::{place_tentative, TentativePlacement};
pub use tree_index::{LayoutError, TreeIndex, ValidationPolicy};
