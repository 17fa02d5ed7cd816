// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::metrics::LayoutMetrics;

/// One node's contribution to the column width pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnMember {
    pub column: usize,
    pub width: f64,
    /// The default branch never widens its column and is left-aligned in it.
    pub is_default: bool,
}

/// Column widths and left edges, left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnTable {
    x: Vec<f64>,
    widths: Vec<f64>,
}

impl ColumnTable {
    pub fn pack(members: &[ColumnMember], metrics: &LayoutMetrics) -> Self {
        let column_count = members.iter().map(|member| member.column + 1).max().unwrap_or(0);

        let mut widths = vec![None::<f64>; column_count];
        let mut default_widths = vec![None::<f64>; column_count];
        for member in members {
            let slot = if member.is_default {
                &mut default_widths[member.column]
            } else {
                &mut widths[member.column]
            };
            *slot = Some(slot.map_or(member.width, |width| width.max(member.width)));
        }

        // A column holding only the default branch still needs room for it.
        let widths = widths
            .into_iter()
            .zip(default_widths)
            .map(|(width, default_width)| width.or(default_width).unwrap_or(0.0))
            .collect::<Vec<_>>();

        let mut x = Vec::with_capacity(widths.len());
        let mut running = metrics.left_padding;
        for width in &widths {
            x.push(running);
            running += width + metrics.horizontal_gap;
        }

        Self { x, widths }
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn column_x(&self, column: usize) -> f64 {
        self.x.get(column).copied().unwrap_or(0.0)
    }

    pub fn column_width(&self, column: usize) -> f64 {
        self.widths.get(column).copied().unwrap_or(0.0)
    }

    pub fn xs(&self) -> &[f64] {
        &self.x
    }

    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    /// Left edge of a node: centered in its column, except the default branch which sits at
    /// the column start.
    pub fn node_x(&self, member: &ColumnMember) -> f64 {
        let column_x = self.column_x(member.column);
        if member.is_default {
            return column_x;
        }
        column_x + (self.column_width(member.column) - member.width) / 2.0
    }
}

/// Top edge of a node stacked below its parent. Roots stack below a zero-height synthetic parent
/// so they land on `top_padding`.
pub fn stacked_y(parent: Option<(f64, f64)>, metrics: &LayoutMetrics) -> f64 {
    let (parent_y, parent_height) =
        parent.unwrap_or((metrics.top_padding - metrics.vertical_gap, 0.0));
    parent_y + parent_height + metrics.vertical_gap
}

/// Canvas extent for node boxes given as `(x, y, width, height)`.
pub fn canvas_size(
    boxes: impl IntoIterator<Item = (f64, f64, f64, f64)>,
    metrics: &LayoutMetrics,
) -> (f64, f64) {
    let mut max_x = 0.0_f64;
    let mut max_y = 0.0_f64;
    for (x, y, width, height) in boxes {
        max_x = max_x.max(x + width);
        max_y = max_y.max(y + height + metrics.badge_allowance);
    }

    (
        (max_x + metrics.canvas_padding).max(metrics.min_canvas_width),
        (max_y + metrics.canvas_padding).max(metrics.min_canvas_height),
    )
}
