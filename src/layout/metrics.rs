// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

/// Fixed sizes and gaps used by the layout and the gesture engines.
///
/// Units are whatever the host renders in: [`LayoutMetrics::pixels`] suits a graphical canvas,
/// [`LayoutMetrics::cells`] a terminal grid. Every field has a default so a document may override
/// only what it cares about.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub node_width: f64,
    pub minimized_node_width: f64,
    pub node_height: f64,
    pub minimized_node_height: f64,
    pub horizontal_gap: f64,
    pub vertical_gap: f64,
    pub top_padding: f64,
    pub left_padding: f64,
    /// Room kept below each node for status badges.
    pub badge_allowance: f64,
    pub canvas_padding: f64,
    pub min_canvas_width: f64,
    pub min_canvas_height: f64,
    /// Width of the focus separator's virtual slot between root sibling columns.
    pub separator_zone_width: f64,
}

impl LayoutMetrics {
    pub const fn pixels() -> Self {
        Self {
            node_width: 180.0,
            minimized_node_width: 80.0,
            node_height: 72.0,
            minimized_node_height: 32.0,
            horizontal_gap: 24.0,
            vertical_gap: 48.0,
            top_padding: 24.0,
            left_padding: 24.0,
            badge_allowance: 24.0,
            canvas_padding: 40.0,
            min_canvas_width: 640.0,
            min_canvas_height: 360.0,
            separator_zone_width: 32.0,
        }
    }

    pub const fn cells() -> Self {
        Self {
            node_width: 18.0,
            minimized_node_width: 10.0,
            node_height: 4.0,
            minimized_node_height: 3.0,
            horizontal_gap: 2.0,
            vertical_gap: 1.0,
            top_padding: 1.0,
            left_padding: 1.0,
            badge_allowance: 0.0,
            canvas_padding: 1.0,
            min_canvas_width: 0.0,
            min_canvas_height: 0.0,
            separator_zone_width: 3.0,
        }
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::pixels()
    }
}

#[cfg(test)]
mod tests {
    use super::LayoutMetrics;

    #[test]
    fn partial_overrides_keep_pixel_defaults() {
        let metrics: LayoutMetrics =
            serde_json::from_str(r#"{"node_width": 200.0}"#).expect("deserialize");
        assert_eq!(metrics.node_width, 200.0);
        assert_eq!(metrics.vertical_gap, LayoutMetrics::pixels().vertical_gap);
    }

    #[test]
    fn minimized_sizes_are_smaller_in_both_presets() {
        for metrics in [LayoutMetrics::pixels(), LayoutMetrics::cells()] {
            assert!(metrics.minimized_node_width < metrics.node_width);
            assert!(metrics.minimized_node_height < metrics.node_height);
        }
    }
}
