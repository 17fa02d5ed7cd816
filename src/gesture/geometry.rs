// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Column boxes and the live horizontal reflow shared by every gesture.
//!
//! Gestures never touch a [`ForestLayout`]. They read its static boxes and describe the frame
//! they want as a left-to-right list of [`Slot`]s; [`reflow`] turns that list into rendered
//! rectangles and [`RenderOffsets`] turns those into one horizontal offset per node.

use std::collections::BTreeMap;

use super::focus::effective_separator_index;
use super::port::GestureContext;
use super::reorder::ReorderGesture;
use crate::layout::{ForestLayout, LayoutMetrics, LayoutNode, Point, Rect};
use crate::model::BranchId;

/// The static box of a sibling's whole column range.
///
/// Spans the contiguous columns its subtree occupies and the rows its subtree nodes cover.
/// Tentative nodes never count towards a column box.
pub fn column_span(layout: &ForestLayout, id: &str) -> Option<Rect> {
    let subtree = layout.subtree(id);
    let first = subtree.first()?;

    let (mut min_column, mut max_column) = (first.column(), first.column());
    let (mut top, mut bottom) = (first.y(), first.y() + first.height());
    for node in subtree.iter().skip(1) {
        min_column = min_column.min(node.column());
        max_column = max_column.max(node.column());
        top = top.min(node.y());
        bottom = bottom.max(node.y() + node.height());
    }

    let columns = layout.columns();
    let left = columns.column_x(min_column);
    let right = columns.column_x(max_column) + columns.column_width(max_column);
    Some(Rect::new(left, top, right - left, bottom - top))
}

/// One entry of a reflowed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    /// A sibling column at rest.
    Column(&'a BranchId),
    /// The placeholder left open for the column being dragged.
    Dragged(&'a BranchId),
    /// The focus separator's virtual slot.
    Separator,
}

impl Slot<'_> {
    pub fn is_separator(&self) -> bool {
        matches!(self, Slot::Separator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedSlot<'a> {
    pub slot: Slot<'a>,
    pub rect: Rect,
}

/// Lays `slots` out left to right starting at `origin_x`.
///
/// Columns keep their static width and are separated by `horizontal_gap`. The separator sits
/// half a gap right of the previous column and pushes everything after it by
/// `separator_zone_width`. Its vertical extent is the band the columns cover.
pub fn reflow<'a>(
    layout: &ForestLayout,
    metrics: &LayoutMetrics,
    slots: &[Slot<'a>],
    origin_x: f64,
) -> Vec<PlacedSlot<'a>> {
    let spans = slots
        .iter()
        .map(|slot| match slot {
            Slot::Column(id) | Slot::Dragged(id) => column_span(layout, id.as_str()),
            Slot::Separator => None,
        })
        .collect::<Vec<_>>();

    let band = spans.iter().flatten().copied().reduce(|a, b| a.union(&b));
    let (band_top, band_height) = band.map_or((0.0, layout.height()), |band| (band.y, band.height));

    let gap = metrics.horizontal_gap;
    let mut running = origin_x;
    let mut prev_right = origin_x - gap;
    let mut placed = Vec::with_capacity(slots.len());

    for (slot, span) in slots.iter().zip(spans) {
        let rect = match slot {
            Slot::Column(_) | Slot::Dragged(_) => {
                let span = span.unwrap_or_default();
                let rect = Rect::new(running, span.y, span.width, span.height);
                prev_right = rect.right();
                running = prev_right + gap;
                rect
            }
            Slot::Separator => {
                running += metrics.separator_zone_width;
                Rect::new(
                    prev_right + gap / 2.0,
                    band_top,
                    metrics.separator_zone_width,
                    band_height,
                )
            }
        };
        placed.push(PlacedSlot { slot: *slot, rect });
    }

    placed
}

/// The root-sibling row with the separator at `separator` (clamped), in rendered coordinates.
pub fn root_row<'a>(
    layout: &'a ForestLayout,
    metrics: &LayoutMetrics,
    separator: usize,
) -> Vec<PlacedSlot<'a>> {
    let roots = layout.root_siblings();
    if roots.is_empty() {
        return Vec::new();
    }

    let mut slots = roots.iter().map(Slot::Column).collect::<Vec<_>>();
    slots.insert(separator.min(roots.len()), Slot::Separator);
    reflow(layout, metrics, &slots, static_origin(layout, roots))
}

/// Left edge of the leftmost static column box among `ids`.
pub(crate) fn static_origin(layout: &ForestLayout, ids: &[BranchId]) -> f64 {
    let origin = ids
        .iter()
        .filter_map(|id| column_span(layout, id.as_str()))
        .map(|span| span.left())
        .fold(f64::INFINITY, f64::min);
    if origin.is_finite() {
        origin
    } else {
        0.0
    }
}

/// Per-node horizontal rendering offsets for one frame.
///
/// Layout positions plus these offsets are the rendered coordinates all hit testing uses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOffsets {
    by_id: BTreeMap<BranchId, f64>,
    separator: Option<Rect>,
    dragging: Option<BranchId>,
}

impl RenderOffsets {
    /// Offsets for the current separator position, with the active column drag overlaid.
    pub fn compute(ctx: &GestureContext<'_>, reorder: Option<&ReorderGesture>) -> Self {
        let roots = ctx.layout.root_siblings().len();
        let separator = reorder
            .and_then(ReorderGesture::separator_index)
            .unwrap_or_else(|| effective_separator_index(ctx.separator_index, roots));

        let mut offsets = Self::at_rest(ctx.layout, ctx.metrics, separator);
        if let Some(gesture) = reorder {
            gesture.overlay(ctx, &mut offsets);
        }
        offsets
    }

    /// Offsets with no column drag in progress.
    ///
    /// Root subtrees after the separator shift by the zone width, as does everything to the
    /// right of the root siblings.
    pub fn at_rest(layout: &ForestLayout, metrics: &LayoutMetrics, separator: usize) -> Self {
        let mut offsets = Self::default();
        let row = root_row(layout, metrics, separator);
        if row.is_empty() {
            return offsets;
        }

        let mut last_root_column = 0;
        for placed in &row {
            match placed.slot {
                Slot::Column(id) | Slot::Dragged(id) => {
                    let Some(span) = column_span(layout, id.as_str()) else {
                        continue;
                    };
                    offsets.set_subtree(layout, id, placed.rect.left() - span.left());
                    for node in layout.subtree(id.as_str()) {
                        last_root_column = last_root_column.max(node.column());
                    }
                }
                Slot::Separator => offsets.separator = Some(placed.rect),
            }
        }

        for node in layout.nodes() {
            if node.column() > last_root_column && !offsets.by_id.contains_key(node.id()) {
                offsets.by_id.insert(node.id().clone(), metrics.separator_zone_width);
            }
        }

        offsets
    }

    pub fn offset(&self, id: &str) -> f64 {
        self.by_id.get(id).copied().unwrap_or(0.0)
    }

    /// The separator's rendered rectangle; `None` when there are no root siblings.
    pub fn separator(&self) -> Option<Rect> {
        self.separator
    }

    /// The branch whose column is following the pointer, if any.
    pub fn dragging(&self) -> Option<&BranchId> {
        self.dragging.as_ref()
    }

    pub fn rendered_rect(&self, node: &LayoutNode) -> Rect {
        node.rect().shifted_x(self.offset(node.id().as_str()))
    }

    /// Topmost node whose rendered box contains `point`.
    pub fn node_at<'l>(&self, layout: &'l ForestLayout, point: Point) -> Option<&'l LayoutNode> {
        layout.nodes().iter().rev().find(|node| self.rendered_rect(node).contains(point))
    }

    pub(crate) fn set_subtree(&mut self, layout: &ForestLayout, id: &BranchId, offset: f64) {
        for node in layout.subtree(id.as_str()) {
            self.by_id.insert(node.id().clone(), offset);
        }
    }

    pub(crate) fn set_separator(&mut self, rect: Rect) {
        self.separator = Some(rect);
    }

    pub(crate) fn set_dragging(&mut self, id: BranchId) {
        self.dragging = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::{column_span, reflow, root_row, RenderOffsets, Slot};
    use crate::gesture::test_support::features_layout;
    use crate::layout::{layout_forest, LayoutMetrics, Point, Rect, ValidationPolicy};
    use crate::model::fixtures::{bid, forest_with_edges};

    #[test]
    fn column_span_covers_subtree_rows() {
        let layout = features_layout();
        let span = column_span(&layout, "feature-a").expect("span");
        assert_eq!(span, Rect::new(24.0, 104.0, 180.0, 192.0));

        let span = column_span(&layout, "feature-c").expect("span");
        assert_eq!(span.left(), 432.0);
        assert_eq!(span.right(), 612.0);
    }

    #[test]
    fn separator_shifts_following_columns() {
        let metrics = LayoutMetrics::pixels();
        let layout = features_layout();
        let (a, b) = (bid("feature-a"), bid("feature-b"));
        let placed = reflow(
            &layout,
            &metrics,
            &[Slot::Column(&a), Slot::Separator, Slot::Column(&b)],
            24.0,
        );

        assert_eq!(placed[0].rect.left(), 24.0);
        assert_eq!(placed[1].rect.left(), 216.0);
        assert_eq!(placed[1].rect.width, metrics.separator_zone_width);
        assert_eq!(placed[2].rect.left(), 260.0);
    }

    #[test]
    fn separator_at_end_leaves_root_columns_in_place() {
        let metrics = LayoutMetrics::pixels();
        let layout = features_layout();
        let row = root_row(&layout, &metrics, 3);

        let lefts = row.iter().map(|placed| placed.rect.left()).collect::<Vec<_>>();
        assert_eq!(lefts, vec![24.0, 228.0, 432.0, 624.0]);
        assert!(row[3].slot.is_separator());
    }

    #[test]
    fn at_rest_offsets_shift_unfocused_subtrees() {
        let metrics = LayoutMetrics::pixels();
        let layout = features_layout();
        let offsets = RenderOffsets::at_rest(&layout, &metrics, 0);

        assert_eq!(offsets.offset("main"), 0.0);
        assert_eq!(offsets.offset("feature-a"), metrics.separator_zone_width);
        assert_eq!(offsets.offset("feature-a-2"), metrics.separator_zone_width);
        assert_eq!(offsets.offset("feature-c"), metrics.separator_zone_width);

        let a2 = layout.node("feature-a-2").unwrap();
        let inside = Point::new(24.0 + metrics.separator_zone_width + 1.0, a2.y() + 1.0);
        assert_eq!(offsets.node_at(&layout, inside).map(|n| n.id().as_str()), Some("feature-a-2"));
    }

    #[test]
    fn lenient_second_parent_does_not_widen_the_losing_column() {
        let metrics = LayoutMetrics::pixels();
        let forest = forest_with_edges(
            "main",
            &["main", "a", "b", "c"],
            &[("main", "a"), ("main", "b"), ("a", "c"), ("b", "c")],
        );
        let layout =
            layout_forest(&forest, &metrics, ValidationPolicy::Lenient).expect("layout");

        let b = layout.node("b").expect("b");
        let span = column_span(&layout, "b").expect("span");
        assert_eq!(span.left(), layout.columns().column_x(b.column()));
        assert_eq!(span.width, layout.columns().column_width(b.column()));

        let offsets = RenderOffsets::at_rest(&layout, &metrics, 1);
        assert_eq!(offsets.offset("a"), 0.0);
        assert_eq!(offsets.offset("c"), 0.0);
        assert_eq!(offsets.offset("b"), metrics.separator_zone_width);
    }
}
