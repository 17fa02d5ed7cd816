// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::canvas::{
    Canvas, CanvasError, Stroke, BOX_TEE_DOWN, BOX_TEE_UP, BOX_VERTICAL, DASH_VERTICAL,
    DOTTED_VERTICAL,
};
use super::text::{canvas_to_string_trimmed, text_len, truncate_with_ellipsis};
use crate::gesture::{is_unfocused, RenderOffsets};
use crate::layout::{ForestLayout, LayoutEdge, Rect};
use crate::model::BranchId;

const UNFOCUSED_FILL: char = '·';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub separator_index: Option<usize>,
    pub hide_separator: bool,
}

/// A span of cells on one rendered line: `(y, x0, x1)`, inclusive.
pub type LineSpan = (usize, usize, usize);

/// Cells each node's box covers, for cell-accurate highlighting in the TUI.
pub type HighlightIndex = BTreeMap<BranchId, Vec<LineSpan>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRender {
    pub text: String,
    pub highlight_index: HighlightIndex,
    pub unfocused: BTreeSet<BranchId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("canvas error: {0}")]
    Canvas(#[from] CanvasError),
}

/// Integer cell box of a rendered rectangle; corners inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellBox {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl CellBox {
    fn from_rect(rect: Rect) -> Self {
        let x0 = cell(rect.x);
        let y0 = cell(rect.y);
        Self {
            x0,
            y0,
            x1: x0 + cell(rect.width).max(1) - 1,
            y1: y0 + cell(rect.height).max(1) - 1,
        }
    }

    fn center_x(self) -> i64 {
        self.x0 + (self.x1 - self.x0) / 2
    }
}

fn cell(value: f64) -> i64 {
    // `as` saturates, which is the clipping behavior wanted here.
    value.round() as i64
}

pub fn render_forest_unicode(
    layout: &ForestLayout,
    offsets: &RenderOffsets,
    options: RenderOptions,
) -> Result<String, RenderError> {
    render_forest_unicode_annotated(layout, offsets, options).map(|render| render.text)
}

/// Draws the forest in terminal cells. The layout should use [`crate::layout::LayoutMetrics::cells`].
///
/// Real branches get solid boxes and tentative tasks dashed ones. Unfocused subtrees are filled
/// with `·` and the focus separator is a dotted rule.
pub fn render_forest_unicode_annotated(
    layout: &ForestLayout,
    offsets: &RenderOffsets,
    options: RenderOptions,
) -> Result<AnnotatedRender, RenderError> {
    let boxes = layout
        .nodes()
        .iter()
        .map(|node| (node.id(), CellBox::from_rect(offsets.rendered_rect(node))))
        .collect::<BTreeMap<_, _>>();
    let separator = offsets.separator().filter(|_| !options.hide_separator);

    let right = boxes
        .values()
        .map(|cells| cells.x1 + 1)
        .chain(separator.map(|rect| cell(rect.right())))
        .fold(cell(layout.width()), i64::max);
    let mut canvas = Canvas::new(
        usize::try_from(right).unwrap_or(0),
        usize::try_from(cell(layout.height())).unwrap_or(0),
    )?;

    if let Some(rect) = separator {
        let x = cell(rect.center_x() - 0.5);
        canvas.vline_clipped(x, cell(rect.y), cell(rect.bottom()) - 1, DOTTED_VERTICAL);
    }

    let mut unfocused = BTreeSet::new();
    for node in layout.nodes() {
        let Some(cells) = boxes.get(node.id()).copied() else {
            continue;
        };
        let stroke = if node.is_tentative() { Stroke::Dashed } else { Stroke::Solid };
        canvas.box_clipped(cells.x0, cells.y0, cells.x1, cells.y1, stroke);
        if is_unfocused(layout, node.id().as_str(), options.separator_index) {
            canvas.fill_inside_clipped(cells.x0, cells.y0, cells.x1, cells.y1, UNFOCUSED_FILL);
            unfocused.insert(node.id().clone());
        }
    }

    for edge in layout.edges() {
        if let (Some(parent), Some(child)) = (boxes.get(edge.parent()), boxes.get(edge.child())) {
            draw_edge(&mut canvas, edge, *parent, *child);
        }
    }

    for node in layout.nodes() {
        let Some(cells) = boxes.get(node.id()).copied() else {
            continue;
        };
        let inner = usize::try_from(cells.x1 - cells.x0 - 1).unwrap_or(0);
        if inner == 0 || cells.y1 - cells.y0 < 2 {
            continue;
        }
        let label = truncate_with_ellipsis(node.label(), inner);
        canvas.write_clipped(cells.x0 + 1, cells.y0 + 1, &label);
    }

    let mut highlight_index = HighlightIndex::new();
    for (id, cells) in &boxes {
        let spans = box_spans(&canvas, *cells);
        if !spans.is_empty() {
            highlight_index.insert((*id).clone(), spans);
        }
    }

    let text = canvas_to_string_trimmed(&canvas);
    clamp_highlight_index_to_text(&mut highlight_index, &text);
    Ok(AnnotatedRender { text, highlight_index, unfocused })
}

/// Orthogonal connector: down from the parent's bottom center, across the gap, down into the
/// child's top center. Edges without vertical room between the boxes are left out.
fn draw_edge(canvas: &mut Canvas, edge: &LayoutEdge, parent: CellBox, child: CellBox) {
    let (px, py) = (parent.center_x(), parent.y1);
    let (cx, cy) = (child.center_x(), child.y0);
    if cy < py + 2 {
        tracing::trace!(parent = %edge.parent(), child = %edge.child(), "no room for edge");
        return;
    }
    let mid = (py + cy) / 2;

    let dashed = edge.is_tentative() || edge.is_designed();
    let (stroke, vertical) =
        if dashed { (Stroke::Dashed, DASH_VERTICAL) } else { (Stroke::Solid, BOX_VERTICAL) };

    canvas.vline_clipped(px, py + 1, mid, vertical);
    canvas.hline_clipped(px, cx, mid, stroke);
    canvas.vline_clipped(cx, mid, cy - 1, vertical);
    if !dashed {
        canvas.set_clipped(px, py, BOX_TEE_DOWN);
        canvas.set_clipped(cx, cy, BOX_TEE_UP);
    }
}

fn box_spans(canvas: &Canvas, cells: CellBox) -> Vec<LineSpan> {
    let max_x = i64::try_from(canvas.width()).unwrap_or(i64::MAX) - 1;
    let max_y = i64::try_from(canvas.height()).unwrap_or(i64::MAX) - 1;
    let (x0, x1) = (cells.x0.max(0), cells.x1.min(max_x));
    if x0 > x1 {
        return Vec::new();
    }

    (cells.y0.max(0)..=cells.y1.min(max_y))
        .filter_map(|y| {
            let y = usize::try_from(y).ok()?;
            Some((y, usize::try_from(x0).ok()?, usize::try_from(x1).ok()?))
        })
        .collect()
}

pub(crate) fn clamp_highlight_index_to_text(index: &mut HighlightIndex, text: &str) {
    let line_lens = text.split('\n').map(text_len).collect::<Vec<_>>();

    index.retain(|_, spans| {
        spans.retain_mut(|(y, x0, x1)| match line_lens.get(*y) {
            Some(&len) if len > 0 && *x0 < len => {
                *x1 = (*x1).min(len - 1);
                true
            }
            _ => false,
        });
        !spans.is_empty()
    });
}
