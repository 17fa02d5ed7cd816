// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Column drag-reorder.
//!
//! A [`ReorderGesture`] moves one sibling column against its siblings' live boxes. Crossing a
//! neighbor's far edge swaps the placeholder one slot. For root siblings the focus separator
//! takes part as a virtual slot; crossing it moves the separator instead of the column, so the
//! column order and the separator index stay consistent for the whole drag.

use super::focus::effective_separator_index;
use super::geometry::{column_span, reflow, static_origin, PlacedSlot, RenderOffsets, Slot};
use super::port::{GestureContext, GestureSink};
use crate::layout::{Point, Rect};
use crate::model::{BranchId, SiblingKey};

#[derive(Debug, Clone, PartialEq)]
pub struct ReorderGesture {
    dragging: BranchId,
    key: SiblingKey,
    siblings: Vec<BranchId>,
    original_index: usize,
    insert_index: usize,
    pointer_start: Point,
    pointer: Point,
    /// Pointer x minus the dragged column's rendered center at pointer-down.
    pointer_offset: f64,
    /// Working separator index; `Some` only while dragging root siblings.
    separator: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
enum Crossing {
    Left { separator: bool },
    Right { separator: bool },
}

impl ReorderGesture {
    /// Grabs `id`'s column. Tentative nodes and the default branch cannot be dragged.
    pub fn start(ctx: &GestureContext<'_>, id: &str, pointer: Point) -> Option<Self> {
        let layout = ctx.layout;
        let node = layout.node(id)?;
        if node.is_tentative() || node.id() == layout.default_branch() {
            return None;
        }

        let is_root = layout.root_siblings().contains(node.id());
        let siblings =
            if is_root { layout.root_siblings().to_vec() } else { node.siblings().to_vec() };
        let original_index = siblings.iter().position(|sibling| sibling == node.id())?;
        let separator =
            is_root.then(|| effective_separator_index(ctx.separator_index, siblings.len()));

        let at_rest = RenderOffsets::compute(ctx, None);
        let span = column_span(layout, id)?.shifted_x(at_rest.offset(id));

        tracing::debug!(branch = %node.id(), index = original_index, "column drag started");
        Some(Self {
            dragging: node.id().clone(),
            key: SiblingKey::for_parent(node.parent_branch()),
            siblings,
            original_index,
            insert_index: original_index,
            pointer_start: pointer,
            pointer,
            pointer_offset: pointer.x - span.center_x(),
            separator,
        })
    }

    pub fn dragging(&self) -> &BranchId {
        &self.dragging
    }

    pub fn key(&self) -> &SiblingKey {
        &self.key
    }

    pub fn original_index(&self) -> usize {
        self.original_index
    }

    /// Where the dragged column would land among its siblings if released now.
    pub fn insert_index(&self) -> usize {
        self.insert_index
    }

    pub fn pointer_start(&self) -> Point {
        self.pointer_start
    }

    /// The separator position this gesture has moved to, for root-sibling drags.
    pub fn separator_index(&self) -> Option<usize> {
        self.separator
    }

    /// Applies one pointer sample. At most one swap happens per sample, left checked first.
    pub fn pointer_move(
        &mut self,
        ctx: &GestureContext<'_>,
        pointer: Point,
        sink: &mut impl GestureSink,
    ) {
        self.pointer = pointer;

        let crossing = {
            let row = self.row(ctx);
            let Some(at) = row.iter().position(|placed| matches!(placed.slot, Slot::Dragged(_)))
            else {
                return;
            };
            let dragged = self.drag_rect(row[at].rect.width);

            let left = at.checked_sub(1).and_then(|idx| row.get(idx));
            let right = row.get(at + 1);
            match (left, right) {
                (Some(left), _) if dragged.left() < left.rect.left() => {
                    Some(Crossing::Left { separator: left.slot.is_separator() })
                }
                (_, Some(right)) if dragged.right() > right.rect.right() => {
                    Some(Crossing::Right { separator: right.slot.is_separator() })
                }
                _ => None,
            }
        };

        match crossing {
            Some(Crossing::Left { separator: true }) => self.shift_separator(1, sink),
            Some(Crossing::Left { separator: false }) => self.insert_index -= 1,
            Some(Crossing::Right { separator: true }) => self.shift_separator(-1, sink),
            Some(Crossing::Right { separator: false }) => self.insert_index += 1,
            None => {}
        }
    }

    /// Finishes the drag, reporting the new order only when it differs from the original.
    pub fn pointer_up(self, ctx: &GestureContext<'_>, sink: &mut impl GestureSink) {
        let order = self.final_order();
        if order == self.siblings {
            tracing::debug!(branch = %self.dragging, "column drag released without a change");
            return;
        }

        tracing::info!(
            branch = %self.dragging,
            key = %self.key,
            from = self.original_index,
            to = self.insert_index,
            "sibling order changed"
        );
        sink.sibling_order_changed(ctx.sibling_order.with(self.key, order));
    }

    /// Siblings with the dragged id re-spliced at the insert index.
    pub fn final_order(&self) -> Vec<BranchId> {
        let mut order = self
            .siblings
            .iter()
            .filter(|sibling| **sibling != self.dragging)
            .cloned()
            .collect::<Vec<_>>();
        order.insert(self.insert_index.min(order.len()), self.dragging.clone());
        order
    }

    pub(crate) fn overlay(&self, ctx: &GestureContext<'_>, offsets: &mut RenderOffsets) {
        let layout = ctx.layout;
        for placed in self.row(ctx) {
            match placed.slot {
                Slot::Column(id) => {
                    if let Some(span) = column_span(layout, id.as_str()) {
                        offsets.set_subtree(layout, id, placed.rect.left() - span.left());
                    }
                }
                Slot::Dragged(id) => {
                    if let Some(span) = column_span(layout, id.as_str()) {
                        let rendered = self.drag_rect(span.width);
                        offsets.set_subtree(layout, id, rendered.left() - span.left());
                    }
                }
                Slot::Separator => offsets.set_separator(placed.rect),
            }
        }
        offsets.set_dragging(self.dragging.clone());
    }

    fn slots(&self) -> Vec<Slot<'_>> {
        let mut slots = self
            .siblings
            .iter()
            .filter(|sibling| **sibling != self.dragging)
            .map(Slot::Column)
            .collect::<Vec<_>>();
        slots.insert(self.insert_index.min(slots.len()), Slot::Dragged(&self.dragging));
        if let Some(separator) = self.separator {
            slots.insert(separator.min(slots.len()), Slot::Separator);
        }
        slots
    }

    /// The sibling row in rendered coordinates for the current frame.
    fn row(&self, ctx: &GestureContext<'_>) -> Vec<PlacedSlot<'_>> {
        let layout = ctx.layout;
        let mut origin = static_origin(layout, &self.siblings);
        if self.separator.is_none() {
            // Nested groups ride along with their root sibling's focus shift.
            let at_rest = RenderOffsets::compute(ctx, None);
            if let Some(first) = self.siblings.first() {
                origin += at_rest.offset(first.as_str());
            }
        }
        reflow(layout, ctx.metrics, &self.slots(), origin)
    }

    fn drag_rect(&self, width: f64) -> Rect {
        let center = self.pointer.x - self.pointer_offset;
        Rect::new(center - width / 2.0, self.pointer.y, width, 0.0)
    }

    fn shift_separator(&mut self, delta: isize, sink: &mut impl GestureSink) {
        let Some(separator) = self.separator.as_mut() else {
            return;
        };
        *separator = separator.saturating_add_signed(delta);
        tracing::debug!(branch = %self.dragging, separator = *separator, "column crossed separator");
        sink.focus_separator_index_changed(Some(*separator));
    }
}
