// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::geometry::RenderOffsets;
use super::port::{GestureContext, GestureSink};
use crate::layout::{LayoutNode, Point};
use crate::model::BranchId;

/// Dragging from one node's body onto another to request a new parent edge.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkGesture {
    source: BranchId,
    pointer_start: Point,
    pointer: Point,
}

impl LinkGesture {
    pub fn start(ctx: &GestureContext<'_>, id: &str, pointer: Point) -> Option<Self> {
        let node = ctx.layout.node(id)?;
        if node.is_tentative() {
            return None;
        }
        Some(Self { source: node.id().clone(), pointer_start: pointer, pointer })
    }

    pub fn source(&self) -> &BranchId {
        &self.source
    }

    pub fn pointer_start(&self) -> Point {
        self.pointer_start
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// The node a release right now would link to, if the link would be valid.
    ///
    /// A branch is never linked under itself or its own descendants. Tentative tasks never
    /// take part.
    pub fn target<'l>(
        &self,
        ctx: &GestureContext<'l>,
        offsets: &RenderOffsets,
    ) -> Option<&'l LayoutNode> {
        let target = offsets.node_at(ctx.layout, self.pointer)?;
        let valid = !target.is_tentative()
            && target.id() != &self.source
            && !ctx.layout.is_in_subtree(self.source.as_str(), target.id().as_str());
        valid.then_some(target)
    }

    pub fn pointer_up(
        self,
        ctx: &GestureContext<'_>,
        offsets: &RenderOffsets,
        sink: &mut impl GestureSink,
    ) {
        let Some(target) = self.target(ctx, offsets) else {
            tracing::debug!(branch = %self.source, "link released over no valid target");
            return;
        };
        tracing::info!(parent = %target.id(), child = %self.source, "edge requested");
        sink.edge_requested(target.id().clone(), self.source);
    }
}
