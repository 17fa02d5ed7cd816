// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The input port hosts drive gestures through.
//!
//! A host forwards pointer-down (as one of the `start_*` calls), pointer-move and pointer-up
//! from whatever event source it has. Results come back through a [`GestureSink`]; the host
//! persists them, recomputes the layout, and passes the fresh layout in on the next sample.

use serde::Serialize;

use super::geometry::RenderOffsets;
use super::link::LinkGesture;
use super::reorder::ReorderGesture;
use super::separator::SeparatorGesture;
use crate::layout::{ForestLayout, LayoutMetrics, Point};
use crate::model::{BranchId, SiblingOrder};

/// Read-only inputs every gesture call sees.
#[derive(Debug, Clone, Copy)]
pub struct GestureContext<'a> {
    pub layout: &'a ForestLayout,
    pub sibling_order: &'a SiblingOrder,
    pub separator_index: Option<usize>,
    pub metrics: &'a LayoutMetrics,
}

/// Receives the values gestures hand back to the host.
pub trait GestureSink {
    /// The complete new sibling-order map, reported once on release when it changed.
    fn sibling_order_changed(&mut self, _order: SiblingOrder) {}

    /// Reported on every separator step, during separator drags and column drags alike.
    fn focus_separator_index_changed(&mut self, _index: Option<usize>) {}

    fn edge_requested(&mut self, _parent: BranchId, _child: BranchId) {}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum GestureEvent {
    SiblingOrderChanged(SiblingOrder),
    FocusSeparatorIndexChanged(Option<usize>),
    EdgeRequested { parent: BranchId, child: BranchId },
}

impl GestureSink for Vec<GestureEvent> {
    fn sibling_order_changed(&mut self, order: SiblingOrder) {
        self.push(GestureEvent::SiblingOrderChanged(order));
    }

    fn focus_separator_index_changed(&mut self, index: Option<usize>) {
        self.push(GestureEvent::FocusSeparatorIndexChanged(index));
    }

    fn edge_requested(&mut self, parent: BranchId, child: BranchId) {
        self.push(GestureEvent::EdgeRequested { parent, child });
    }
}

/// Holds at most one gesture of each kind.
#[derive(Debug, Clone, Default)]
pub struct GestureHost {
    reorder: Option<ReorderGesture>,
    separator: Option<SeparatorGesture>,
    link: Option<LinkGesture>,
}

impl GestureHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a column drag on `id`; `false` when one is already running or `id` can't move.
    pub fn start_reorder(&mut self, ctx: &GestureContext<'_>, id: &str, pointer: Point) -> bool {
        if self.reorder.is_some() {
            return false;
        }
        self.reorder = ReorderGesture::start(ctx, id, pointer);
        self.reorder.is_some()
    }

    pub fn start_separator(&mut self, ctx: &GestureContext<'_>) -> bool {
        if self.separator.is_some() {
            return false;
        }
        self.separator = SeparatorGesture::start(ctx);
        self.separator.is_some()
    }

    pub fn start_link(&mut self, ctx: &GestureContext<'_>, id: &str, pointer: Point) -> bool {
        if self.link.is_some() {
            return false;
        }
        self.link = LinkGesture::start(ctx, id, pointer);
        self.link.is_some()
    }

    pub fn pointer_move(
        &mut self,
        ctx: &GestureContext<'_>,
        pointer: Point,
        sink: &mut impl GestureSink,
    ) {
        if let Some(gesture) = self.reorder.as_mut() {
            gesture.pointer_move(ctx, pointer, sink);
        }
        if let Some(gesture) = self.separator.as_mut() {
            gesture.pointer_move(ctx, pointer, sink);
        }
        if let Some(gesture) = self.link.as_mut() {
            gesture.pointer_move(pointer);
        }
    }

    /// Ends every active gesture at the last position passed to [`Self::pointer_move`].
    pub fn pointer_up(&mut self, ctx: &GestureContext<'_>, sink: &mut impl GestureSink) {
        let offsets = self.offsets(ctx);
        if let Some(gesture) = self.reorder.take() {
            gesture.pointer_up(ctx, sink);
        }
        if let Some(gesture) = self.separator.take() {
            gesture.pointer_up();
        }
        if let Some(gesture) = self.link.take() {
            gesture.pointer_up(ctx, &offsets, sink);
        }
    }

    pub fn is_idle(&self) -> bool {
        self.reorder.is_none() && self.separator.is_none() && self.link.is_none()
    }

    pub fn reorder(&self) -> Option<&ReorderGesture> {
        self.reorder.as_ref()
    }

    pub fn separator(&self) -> Option<&SeparatorGesture> {
        self.separator.as_ref()
    }

    pub fn link(&self) -> Option<&LinkGesture> {
        self.link.as_ref()
    }

    /// Rendering offsets for the current frame.
    pub fn offsets(&self, ctx: &GestureContext<'_>) -> RenderOffsets {
        RenderOffsets::compute(ctx, self.reorder.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::{GestureEvent, GestureHost, GestureSink};
    use crate::gesture::test_support::{features_layout, Scene};
    use crate::layout::Point;
    use crate::model::fixtures::bid;

    #[derive(Default)]
    struct EdgesOnly(Vec<(String, String)>);

    impl GestureSink for EdgesOnly {
        fn edge_requested(&mut self, parent: crate::model::BranchId, child: crate::model::BranchId) {
            self.0.push((parent.to_string(), child.to_string()));
        }
    }

    #[test]
    fn one_gesture_per_kind() {
        let scene = Scene::new(features_layout(), None);
        let ctx = scene.ctx();
        let mut host = GestureHost::new();

        assert!(host.start_reorder(&ctx, "feature-a", Point::new(114.0, 120.0)));
        assert!(!host.start_reorder(&ctx, "feature-b", Point::new(318.0, 120.0)));
        assert!(host.start_separator(&ctx));
        assert!(!host.start_separator(&ctx));
        assert!(!host.is_idle());

        host.pointer_up(&ctx, &mut Vec::<GestureEvent>::new());
        assert!(host.is_idle());
    }

    #[test]
    fn offsets_follow_the_dragged_column() {
        let scene = Scene::new(features_layout(), None);
        let ctx = scene.ctx();
        let mut host = GestureHost::new();

        host.start_reorder(&ctx, "feature-a", Point::new(114.0, 120.0));
        host.pointer_move(&ctx, Point::new(320.0, 120.0), &mut Vec::<GestureEvent>::new());
        let offsets = host.offsets(&ctx);

        assert_eq!(offsets.dragging(), Some(&bid("feature-a")));
        assert_eq!(offsets.offset("feature-a"), 206.0);
        assert_eq!(offsets.offset("feature-a-2"), 206.0);
        assert_eq!(offsets.offset("feature-b"), -204.0);
        assert_eq!(offsets.offset("feature-c"), 0.0);
        assert_eq!(offsets.offset("main"), 0.0);
    }

    #[test]
    fn sinks_only_see_what_they_ask_for() {
        let scene = Scene::new(features_layout(), None);
        let ctx = scene.ctx();
        let mut host = GestureHost::new();
        let mut sink = EdgesOnly::default();

        host.start_link(&ctx, "feature-b", Point::new(318.0, 120.0));
        host.pointer_move(&ctx, Point::new(522.0, 120.0), &mut sink);
        host.pointer_up(&ctx, &mut sink);

        assert_eq!(sink.0, vec![("feature-c".to_owned(), "feature-b".to_owned())]);
    }

    #[test]
    fn events_serialize_with_a_tag() {
        let event = GestureEvent::FocusSeparatorIndexChanged(Some(2));
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            serde_json::json!({ "event": "focus_separator_index_changed", "value": 2 })
        );
    }
}
