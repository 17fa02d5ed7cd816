// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::focus::effective_separator_index;
use super::geometry::{root_row, Slot};
use super::port::{GestureContext, GestureSink};
use crate::layout::{Point, Rect};

/// Dragging the focus separator across the root siblings.
///
/// Every index change is reported as it happens; releasing only drops the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorGesture {
    index: usize,
}

impl SeparatorGesture {
    pub fn start(ctx: &GestureContext<'_>) -> Option<Self> {
        let roots = ctx.layout.root_siblings().len();
        if roots == 0 {
            return None;
        }
        Some(Self { index: effective_separator_index(ctx.separator_index, roots) })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn pointer_move(
        &mut self,
        ctx: &GestureContext<'_>,
        pointer: Point,
        sink: &mut impl GestureSink,
    ) {
        let columns = root_row(ctx.layout, ctx.metrics, self.index)
            .into_iter()
            .filter(|placed| matches!(placed.slot, Slot::Column(_)))
            .map(|placed| placed.rect)
            .collect::<Vec<Rect>>();

        let left = self.index.checked_sub(1).and_then(|idx| columns.get(idx));
        let right = columns.get(self.index);
        if left.is_some_and(|rect| pointer.x < rect.left()) {
            self.index -= 1;
        } else if right.is_some_and(|rect| pointer.x > rect.right()) {
            self.index += 1;
        } else {
            return;
        }

        tracing::debug!(separator = self.index, "separator moved");
        sink.focus_separator_index_changed(Some(self.index));
    }

    pub fn pointer_up(self) {
        tracing::debug!(separator = self.index, "separator released");
    }
}

#[cfg(test)]
mod tests {
    use super::SeparatorGesture;
    use crate::gesture::focus::unfocused_ids;
    use crate::gesture::port::GestureEvent;
    use crate::gesture::test_support::{features_layout, Scene};
    use crate::layout::Point;

    fn indices(events: &[GestureEvent]) -> Vec<Option<usize>> {
        events
            .iter()
            .filter_map(|event| match event {
                GestureEvent::FocusSeparatorIndexChanged(index) => Some(*index),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn null_index_starts_at_the_end() {
        let scene = Scene::new(features_layout(), None);
        let gesture = SeparatorGesture::start(&scene.ctx()).expect("start");
        assert_eq!(gesture.index(), 3);
    }

    #[test]
    fn crossing_whole_columns_moves_one_step_per_sample() {
        // [a, |, b, c]: b spans 260..440, c spans 464..644.
        let scene = Scene::new(features_layout(), Some(1));
        let ctx = scene.ctx();
        let mut events = Vec::<GestureEvent>::new();

        let mut gesture = SeparatorGesture::start(&ctx).expect("start");
        gesture.pointer_move(&ctx, Point::new(300.0, 0.0), &mut events);
        assert!(events.is_empty());
        gesture.pointer_move(&ctx, Point::new(900.0, 0.0), &mut events);
        gesture.pointer_move(&ctx, Point::new(900.0, 0.0), &mut events);
        gesture.pointer_move(&ctx, Point::new(900.0, 0.0), &mut events);

        assert_eq!(indices(&events), vec![Some(2), Some(3)]);
        assert_eq!(gesture.index(), 3);
    }

    #[test]
    fn round_trip_restores_the_partition() {
        let layout = features_layout();
        let before = unfocused_ids(&layout, Some(1));
        let mut scene = Scene::new(layout, Some(1));
        let mut events = Vec::<GestureEvent>::new();

        let mut gesture = SeparatorGesture::start(&scene.ctx()).expect("start");
        for x in [450.0, 700.0] {
            gesture.pointer_move(&scene.ctx(), Point::new(x, 0.0), &mut events);
        }
        for _ in 0..3 {
            gesture.pointer_move(&scene.ctx(), Point::new(200.0, 0.0), &mut events);
        }
        gesture.pointer_up();

        assert_eq!(indices(&events), vec![Some(2), Some(3), Some(2), Some(1)]);
        scene.separator_index = indices(&events).last().copied().flatten();
        assert_eq!(unfocused_ids(&scene.layout, scene.separator_index), before);
    }

    #[test]
    fn no_root_siblings_means_no_separator() {
        let layout = crate::layout::layout_forest(
            &crate::model::Forest::new(crate::model::fixtures::bid("main")),
            &crate::layout::LayoutMetrics::pixels(),
            crate::layout::ValidationPolicy::Strict,
        )
        .expect("layout");
        let scene = Scene::new(layout, None);
        assert!(SeparatorGesture::start(&scene.ctx()).is_none());
    }
}
