// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive gestures over a laid-out forest.
//!
//! Gestures are explicit state objects with `start`/`pointer_move`/`pointer_up` transitions.
//! They read a [`crate::layout::ForestLayout`] but never modify it: while active they only
//! produce [`RenderOffsets`], and when done they hand new values to a [`GestureSink`].

pub mod focus;
pub mod geometry;
pub mod link;
pub mod port;
pub mod reorder;
pub mod separator;

pub use focus::{effective_separator_index, is_unfocused, root_ancestor, unfocused_ids};
pub use geometry::{column_span, reflow, root_row, PlacedSlot, RenderOffsets, Slot};
pub use link::LinkGesture;
pub use port::{GestureContext, GestureEvent, GestureHost, GestureSink};
pub use reorder::ReorderGesture;
pub use separator::SeparatorGesture;

#[cfg(test)]
pub(crate) mod test_support {
    use super::port::GestureContext;
    use crate::layout::{layout_forest, ForestLayout, LayoutMetrics, ValidationPolicy};
    use crate::model::fixtures::three_features;
    use crate::model::SiblingOrder;

    /// `three_features` in pixel metrics: root siblings at x 24, 228 and 432, each 180 wide.
    pub(crate) fn features_layout() -> ForestLayout {
        layout_forest(&three_features(), &LayoutMetrics::pixels(), ValidationPolicy::Strict)
            .expect("layout")
    }

    pub(crate) struct Scene {
        pub layout: ForestLayout,
        pub sibling_order: SiblingOrder,
        pub separator_index: Option<usize>,
        pub metrics: LayoutMetrics,
    }

    impl Scene {
        pub(crate) fn new(layout: ForestLayout, separator_index: Option<usize>) -> Self {
            Self {
                layout,
                sibling_order: SiblingOrder::new(),
                separator_index,
                metrics: LayoutMetrics::pixels(),
            }
        }

        pub(crate) fn ctx(&self) -> GestureContext<'_> {
            GestureContext {
                layout: &self.layout,
                sibling_order: &self.sibling_order,
                separator_index: self.separator_index,
                metrics: &self.metrics,
            }
        }
    }
}
