// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canopy: a columnar branch-forest layout engine with drag gestures.
//!
//! - [`model`] holds the forest (branches, parent edges, tentative plans, sibling order).
//! - [`layout`] turns a forest into positioned rectangles.
//! - [`gesture`] drives column reorder, focus-separator and link drags over a layout.
//! - [`render`] draws a layout as Unicode box art.
//! - [`store`] persists forest documents and view state.
//! - [`tui`] wires all of the above into an interactive terminal view.

pub mod gesture;
pub mod layout;
pub mod model;
pub mod render;
pub mod store;
pub mod tui;
