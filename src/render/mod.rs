// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Unicode text rendering of laid-out forests.
//!
//! The renderer draws rendered coordinates (layout plus gesture offsets) onto a [`Canvas`] and
//! also returns a highlight index the TUI uses to style individual boxes.

pub mod canvas;
pub mod forest;
mod text;

pub use canvas::{Canvas, CanvasError, Stroke};
pub use forest::{
    render_forest_unicode, render_forest_unicode_annotated, AnnotatedRender, HighlightIndex,
    LineSpan, RenderError, RenderOptions,
};
