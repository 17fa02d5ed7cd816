// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use thiserror::Error;

pub const BOX_HORIZONTAL: char = '─';
pub const BOX_VERTICAL: char = '│';
pub const BOX_TOP_LEFT: char = '┌';
pub const BOX_TOP_RIGHT: char = '┐';
pub const BOX_BOTTOM_LEFT: char = '└';
pub const BOX_BOTTOM_RIGHT: char = '┘';
pub const BOX_TEE_RIGHT: char = '├';
pub const BOX_TEE_LEFT: char = '┤';
pub const BOX_TEE_DOWN: char = '┬';
pub const BOX_TEE_UP: char = '┴';
pub const BOX_CROSS: char = '┼';

pub const DASH_HORIZONTAL: char = '╌';
pub const DASH_VERTICAL: char = '╎';
pub const DOTTED_VERTICAL: char = '┊';

/// Stroke used for box outlines and connectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stroke {
    /// Box-drawing lines that merge into junctions where they meet.
    #[default]
    Solid,
    /// Dashed lines; these overwrite instead of merging.
    Dashed,
}

impl Stroke {
    fn horizontal(self) -> char {
        match self {
            Self::Solid => BOX_HORIZONTAL,
            Self::Dashed => DASH_HORIZONTAL,
        }
    }

    fn vertical(self) -> char {
        match self {
            Self::Solid => BOX_VERTICAL,
            Self::Dashed => DASH_VERTICAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edges(u8);

impl Edges {
    const NONE: Self = Self(0);
    const LEFT: Self = Self(1 << 0);
    const RIGHT: Self = Self(1 << 1);
    const UP: Self = Self(1 << 2);
    const DOWN: Self = Self(1 << 3);

    fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn contains(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    fn of(ch: char) -> Option<Self> {
        let (l, r, u, d) = (Self::LEFT, Self::RIGHT, Self::UP, Self::DOWN);
        let edges = match ch {
            BOX_HORIZONTAL => l.union(r),
            BOX_VERTICAL => u.union(d),
            BOX_TOP_LEFT => r.union(d),
            BOX_TOP_RIGHT => l.union(d),
            BOX_BOTTOM_LEFT => r.union(u),
            BOX_BOTTOM_RIGHT => l.union(u),
            BOX_TEE_RIGHT => u.union(d).union(r),
            BOX_TEE_LEFT => u.union(d).union(l),
            BOX_TEE_DOWN => l.union(r).union(d),
            BOX_TEE_UP => l.union(r).union(u),
            BOX_CROSS => l.union(r).union(u).union(d),
            _ => return None,
        };
        Some(edges)
    }

    fn glyph(self) -> char {
        match self.0 {
            0 => ' ',
            1..=3 => BOX_HORIZONTAL,
            4 | 8 | 12 => BOX_VERTICAL,
            10 => BOX_TOP_LEFT,
            9 => BOX_TOP_RIGHT,
            6 => BOX_BOTTOM_LEFT,
            5 => BOX_BOTTOM_RIGHT,
            14 => BOX_TEE_RIGHT,
            13 => BOX_TEE_LEFT,
            11 => BOX_TEE_DOWN,
            7 => BOX_TEE_UP,
            _ => BOX_CROSS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("canvas area overflow: {width}*{height}")]
    AreaOverflow { width: usize, height: usize },
    #[error("out of bounds: ({x},{y}) for {width}x{height} canvas")]
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
}

/// A fixed-size character grid.
///
/// Plain characters overwrite (last writer wins). Solid box-drawing characters merge into
/// junctions with their neighbors instead. The `*_clipped` helpers take signed coordinates and
/// silently drop cells that fall outside, which is what gesture offsets need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    edges: Vec<Edges>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width.checked_mul(height).ok_or(CanvasError::AreaOverflow { width, height })?;
        Ok(Self { width, height, cells: vec![' '; len], edges: vec![Edges::NONE; len] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.glyph_at(x, y, idx))
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        match Edges::of(ch) {
            Some(edges) => self.edges[idx] = self.edges[idx].union(edges),
            None => {
                self.cells[idx] = ch;
                self.edges[idx] = Edges::NONE;
            }
        }
        Ok(())
    }

    /// Like [`Self::set`], but ignores cells outside the grid.
    pub fn set_clipped(&mut self, x: i64, y: i64, ch: char) {
        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
            // Out-of-range cells are dropped on purpose.
            let _ = self.set(x, y, ch);
        }
    }

    /// Writes `text` from `(x, y)` rightwards, clipping at both edges.
    pub fn write_clipped(&mut self, x: i64, y: i64, text: &str) {
        for (offset, ch) in (0_i64..).zip(text.chars()) {
            self.set_clipped(x + offset, y, ch);
        }
    }

    pub fn hline_clipped(&mut self, x0: i64, x1: i64, y: i64, stroke: Stroke) {
        for x in x0.min(x1)..=x0.max(x1) {
            self.set_clipped(x, y, stroke.horizontal());
        }
    }

    pub fn vline_clipped(&mut self, x: i64, y0: i64, y1: i64, ch: char) {
        for y in y0.min(y1)..=y0.max(y1) {
            self.set_clipped(x, y, ch);
        }
    }

    /// Outlines the box with corners `(x0, y0)` and `(x1, y1)`, inclusive.
    pub fn box_clipped(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, stroke: Stroke) {
        let (min_x, max_x) = (x0.min(x1), x0.max(x1));
        let (min_y, max_y) = (y0.min(y1), y0.max(y1));
        if min_x == max_x || min_y == max_y {
            return;
        }

        for x in (min_x + 1)..max_x {
            self.set_clipped(x, min_y, stroke.horizontal());
            self.set_clipped(x, max_y, stroke.horizontal());
        }
        for y in (min_y + 1)..max_y {
            self.set_clipped(min_x, y, stroke.vertical());
            self.set_clipped(max_x, y, stroke.vertical());
        }
        self.set_clipped(min_x, min_y, BOX_TOP_LEFT);
        self.set_clipped(max_x, min_y, BOX_TOP_RIGHT);
        self.set_clipped(min_x, max_y, BOX_BOTTOM_LEFT);
        self.set_clipped(max_x, max_y, BOX_BOTTOM_RIGHT);
    }

    /// Fills the inside of a box (excluding its outline) with `ch`.
    pub fn fill_inside_clipped(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, ch: char) {
        for y in (y0.min(y1) + 1)..y0.max(y1) {
            for x in (x0.min(x1) + 1)..x0.max(x1) {
                self.set_clipped(x, y, ch);
            }
        }
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok((y * self.width) + x)
    }

    fn glyph_at(&self, x: usize, y: usize, idx: usize) -> char {
        let edges = self.edges[idx];
        if edges.is_empty() {
            return self.cells[idx];
        }

        let connected = self.connected_edges(x, y, edges);
        if connected.is_empty() {
            edges.glyph()
        } else {
            connected.glyph()
        }
    }

    /// The subset of `edges` that a neighbor actually meets.
    fn connected_edges(&self, x: usize, y: usize, edges: Edges) -> Edges {
        let neighbor = |nx: usize, ny: usize, facing: Edges| {
            self.edges[(ny * self.width) + nx].contains(facing)
        };

        let mut connected = Edges::NONE;
        if edges.contains(Edges::LEFT) && x > 0 && neighbor(x - 1, y, Edges::RIGHT) {
            connected = connected.union(Edges::LEFT);
        }
        if edges.contains(Edges::RIGHT) && x + 1 < self.width && neighbor(x + 1, y, Edges::LEFT) {
            connected = connected.union(Edges::RIGHT);
        }
        if edges.contains(Edges::UP) && y > 0 && neighbor(x, y - 1, Edges::DOWN) {
            connected = connected.union(Edges::UP);
        }
        if edges.contains(Edges::DOWN) && y + 1 < self.height && neighbor(x, y + 1, Edges::UP) {
            connected = connected.union(Edges::DOWN);
        }
        connected
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            for x in 0..self.width {
                f.write_char(self.glyph_at(x, y, (y * self.width) + x))?;
            }
            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}
