// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Continuous panel-space geometry.
//!
//! Panel coordinates are pixels with the origin at the panel's top-left corner and Y growing
//! downwards. Nothing here is grid-snapped unless a function says so.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Snaps both coordinates to the nearest multiple of `step`.
    pub fn snapped(self, step: f64) -> Self {
        Self { x: snap(self.x, step), y: snap(self.y, step) }
    }

    pub fn is_axis_aligned_with(self, other: Point) -> bool {
        self.x == other.x || self.y == other.y
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rounds `value` to the nearest multiple of `step`, halves away from zero.
pub fn snap(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

/// Axis-aligned rectangle, `w` and `h` non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// One `step`-sized square centred on `(cx, cy)`.
    pub fn cell(cx: f64, cy: f64, step: f64) -> Self {
        Self { x: cx - step / 2.0, y: cy - step / 2.0, w: step, h: step }
    }

    /// Grows the rectangle by `margin` on every side.
    pub fn inflate(self, margin: f64) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            w: self.w + 2.0 * margin,
            h: self.h + 2.0 * margin,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    /// Smallest rectangle covering both endpoints of an axis-aligned segment.
    pub fn spanning(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self { x, y, w: (a.x - b.x).abs(), h: (a.y - b.y).abs() }
    }

    /// Whether the open interior of the rectangle meets the segment `a-b`.
    ///
    /// Only axis-aligned segments are supported; a diagonal segment is tested against its
    /// bounding box, which over-reports.
    pub fn interior_intersects_segment(&self, a: Point, b: Point) -> bool {
        let seg = Rect::spanning(a, b);
        let overlap_x = if seg.w == 0.0 {
            seg.x > self.x && seg.x < self.right()
        } else {
            seg.x < self.right() && seg.right() > self.x
        };
        let overlap_y = if seg.h == 0.0 {
            seg.y > self.y && seg.y < self.bottom()
        } else {
            seg.y < self.bottom() && seg.bottom() > self.y
        };
        overlap_x && overlap_y
    }
}
