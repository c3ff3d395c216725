// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport mapping between map space and pixel space.

use kurbo::Point;
use terrane_core::geo::Extent;

/// The visible viewport: a map-space extent presented at a resolution.
///
/// Pixel space has its origin at the viewport's top-left (map-space min-x /
/// max-y corner) with y growing downward — map north-up flips to screen
/// y-down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    /// Visible map-space extent.
    pub extent: Extent,
    /// Map units per css pixel.
    pub resolution: f64,
    /// Device pixels per css pixel.
    pub pixel_ratio: f64,
}

impl View {
    /// Creates a view of `extent` at `resolution` with a pixel ratio of 1.
    #[must_use]
    pub const fn new(extent: Extent, resolution: f64) -> Self {
        Self {
            extent,
            resolution,
            pixel_ratio: 1.0,
        }
    }

    /// Maps a map-space point to css-pixel coordinates within the viewport.
    #[must_use]
    pub fn to_pixels(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.extent.x0) / self.resolution,
            (self.extent.y1 - p.y) / self.resolution,
        )
    }

    /// Returns whether a map-space point falls inside the viewport extent.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.extent.contains(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_min_x_max_y_to_pixel_origin() {
        let view = View::new(Extent::new(100.0, 0.0, 300.0, 100.0), 2.0);
        assert_eq!(view.to_pixels(Point::new(100.0, 100.0)), Point::ZERO);
    }

    #[test]
    fn y_axis_flips() {
        let view = View::new(Extent::new(0.0, 0.0, 100.0, 100.0), 1.0);
        // The map-space min-y edge is the bottom of the screen.
        assert_eq!(view.to_pixels(Point::new(0.0, 0.0)), Point::new(0.0, 100.0));
        assert_eq!(
            view.to_pixels(Point::new(50.0, 50.0)),
            Point::new(50.0, 50.0)
        );
    }

    #[test]
    fn resolution_scales_pixels() {
        let view = View::new(Extent::new(0.0, 0.0, 100.0, 100.0), 4.0);
        assert_eq!(
            view.to_pixels(Point::new(40.0, 100.0)),
            Point::new(10.0, 0.0)
        );
    }
}
