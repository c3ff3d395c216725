// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Map-space geometry helpers.
//!
//! An *extent* is an axis-aligned bounding box in map coordinates,
//! represented directly as a [`kurbo::Rect`] (`x0`/`y0` = min corner,
//! `x1`/`y1` = max corner). A *resolution* is the number of map units
//! covered by one raster pixel.

/// An axis-aligned bounding box in map coordinates.
pub type Extent = kurbo::Rect;

/// Derives the resolution of a raster covering `extent` from its pixel
/// height.
///
/// This is the lazy inference applied on the first successful load of an
/// image whose resolution was not specified up front: the extent is fixed at
/// creation, the pixel height becomes known once the raster is decoded.
///
/// # Panics
///
/// Panics if `pixel_height` is zero.
#[must_use]
pub fn resolution_for_height(extent: &Extent, pixel_height: u32) -> f64 {
    assert!(pixel_height > 0, "raster pixel height must be nonzero");
    extent.height() / f64::from(pixel_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_is_map_units_per_pixel() {
        let extent = Extent::new(0.0, 0.0, 200.0, 100.0);
        let eps = 1e-12;
        assert!((resolution_for_height(&extent, 50) - 2.0).abs() < eps);
        assert!((resolution_for_height(&extent, 100) - 1.0).abs() < eps);
    }

    #[test]
    fn resolution_uses_height_not_width() {
        let extent = Extent::new(0.0, 0.0, 1000.0, 100.0);
        let eps = 1e-12;
        assert!((resolution_for_height(&extent, 100) - 1.0).abs() < eps);
    }

    #[test]
    #[should_panic(expected = "raster pixel height must be nonzero")]
    fn zero_pixel_height_panics() {
        let extent = Extent::new(0.0, 0.0, 10.0, 10.0);
        let _ = resolution_for_height(&extent, 0);
    }
}
