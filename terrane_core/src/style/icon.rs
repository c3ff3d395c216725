// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flat icon style record.

use alloc::string::String;

use crate::image::{CrossOrigin, ImageId, RasterSize};

/// Units for one axis of an icon anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnchorUnits {
    /// Anchor coordinate is a fraction of the icon size (0.0–1.0).
    #[default]
    Fraction,
    /// Anchor coordinate is in pixels.
    Pixels,
}

/// The corner an icon anchor is measured from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IconOrigin {
    /// Measured from the top-left corner.
    #[default]
    TopLeft,
    /// Measured from the top-right corner.
    TopRight,
    /// Measured from the bottom-left corner.
    BottomLeft,
    /// Measured from the bottom-right corner.
    BottomRight,
}

/// An 8-bit RGBA color used to tint an icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Creates a color from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Presentation attributes for an icon.
///
/// A pass-through configuration record: no invariants are enforced between
/// fields. Consumers (render planning) resolve it against the decoded raster
/// at use time.
#[derive(Clone, Debug, PartialEq)]
pub struct IconStyle {
    /// Source locator of the icon raster, when the style carries one.
    pub src: Option<String>,
    /// The image resource presenting this icon, once bound.
    pub image: Option<ImageId>,
    /// Anchor point, interpreted per [`anchor_x_units`](Self::anchor_x_units)
    /// / [`anchor_y_units`](Self::anchor_y_units) from
    /// [`anchor_origin`](Self::anchor_origin).
    pub anchor: [f64; 2],
    /// Corner the anchor is measured from.
    pub anchor_origin: IconOrigin,
    /// Units of the anchor's x coordinate.
    pub anchor_x_units: AnchorUnits,
    /// Units of the anchor's y coordinate.
    pub anchor_y_units: AnchorUnits,
    /// Tint color, if any.
    pub color: Option<Rgba8>,
    /// Cross-origin policy for fetching the icon raster.
    pub cross_origin: Option<CrossOrigin>,
    /// Displacement of the rendered icon in pixels, y-up.
    pub displacement: [f64; 2],
    /// Opacity, 0.0–1.0.
    pub opacity: f64,
    /// Whether rotation follows the view rotation.
    pub rotate_with_view: bool,
    /// Rotation in radians, clockwise positive.
    pub rotation: f64,
    /// Uniform scale factor applied to the icon size.
    pub scale: f64,
    /// Whether the rendered position is snapped to whole pixels.
    pub snap_to_pixel: bool,
    /// Display size in pixels, when cropping or overriding the raster size.
    pub size: Option<RasterSize>,
    /// Intrinsic raster size, when known up front (or synced from a loaded
    /// resource).
    pub natural_size: Option<RasterSize>,
}

impl Default for IconStyle {
    /// A centered, unrotated, fully opaque icon at natural size.
    fn default() -> Self {
        Self {
            src: None,
            image: None,
            anchor: [0.5, 0.5],
            anchor_origin: IconOrigin::TopLeft,
            anchor_x_units: AnchorUnits::Fraction,
            anchor_y_units: AnchorUnits::Fraction,
            color: None,
            cross_origin: None,
            displacement: [0.0, 0.0],
            opacity: 1.0,
            rotate_with_view: false,
            rotation: 0.0,
            scale: 1.0,
            snap_to_pixel: true,
            size: None,
            natural_size: None,
        }
    }
}
