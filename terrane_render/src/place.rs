// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icon placement: resolving a style against a decoded raster.

use terrane_core::image::{Raster, RasterKey};
use terrane_core::style::{AnchorUnits, IconOrigin, IconStyle};

/// A style resolved against a decoded raster, ready to draw.
///
/// `offset` places the icon's top-left corner relative to the feature's
/// pixel position; `size` is the rendered size. Both are in css pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedIcon {
    /// Top-left corner relative to the feature position, css pixels.
    pub offset: [f64; 2],
    /// Rendered size, css pixels.
    pub size: [f64; 2],
    /// Rotation in radians, clockwise positive.
    pub rotation: f64,
    /// Whether rotation follows the view rotation.
    pub rotate_with_view: bool,
    /// Opacity, 0.0–1.0.
    pub opacity: f64,
    /// Backing storage key of the decoded raster, if assigned.
    pub key: Option<RasterKey>,
}

/// Resolves `style` against the raster it presents.
///
/// The pixel size is taken from the style's display `size` when set,
/// otherwise from the decoded raster, otherwise from the style's
/// `natural_size`. Returns `None` when no size is known yet — an icon
/// without dimensions cannot be placed.
///
/// Resolution steps:
///
/// 1. Convert the anchor to pixels per its per-axis units.
/// 2. Re-measure it from the top-left corner per the anchor origin.
/// 3. Divide by `pixel_ratio` (device pixels per css pixel) and multiply by
///    the style scale.
/// 4. Apply the displacement (y-up, so a positive y displaces upward on
///    screen) and, when pixel snapping is on, round to whole pixels.
#[must_use]
pub fn resolve(style: &IconStyle, raster: &Raster, pixel_ratio: f64) -> Option<ResolvedIcon> {
    let size = style.size.or(raster.size).or(style.natural_size)?;
    let width = f64::from(size.width);
    let height = f64::from(size.height);

    // Anchor in raster pixels, measured from the anchor origin.
    let mut ax = match style.anchor_x_units {
        AnchorUnits::Fraction => style.anchor[0] * width,
        AnchorUnits::Pixels => style.anchor[0],
    };
    let mut ay = match style.anchor_y_units {
        AnchorUnits::Fraction => style.anchor[1] * height,
        AnchorUnits::Pixels => style.anchor[1],
    };

    // Re-measure from the top-left corner.
    match style.anchor_origin {
        IconOrigin::TopLeft => {}
        IconOrigin::TopRight => ax = width - ax,
        IconOrigin::BottomLeft => ay = height - ay,
        IconOrigin::BottomRight => {
            ax = width - ax;
            ay = height - ay;
        }
    }

    // Raster pixels → css pixels, then scale.
    let to_css = style.scale / pixel_ratio;
    let rendered = [width * to_css, height * to_css];
    let mut offset = [
        -ax * to_css + style.displacement[0],
        -ay * to_css - style.displacement[1],
    ];

    if style.snap_to_pixel {
        offset = [libm::round(offset[0]), libm::round(offset[1])];
    }

    Some(ResolvedIcon {
        offset,
        size: rendered,
        rotation: style.rotation,
        rotate_with_view: style.rotate_with_view,
        opacity: style.opacity,
        key: raster.key,
    })
}

#[cfg(test)]
mod tests {
    use terrane_core::image::{RasterKey, RasterSize};

    use super::*;

    fn decoded(width: u32, height: u32) -> Raster {
        Raster::decoded(RasterKey(1), RasterSize::new(width, height))
    }

    #[test]
    fn default_style_centers_the_icon() {
        let icon = resolve(&IconStyle::default(), &decoded(10, 10), 1.0).expect("sized");
        assert_eq!(icon.offset, [-5.0, -5.0]);
        assert_eq!(icon.size, [10.0, 10.0]);
        assert_eq!(icon.key, Some(RasterKey(1)));
    }

    #[test]
    fn no_size_anywhere_is_unplaceable() {
        assert!(resolve(&IconStyle::default(), &Raster::default(), 1.0).is_none());
    }

    #[test]
    fn natural_size_is_the_fallback() {
        let style = IconStyle {
            natural_size: Some(RasterSize::new(4, 4)),
            ..IconStyle::default()
        };
        let icon = resolve(&style, &Raster::default(), 1.0).expect("sized");
        assert_eq!(icon.size, [4.0, 4.0]);
        assert_eq!(icon.key, None);
    }

    #[test]
    fn pixel_anchor_from_bottom_right() {
        let style = IconStyle {
            anchor: [2.0, 3.0],
            anchor_x_units: AnchorUnits::Pixels,
            anchor_y_units: AnchorUnits::Pixels,
            anchor_origin: IconOrigin::BottomRight,
            ..IconStyle::default()
        };
        let icon = resolve(&style, &decoded(10, 10), 1.0).expect("sized");
        // 2px from the right edge is 8px from the left; 3px from the bottom
        // is 7px from the top.
        assert_eq!(icon.offset, [-8.0, -7.0]);
    }

    #[test]
    fn displacement_shifts_y_up() {
        let style = IconStyle {
            displacement: [2.0, 3.0],
            ..IconStyle::default()
        };
        let icon = resolve(&style, &decoded(10, 10), 1.0).expect("sized");
        assert_eq!(icon.offset, [-3.0, -8.0]);
    }

    #[test]
    fn scale_grows_size_and_anchor() {
        let style = IconStyle {
            scale: 2.0,
            ..IconStyle::default()
        };
        let icon = resolve(&style, &decoded(10, 10), 1.0).expect("sized");
        assert_eq!(icon.size, [20.0, 20.0]);
        assert_eq!(icon.offset, [-10.0, -10.0]);
    }

    #[test]
    fn pixel_ratio_shrinks_css_size() {
        let icon = resolve(&IconStyle::default(), &decoded(20, 20), 2.0).expect("sized");
        assert_eq!(icon.size, [10.0, 10.0]);
        assert_eq!(icon.offset, [-5.0, -5.0]);
    }

    #[test]
    fn snapping_rounds_offsets() {
        let style = IconStyle {
            anchor: [0.5, 0.5],
            ..IconStyle::default()
        };
        let snapped = resolve(&style, &decoded(5, 5), 1.0).expect("sized");
        assert_eq!(snapped.offset, [-3.0, -3.0]);

        let unsnapped = resolve(
            &IconStyle {
                snap_to_pixel: false,
                ..style
            },
            &decoded(5, 5),
            1.0,
        )
        .expect("sized");
        assert_eq!(unsnapped.offset, [-2.5, -2.5]);
    }

    #[test]
    fn display_size_overrides_raster_size() {
        let style = IconStyle {
            size: Some(RasterSize::new(6, 8)),
            ..IconStyle::default()
        };
        let icon = resolve(&style, &decoded(100, 100), 1.0).expect("sized");
        assert_eq!(icon.size, [6.0, 8.0]);
        assert_eq!(icon.offset, [-3.0, -4.0]);
    }
}
