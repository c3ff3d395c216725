// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rebuild-and-push style collector.

use alloc::string::String;

use crate::feature::{FeatureId, FeatureStore};
use crate::image::{CrossOrigin, ImageChanges, ImageId, ImageStore, RasterSize};

use super::icon::{AnchorUnits, IconOrigin, IconStyle, Rgba8};

/// Collects icon style inputs for a single host feature.
///
/// A binding gathers individually-set optional inputs and, on every
/// mutation, rebuilds a complete [`IconStyle`] (set inputs over defaults)
/// and pushes it into the host via [`FeatureStore::set_style`]. There is no
/// partial update: the style is always re-derived whole, so input order
/// never matters.
///
/// A binding may additionally watch one image resource
/// ([`watch_image`](Self::watch_image) at setup,
/// [`unwatch_image`](Self::unwatch_image) at teardown — the subscription is
/// taken once and released once). While watching, [`sync`](Self::sync)
/// re-pushes the style whenever the watched resource appears in a drained
/// [`ImageChanges`], picking up the decoded natural size.
#[derive(Debug)]
pub struct IconBinding {
    feature: FeatureId,
    image: Option<ImageId>,

    // Collected inputs; `None` means "use the style default".
    src: Option<String>,
    anchor: Option<[f64; 2]>,
    anchor_origin: Option<IconOrigin>,
    anchor_x_units: Option<AnchorUnits>,
    anchor_y_units: Option<AnchorUnits>,
    color: Option<Rgba8>,
    cross_origin: Option<CrossOrigin>,
    displacement: Option<[f64; 2]>,
    opacity: Option<f64>,
    rotate_with_view: Option<bool>,
    rotation: Option<f64>,
    scale: Option<f64>,
    snap_to_pixel: Option<bool>,
    size: Option<RasterSize>,
    natural_size: Option<RasterSize>,
}

impl IconBinding {
    /// Creates a binding for the given host feature with no inputs set.
    ///
    /// Nothing is pushed until the first input mutation (or an explicit
    /// [`push`](Self::push)).
    #[must_use]
    pub fn new(feature: FeatureId) -> Self {
        Self {
            feature,
            image: None,
            src: None,
            anchor: None,
            anchor_origin: None,
            anchor_x_units: None,
            anchor_y_units: None,
            color: None,
            cross_origin: None,
            displacement: None,
            opacity: None,
            rotate_with_view: None,
            rotation: None,
            scale: None,
            snap_to_pixel: None,
            size: None,
            natural_size: None,
        }
    }

    /// Returns the host feature.
    #[must_use]
    pub fn feature(&self) -> FeatureId {
        self.feature
    }

    /// Returns the watched image resource, if any.
    #[must_use]
    pub fn image(&self) -> Option<ImageId> {
        self.image
    }

    // -- Subscription lifecycle --

    /// Starts watching an image resource and pushes the updated style.
    ///
    /// The watch is the binding's single subscription: take it once at
    /// setup. Watching a new resource replaces the previous watch.
    pub fn watch_image(&mut self, features: &mut FeatureStore, image: ImageId) {
        self.image = Some(image);
        self.push(features);
    }

    /// Stops watching the image resource.
    ///
    /// Release at teardown; afterwards [`sync`](Self::sync) is inert. The
    /// host feature keeps its last pushed style.
    pub fn unwatch_image(&mut self) {
        self.image = None;
    }

    /// Re-pushes the style when the watched resource changed.
    ///
    /// Call once per drain with the [`ImageChanges`] taken from the image
    /// store. If the watched resource is among the changed states, the
    /// decoded natural size (when available) is folded into the inputs and
    /// the style is rebuilt and pushed.
    pub fn sync(
        &mut self,
        changes: &ImageChanges,
        images: &ImageStore,
        features: &mut FeatureStore,
    ) {
        let Some(image) = self.image else {
            return;
        };
        if !changes.states.contains(&image.index()) {
            return;
        }
        if let Some(size) = images.raster(image).size {
            self.natural_size = Some(size);
        }
        self.push(features);
    }

    // -- Input setters (each rebuilds and pushes) --

    /// Sets the source locator input.
    pub fn set_src(&mut self, features: &mut FeatureStore, src: impl Into<String>) {
        self.src = Some(src.into());
        self.push(features);
    }

    /// Sets the anchor point input.
    pub fn set_anchor(&mut self, features: &mut FeatureStore, anchor: [f64; 2]) {
        self.anchor = Some(anchor);
        self.push(features);
    }

    /// Sets the anchor origin input.
    pub fn set_anchor_origin(&mut self, features: &mut FeatureStore, origin: IconOrigin) {
        self.anchor_origin = Some(origin);
        self.push(features);
    }

    /// Sets the anchor x-units input.
    pub fn set_anchor_x_units(&mut self, features: &mut FeatureStore, units: AnchorUnits) {
        self.anchor_x_units = Some(units);
        self.push(features);
    }

    /// Sets the anchor y-units input.
    pub fn set_anchor_y_units(&mut self, features: &mut FeatureStore, units: AnchorUnits) {
        self.anchor_y_units = Some(units);
        self.push(features);
    }

    /// Sets the tint color input.
    pub fn set_color(&mut self, features: &mut FeatureStore, color: Rgba8) {
        self.color = Some(color);
        self.push(features);
    }

    /// Sets the cross-origin policy input.
    pub fn set_cross_origin(&mut self, features: &mut FeatureStore, cross_origin: CrossOrigin) {
        self.cross_origin = Some(cross_origin);
        self.push(features);
    }

    /// Sets the pixel displacement input.
    pub fn set_displacement(&mut self, features: &mut FeatureStore, displacement: [f64; 2]) {
        self.displacement = Some(displacement);
        self.push(features);
    }

    /// Sets the opacity input.
    pub fn set_opacity(&mut self, features: &mut FeatureStore, opacity: f64) {
        self.opacity = Some(opacity);
        self.push(features);
    }

    /// Sets the rotate-with-view input.
    pub fn set_rotate_with_view(&mut self, features: &mut FeatureStore, rotate: bool) {
        self.rotate_with_view = Some(rotate);
        self.push(features);
    }

    /// Sets the rotation input (radians).
    pub fn set_rotation(&mut self, features: &mut FeatureStore, rotation: f64) {
        self.rotation = Some(rotation);
        self.push(features);
    }

    /// Sets the scale input.
    pub fn set_scale(&mut self, features: &mut FeatureStore, scale: f64) {
        self.scale = Some(scale);
        self.push(features);
    }

    /// Sets the pixel-snapping input.
    pub fn set_snap_to_pixel(&mut self, features: &mut FeatureStore, snap: bool) {
        self.snap_to_pixel = Some(snap);
        self.push(features);
    }

    /// Sets the display size input.
    pub fn set_size(&mut self, features: &mut FeatureStore, size: RasterSize) {
        self.size = Some(size);
        self.push(features);
    }

    /// Sets the natural (intrinsic) size input.
    pub fn set_natural_size(&mut self, features: &mut FeatureStore, size: RasterSize) {
        self.natural_size = Some(size);
        self.push(features);
    }

    // -- Derivation --

    /// Rebuilds the style from the collected inputs and pushes it into the
    /// host feature.
    pub fn push(&self, features: &mut FeatureStore) {
        features.set_style(self.feature, Some(self.build()));
    }

    /// Rebuilds the complete style: set inputs over defaults.
    #[must_use]
    pub fn build(&self) -> IconStyle {
        let defaults = IconStyle::default();
        IconStyle {
            src: self.src.clone(),
            image: self.image,
            anchor: self.anchor.unwrap_or(defaults.anchor),
            anchor_origin: self.anchor_origin.unwrap_or(defaults.anchor_origin),
            anchor_x_units: self.anchor_x_units.unwrap_or(defaults.anchor_x_units),
            anchor_y_units: self.anchor_y_units.unwrap_or(defaults.anchor_y_units),
            color: self.color,
            cross_origin: self.cross_origin,
            displacement: self.displacement.unwrap_or(defaults.displacement),
            opacity: self.opacity.unwrap_or(defaults.opacity),
            rotate_with_view: self.rotate_with_view.unwrap_or(defaults.rotate_with_view),
            rotation: self.rotation.unwrap_or(defaults.rotation),
            scale: self.scale.unwrap_or(defaults.scale),
            snap_to_pixel: self.snap_to_pixel.unwrap_or(defaults.snap_to_pixel),
            size: self.size,
            natural_size: self.natural_size,
        }
    }
}
