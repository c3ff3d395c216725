// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: an ordered sequence of icon draw commands for one frame.

use alloc::vec::Vec;

use kurbo::Point;
use terrane_core::feature::FeatureStore;
use terrane_core::image::{ImageStore, LoadState};

use super::place::{self, ResolvedIcon};
use super::view::View;

/// A single icon draw command in the render plan.
#[derive(Clone, Copy, Debug)]
pub struct IconItem {
    /// Raw slot index of the feature this item originates from.
    pub feature: u32,
    /// Feature position in css pixels within the viewport.
    pub position: Point,
    /// The resolved icon to draw at `position`.
    pub icon: ResolvedIcon,
}

/// An ordered list of icon draw commands for a single frame.
///
/// Backends translate this into native drawing operations; the plan itself
/// carries no platform types.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    /// Draw commands in feature order.
    pub items: Vec<IconItem>,
}

impl RenderPlan {
    /// Creates an empty render plan.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Produces the icon draw commands for all drawable features.
///
/// A feature contributes an item when it has a style, the style is bound to
/// a live image resource in the [`Loaded`](LoadState::Loaded) state, and the
/// style resolves to a placeable icon. Resources still `Loading` or in
/// `Error` contribute nothing — they render as absent until a retry
/// succeeds.
#[must_use]
pub fn plan_icons(features: &FeatureStore, images: &ImageStore, view: &View) -> RenderPlan {
    let mut plan = RenderPlan::new();

    for id in features.features() {
        let Some(style) = features.style(id) else {
            continue;
        };
        let Some(image) = style.image else {
            continue;
        };
        if !images.is_alive(image) || images.state(image) != LoadState::Loaded {
            continue;
        }
        let Some(icon) = place::resolve(style, images.raster(image), images.pixel_ratio(image))
        else {
            continue;
        };
        plan.items.push(IconItem {
            feature: id.index(),
            position: view.to_pixels(features.position(id)),
            icon,
        });
    }

    plan
}
