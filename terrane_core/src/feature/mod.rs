// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Styled map features.
//!
//! A *feature* is a point of interest on the map that presents an icon. Each
//! feature has:
//!
//! - An identity ([`FeatureId`]) — a generational handle that becomes stale
//!   when the feature is destroyed.
//! - A map-space **position** ([`kurbo::Point`]).
//! - An optional **icon style** ([`IconStyle`]) describing how to present
//!   it. Styles are typically pushed by an
//!   [`IconBinding`](crate::style::IconBinding) rather than set directly.
//!
//! Features form a flat set — there is no containment hierarchy, so all
//! dirty channels are local-only. Mutations mark the STYLE or GEOMETRY
//! channel and are drained as [`FeatureChanges`] by
//! [`FeatureStore::take_changes`], which render planning consumes once per
//! frame.
//!
//! [`IconStyle`]: crate::style::IconStyle

mod id;
mod store;

pub use id::FeatureId;
pub use store::{FeatureChanges, FeatureStore};
