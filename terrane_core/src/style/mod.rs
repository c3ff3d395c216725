// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icon styling.
//!
//! [`IconStyle`] is a flat record of icon presentation attributes — anchor,
//! tint, displacement, opacity, rotation, scale, sizes, source. All inputs
//! are optional at the collection stage; the record itself carries resolved
//! values with documented defaults.
//!
//! [`IconBinding`] is the configuration collector that sits between a
//! property-based input surface and a host [`feature`](crate::feature): each
//! input mutation rebuilds the style and pushes it into the feature, and a
//! single watched image resource keeps the style's natural size in step with
//! the decoded raster.

mod binding;
mod icon;

pub use binding::IconBinding;
pub use icon::{AnchorUnits, IconOrigin, IconStyle, Rgba8};
