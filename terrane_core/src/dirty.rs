// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Terrane uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! batch change notifications from the stores. Each channel represents an
//! independent category of change.
//!
//! Unlike a compositing tree, both stores here are flat sets, so every
//! channel is local-only: marking a slot dirty never propagates to any other
//! slot, and no dependency edges exist.
//!
//! # Consumption
//!
//! Callers never query dirty state directly. Each
//! [`ImageStore::take_changes`](crate::image::ImageStore::take_changes) or
//! [`FeatureStore::take_changes`](crate::feature::FeatureStore::take_changes)
//! call drains the relevant channels and surfaces the results as
//! [`ImageChanges`](crate::image::ImageChanges) /
//! [`FeatureChanges`](crate::feature::FeatureChanges), which collaborators
//! consume once per frame to apply incremental updates.

use understory_dirty::Channel;

/// Image lifecycle state changed — a load began, completed, or failed.
///
/// Used by [`ImageStore`](crate::image::ImageStore).
pub const STATE: Channel = Channel::new(0);

/// A feature's icon style was replaced.
///
/// Used by [`FeatureStore`](crate::feature::FeatureStore).
pub const STYLE: Channel = Channel::new(1);

/// A feature's map position changed.
///
/// Used by [`FeatureStore`](crate::feature::FeatureStore).
pub const GEOMETRY: Channel = Channel::new(2);
