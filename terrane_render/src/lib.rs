// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icon placement and render-plan definitions for terrane.
//!
//! This crate provides the intermediate representation between
//! [`terrane_core`]'s stores and backend-specific drawing. It defines:
//!
//! - [`View`] — viewport mapping from map coordinates to css pixels
//! - [`ResolvedIcon`] / [`place::resolve`] — anchor/origin/displacement
//!   resolution of a styled icon against its decoded raster
//! - [`IconItem`] / [`RenderPlan`] — an ordered list of icon draw commands
//!   for one frame, produced by [`plan_icons`]
//!
//! Only resources in the `Loaded` state contribute draw commands; resources
//! still loading or in error render as absent until a retry succeeds.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod place;
mod plan;
mod view;

pub use place::ResolvedIcon;
pub use plan::{IconItem, RenderPlan, plan_icons};
pub use view::View;
