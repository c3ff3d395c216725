// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for georeferenced image loading and icon styling.
//!
//! `terrane_core` provides the foundational data structures for managing
//! georeferenced raster resources and the icon styles that present them on a
//! map. It is `no_std` compatible (with `alloc`) and uses array-based
//! struct-of-arrays storage with generational index handles.
//!
//! # Architecture
//!
//! The crate is organized around a load loop that turns asynchronous decode
//! completions into incremental scene updates:
//!
//! ```text
//!   ImageLoader (fetch/decode collaborator)
//!       │ completion signals
//!       ▼
//!   ImageStore::deliver() ──► ImageChanges ──► IconBinding::sync()
//!                                                   │
//!                 ┌─────────────────────────────────┘
//!                 ▼
//!   FeatureStore::set_style() ──► FeatureChanges ──► render planning
//! ```
//!
//! **[`image`]** — Store of georeferenced image resources with a four-state
//! load lifecycle (`Idle → Loading → {Loaded, Error}`, both re-enterable).
//! Loads are started by the caller and completed by an [`ImageLoader`]
//! collaborator through one-shot completion tickets.
//!
//! **[`style`]** — The flat icon style record and the [`IconBinding`]
//! collector that rebuilds a style from individually-set inputs and pushes
//! it into a host feature on every change.
//!
//! **[`feature`]** — Flat struct-of-arrays store of styled map features.
//!
//! **[`dirty`]** — Dirty-channel constants via `understory_dirty`. All
//! channels are local-only; both stores are flat sets without inheritance.
//!
//! **[`geo`]** — Map-space extent helpers, including the
//! extent-height/pixel-height resolution inference used on first load.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! load-loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).
//!
//! [`ImageLoader`]: image::ImageLoader
//! [`IconBinding`]: style::IconBinding

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod dirty;
pub mod feature;
pub mod geo;
pub mod image;
pub mod style;
pub mod trace;
