// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Georeferenced image resources and their load lifecycle.
//!
//! An *image resource* is a raster pinned to a map-space extent. Each
//! resource has:
//!
//! - An identity ([`ImageId`]) — a generational handle that becomes stale
//!   when the resource is destroyed, preventing use-after-free bugs at the
//!   API level.
//! - **Fixed properties** set at creation: extent, source locator,
//!   cross-origin policy, pixel density ratio, and optionally a preset
//!   resolution.
//! - **Lifecycle state** ([`LoadState`]) mutated only through
//!   [`load`](ImageStore::load) and [`deliver`](ImageStore::deliver).
//! - An exclusively owned **raster handle** ([`Raster`]) holding the decoded
//!   pixel size and an opaque backing key once a load completes (or injected
//!   directly via [`set_raster`](ImageStore::set_raster)).
//!
//! # Load lifecycle
//!
//! ```text
//!          load()                 deliver(Loaded)
//!   Idle ────────► Loading ────────────────────► Loaded
//!    ▲                │                            │
//!    │                │ deliver(Failed)            │ (re-enterable
//!    │                ▼                            │  via load())
//!    └─────────── Error ◄──────────────────────────┘
//! ```
//!
//! Transitions are monotonic per load attempt; `Error` is re-entered into
//! `Loading` by calling `load()` again (retry). Calling `load()` while
//! `Loading` or `Loaded` is a complete no-op, which makes redundant calls
//! from a speculative load queue safe: no duplicate fetch, no duplicate
//! listener registration, no duplicate change notification.
//!
//! Fetching itself is performed by an [`ImageLoader`] collaborator. Each
//! `load()` hands the loader a [`LoadRequest`] carrying a one-shot
//! [`LoadTicket`]; the loader later redeems the ticket through
//! [`deliver`](ImageStore::deliver) with a [`CompletionSignal`]. The pair of
//! completion listeners backing a ticket is registered when the load begins
//! and released as a unit before the completion becomes observable, so a
//! ticket can never be redeemed twice.

mod id;
mod listen;
mod loader;
mod raster;
mod state;
mod store;

pub use id::ImageId;
pub use loader::{CompletionSignal, CrossOrigin, ImageLoader, LoadRequest, LoadTicket};
pub use raster::{Raster, RasterKey, RasterSize};
pub use state::LoadState;
pub use store::{ImageChanges, ImageOptions, ImageStore};
