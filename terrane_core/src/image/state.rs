// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Load lifecycle states.

/// The lifecycle state of an image resource.
///
/// The machine is cyclic, not terminal: both [`Loaded`](Self::Loaded) and
/// [`Error`](Self::Error) can re-enter [`Loading`](Self::Loading) through a
/// fresh [`load`](super::ImageStore::load) call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LoadState {
    /// No load has been attempted since creation.
    #[default]
    Idle,
    /// A load is in flight; completion listeners are registered.
    Loading,
    /// The raster decoded successfully and is available.
    Loaded,
    /// The last load attempt failed. Retry by calling `load()` again.
    Error,
}

impl LoadState {
    /// Returns whether a call to `load()` may begin a new loading episode.
    ///
    /// Only `Idle` and `Error` may; `Loading` and `Loaded` absorb the call
    /// as a no-op so redundant speculative loads cannot trigger duplicate
    /// fetches.
    #[inline]
    #[must_use]
    pub const fn can_begin_load(self) -> bool {
        matches!(self, Self::Idle | Self::Error)
    }
}
