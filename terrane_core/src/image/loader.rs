// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loader contract for fetch/decode collaborators.
//!
//! Terrane splits platform-specific fetching into *loader* collaborators.
//! The core does not prescribe how a source locator is resolved — network,
//! cache, data URI — only the completion protocol:
//!
//! - [`ImageStore::load`](super::ImageStore::load) hands the loader a
//!   [`LoadRequest`] carrying a one-shot [`LoadTicket`].
//! - The loader eventually redeems the ticket through
//!   [`ImageStore::deliver`](super::ImageStore::deliver) with exactly one
//!   [`CompletionSignal`] — or never, in which case the resource stays
//!   `Loading` forever (there is no built-in timeout).
//! - There is no cancellation: once a request is issued the only recourse is
//!   to let it finish, or destroy the resource and let the late signal be
//!   dropped.
//!
//! Loaders that complete synchronously inside `load()` are fine: `deliver`
//! needs `&mut ImageStore`, which the loader does not hold during the call,
//! so signals are queued by the loader and drained by the embedder's loop.
//! See the queue loader in the load harness crate for the canonical shape.

use super::id::ImageId;
use super::raster::{RasterKey, RasterSize};

/// Cross-origin policy for fetching a raster from a foreign origin.
///
/// Mirrors the `crossorigin` content attribute on the web; other loaders may
/// ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrossOrigin {
    /// Fetch without credentials.
    Anonymous,
    /// Fetch with credentials (cookies, client certificates).
    UseCredentials,
}

/// A one-shot ticket identifying a single loading episode.
///
/// Issued by [`ImageStore::load`](super::ImageStore::load) and redeemed by
/// the loader through [`ImageStore::deliver`](super::ImageStore::deliver).
/// A ticket matches at most one delivery; later redemptions of the same
/// ticket, or of tickets from superseded episodes, are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub(crate) image: ImageId,
    pub(crate) episode: u64,
}

impl LoadTicket {
    /// Returns the image resource this ticket belongs to.
    #[inline]
    #[must_use]
    pub const fn image(self) -> ImageId {
        self.image
    }
}

/// The outcome of a loading episode, reported by the loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionSignal {
    /// The raster decoded successfully.
    Loaded {
        /// Decoded pixel dimensions.
        size: RasterSize,
        /// Backing storage key, when the loader manages decoded storage.
        key: Option<RasterKey>,
    },
    /// The fetch or decode failed. No classification beyond failure is
    /// exposed at this layer.
    Failed,
}

/// Everything a loader needs to start fetching one raster.
#[derive(Debug)]
pub struct LoadRequest<'a> {
    /// Ticket to redeem on completion.
    pub ticket: LoadTicket,
    /// Source locator (URI) of the raster.
    pub src: &'a str,
    /// Cross-origin policy, if any.
    pub cross_origin: Option<CrossOrigin>,
    /// Pixel density ratio the raster will be displayed at.
    pub pixel_ratio: f64,
}

/// Fetches and decodes rasters on behalf of an [`ImageStore`].
///
/// Implementations are platform glue: a browser backend sets an `Image`
/// element's `src`, a test harness queues the request for deterministic
/// completion. A loader is invoked at most once per
/// `Idle → Loading` / `Error → Loading` transition — never for redundant
/// `load()` calls.
///
/// [`ImageStore`]: super::ImageStore
pub trait ImageLoader {
    /// Starts fetching the raster described by `request`.
    ///
    /// Must not block; completion is reported later by redeeming
    /// `request.ticket`.
    fn load(&mut self, request: &LoadRequest<'_>);
}
