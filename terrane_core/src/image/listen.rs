// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot completion listener bookkeeping.

/// The pair of one-shot completion listeners (success + failure) registered
/// on a raster handle for the duration of one loading episode.
///
/// Both listeners are captured together when the episode begins and released
/// together when either signal fires, so neither can fire twice for the same
/// episode. The episode counter ties the pair to the
/// [`LoadTicket`](super::LoadTicket) handed to the loader: a ticket from an
/// earlier episode no longer matches and is dropped on delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ListenPair {
    /// The loading episode this pair belongs to.
    pub(crate) episode: u64,
}

impl ListenPair {
    /// Listeners held by one registered pair.
    pub(crate) const LISTENERS: usize = 2;
}
