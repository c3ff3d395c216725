// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic queue-backed image loading for tests and demos.
//!
//! [`QueueLoader`] implements [`ImageLoader`] without performing any I/O:
//! every request is parked in a FIFO queue, and the embedding test or demo
//! decides when and how each one completes by calling
//! [`complete_next`](QueueLoader::complete_next). This makes the full load
//! lifecycle — including retries, redundant calls, and late signals —
//! drivable step by step from single-threaded code.

#![no_std]

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::string::{String, ToString};

use terrane_core::image::{
    CompletionSignal, CrossOrigin, ImageLoader, ImageStore, LoadRequest, LoadTicket,
};

/// One parked load request.
#[derive(Clone, Debug)]
pub struct QueuedRequest {
    /// Ticket to redeem on completion.
    pub ticket: LoadTicket,
    /// Source locator of the requested raster.
    pub src: String,
    /// Cross-origin policy of the request.
    pub cross_origin: Option<CrossOrigin>,
    /// Pixel density ratio of the request.
    pub pixel_ratio: f64,
}

/// An [`ImageLoader`] that queues requests instead of fetching.
#[derive(Debug, Default)]
pub struct QueueLoader {
    queue: VecDeque<QueuedRequest>,
}

impl QueueLoader {
    /// Creates an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of parked requests.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns the source locator of the oldest parked request, if any.
    #[must_use]
    pub fn next_src(&self) -> Option<&str> {
        self.queue.front().map(|r| r.src.as_str())
    }

    /// Completes the oldest parked request with `signal`.
    ///
    /// Returns whether a request was parked *and* its signal was consumed by
    /// the store. A dequeued request whose ticket went stale (resource
    /// destroyed, episode superseded) counts as not consumed, mirroring what
    /// a real platform callback would experience.
    pub fn complete_next(&mut self, store: &mut ImageStore, signal: CompletionSignal) -> bool {
        match self.queue.pop_front() {
            Some(request) => store.deliver(request.ticket, signal),
            None => false,
        }
    }

    /// Discards all parked requests without completing them.
    ///
    /// The affected resources stay `Loading` forever — the documented
    /// behavior for a loader that never signals.
    pub fn abandon_all(&mut self) {
        self.queue.clear();
    }
}

impl ImageLoader for QueueLoader {
    fn load(&mut self, request: &LoadRequest<'_>) {
        self.queue.push_back(QueuedRequest {
            ticket: request.ticket,
            src: request.src.to_string(),
            cross_origin: request.cross_origin,
            pixel_ratio: request.pixel_ratio,
        });
    }
}

#[cfg(test)]
mod tests {
    use terrane_core::geo::Extent;
    use terrane_core::image::{ImageOptions, LoadState, Raster, RasterKey, RasterSize};

    use super::*;

    fn store_with_image(extent: Extent) -> (ImageStore, terrane_core::image::ImageId) {
        let mut store = ImageStore::new();
        let id = store.create_image(ImageOptions::new("terrane://raster.png", extent));
        (store, id)
    }

    #[test]
    fn requests_park_in_fifo_order() {
        let mut loader = QueueLoader::new();
        let mut store = ImageStore::new();
        let a = store.create_image(ImageOptions::new(
            "terrane://a.png",
            Extent::new(0.0, 0.0, 1.0, 1.0),
        ));
        let b = store.create_image(ImageOptions::new(
            "terrane://b.png",
            Extent::new(0.0, 0.0, 1.0, 1.0),
        ));

        store.load(a, &mut loader);
        store.load(b, &mut loader);

        assert_eq!(loader.pending(), 2);
        assert_eq!(loader.next_src(), Some("terrane://a.png"));
    }

    #[test]
    fn success_scenario_infers_resolution() {
        // Resolution unset, extent height 100, success with pixel height 50.
        let (mut store, id) = store_with_image(Extent::new(0.0, 0.0, 100.0, 100.0));
        let mut loader = QueueLoader::new();

        store.load(id, &mut loader);
        assert!(loader.complete_next(
            &mut store,
            CompletionSignal::Loaded {
                size: RasterSize::new(50, 50),
                key: None,
            },
        ));

        assert_eq!(store.resolution(id), Some(2.0));
        assert_eq!(store.state(id), LoadState::Loaded);
    }

    #[test]
    fn failure_then_retry_scenario() {
        let (mut store, id) = store_with_image(Extent::new(0.0, 0.0, 10.0, 10.0));
        let mut loader = QueueLoader::new();

        store.load(id, &mut loader);
        assert!(loader.complete_next(&mut store, CompletionSignal::Failed));
        assert_eq!(store.state(id), LoadState::Error);

        store.load(id, &mut loader);
        assert!(loader.complete_next(
            &mut store,
            CompletionSignal::Loaded {
                size: RasterSize::new(5, 5),
                key: None,
            },
        ));
        assert_eq!(store.state(id), LoadState::Loaded);
    }

    #[test]
    fn double_load_scenario_invokes_loader_once() {
        let (mut store, id) = store_with_image(Extent::new(0.0, 0.0, 10.0, 10.0));
        let mut loader = QueueLoader::new();

        store.load(id, &mut loader);
        store.load(id, &mut loader);

        assert_eq!(loader.pending(), 1, "one fetch per loading episode");
    }

    #[test]
    fn injected_raster_scenario() {
        let (mut store, id) = store_with_image(Extent::new(0.0, 0.0, 10.0, 10.0));

        let raster = Raster::decoded(RasterKey(9), RasterSize::new(2, 2));
        store.set_raster(id, raster);

        assert_eq!(store.raster(id), &raster);
        assert_eq!(store.state(id), LoadState::Idle);
    }

    #[test]
    fn abandoned_request_leaves_resource_loading() {
        let (mut store, id) = store_with_image(Extent::new(0.0, 0.0, 10.0, 10.0));
        let mut loader = QueueLoader::new();

        store.load(id, &mut loader);
        loader.abandon_all();

        assert_eq!(loader.pending(), 0);
        assert_eq!(store.state(id), LoadState::Loading);
        assert_eq!(store.listener_count(id), 2);
    }

    #[test]
    fn destroyed_resource_signal_is_not_consumed() {
        let (mut store, id) = store_with_image(Extent::new(0.0, 0.0, 10.0, 10.0));
        let mut loader = QueueLoader::new();

        store.load(id, &mut loader);
        store.destroy_image(id);

        assert!(!loader.complete_next(
            &mut store,
            CompletionSignal::Loaded {
                size: RasterSize::new(1, 1),
                key: None,
            },
        ));
    }

    #[test]
    fn completing_an_empty_queue_is_false() {
        let mut store = ImageStore::new();
        let mut loader = QueueLoader::new();
        assert!(!loader.complete_next(&mut store, CompletionSignal::Failed));
    }
}
