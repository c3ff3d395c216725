// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays image resource storage and the load state machine.

use alloc::string::String;
use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use crate::dirty;
use crate::geo::{self, Extent};

use super::id::ImageId;
use super::listen::ListenPair;
use super::loader::{CompletionSignal, CrossOrigin, ImageLoader, LoadRequest, LoadTicket};
use super::raster::Raster;
use super::state::LoadState;

/// Creation-time properties of an image resource.
///
/// Everything except `resolution` is fixed for the resource's lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageOptions {
    /// Map-space extent the raster covers.
    pub extent: Extent,
    /// Map units per raster pixel. `None` defers to inference on the first
    /// successful load (extent height / decoded pixel height).
    pub resolution: Option<f64>,
    /// Pixel density ratio the raster is produced for.
    pub pixel_ratio: f64,
    /// Source locator (URI) handed to the loader.
    pub src: String,
    /// Cross-origin fetch policy, if any.
    pub cross_origin: Option<CrossOrigin>,
}

impl ImageOptions {
    /// Creates options for `src` covering `extent`, with resolution deferred
    /// to first-load inference and a pixel ratio of 1.
    #[must_use]
    pub fn new(src: impl Into<String>, extent: Extent) -> Self {
        Self {
            extent,
            resolution: None,
            pixel_ratio: 1.0,
            src: src.into(),
            cross_origin: None,
        }
    }

    /// Presets the resolution, disabling first-load inference.
    #[must_use]
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Sets the pixel density ratio.
    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Sets the cross-origin fetch policy.
    #[must_use]
    pub fn with_cross_origin(mut self, cross_origin: CrossOrigin) -> Self {
        self.cross_origin = Some(cross_origin);
        self
    }
}

/// The set of changes produced by a single
/// [`ImageStore::take_changes`] call.
///
/// Change lists contain raw slot indices rather than [`ImageId`] handles so
/// that collaborators can index directly into the store via the `*_at()`
/// accessors without paying for generation checks on every access.
#[derive(Clone, Debug, Default)]
pub struct ImageChanges {
    /// Resources whose lifecycle state changed since the last drain.
    pub states: Vec<u32>,
    /// Resources created since the last drain.
    pub added: Vec<u32>,
    /// Resources destroyed since the last drain.
    pub removed: Vec<u32>,
}

impl ImageChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.states.clear();
        self.added.clear();
        self.removed.clear();
    }

    /// Returns whether no change of any kind was drained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }
}

/// Struct-of-arrays storage for all image resources.
///
/// Resources are addressed by [`ImageId`] handles. Internally, each resource
/// occupies a slot in parallel arrays. Destroyed resources are recycled via
/// a free list, and generation counters prevent stale handle access.
///
/// All lifecycle mutation goes through [`load`](Self::load) and
/// [`deliver`](Self::deliver); see the [module docs](super) for the state
/// machine.
#[derive(Debug)]
pub struct ImageStore {
    // -- Fixed properties (set at creation) --
    extent: Vec<Extent>,
    pixel_ratio: Vec<f64>,
    src: Vec<String>,
    cross_origin: Vec<Option<CrossOrigin>>,

    // -- Lifecycle --
    state: Vec<LoadState>,
    resolution: Vec<Option<f64>>,
    raster: Vec<Raster>,
    episode: Vec<u64>,
    pending: Vec<Option<ListenPair>>,

    // -- Allocation --
    generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,

    // -- Dirty tracking --
    dirty: DirtyTracker<u32>,

    // -- Lifecycle tracking --
    pending_added: Vec<u32>,
    pending_removed: Vec<u32>,
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageStore {
    /// Creates an empty image store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extent: Vec::new(),
            pixel_ratio: Vec::new(),
            src: Vec::new(),
            cross_origin: Vec::new(),
            state: Vec::new(),
            resolution: Vec::new(),
            raster: Vec::new(),
            episode: Vec::new(),
            pending: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new image resource and returns its handle.
    ///
    /// The resource starts in [`LoadState::Idle`] with an empty raster
    /// handle and no completion listeners registered.
    pub fn create_image(&mut self, options: ImageOptions) -> ImageId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.extent[idx as usize] = options.extent;
            self.pixel_ratio[idx as usize] = options.pixel_ratio;
            self.src[idx as usize] = options.src;
            self.cross_origin[idx as usize] = options.cross_origin;
            self.state[idx as usize] = LoadState::Idle;
            self.resolution[idx as usize] = options.resolution;
            self.raster[idx as usize] = Raster::default();
            self.episode[idx as usize] = 0;
            self.pending[idx as usize] = None;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.extent.push(options.extent);
            self.pixel_ratio.push(options.pixel_ratio);
            self.src.push(options.src);
            self.cross_origin.push(options.cross_origin);
            self.state.push(LoadState::Idle);
            self.resolution.push(options.resolution);
            self.raster.push(Raster::default());
            self.episode.push(0);
            self.pending.push(None);
            self.generation.push(0);
            idx
        };

        self.pending_added.push(idx);

        ImageId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys an image resource, freeing its slot for reuse.
    ///
    /// Any in-flight load is orphaned: its completion signal will no longer
    /// match a live handle and is dropped on delivery.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_image(&mut self, id: ImageId) {
        self.validate(id);
        let idx = id.idx;

        self.pending[idx as usize] = None;
        self.dirty.remove_key(idx);

        // Bump generation so old handles (and orphaned tickets) immediately
        // fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.pending_removed.push(idx);
    }

    /// Returns whether the given handle refers to a live resource.
    #[must_use]
    pub fn is_alive(&self, id: ImageId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Load state machine --

    /// Starts (or retries) loading the resource's raster.
    ///
    /// Safe to call in any state:
    ///
    /// - From `Idle` or `Error`: transitions to `Loading`, emits a change
    ///   notification, registers the one-shot completion listener pair, and
    ///   invokes `loader` with a [`LoadRequest`] for this episode.
    /// - From `Loading` or `Loaded`: complete no-op. The loader is not
    ///   invoked, no listeners change, and no notification is emitted, so an
    ///   external load queue may call this redundantly without consequence.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn load(&mut self, id: ImageId, loader: &mut dyn ImageLoader) {
        self.validate(id);
        let idx = id.idx as usize;

        if !self.state[idx].can_begin_load() {
            return;
        }

        self.state[idx] = LoadState::Loading;
        self.dirty.mark(id.idx, dirty::STATE);

        // New episode: the listener pair is captured as a unit and only a
        // ticket minted here can redeem it.
        let episode = self.episode[idx] + 1;
        self.episode[idx] = episode;
        self.pending[idx] = Some(ListenPair { episode });

        let request = LoadRequest {
            ticket: LoadTicket { image: id, episode },
            src: &self.src[idx],
            cross_origin: self.cross_origin[idx],
            pixel_ratio: self.pixel_ratio[idx],
        };
        loader.load(&request);
    }

    /// Delivers a completion signal for a loading episode.
    ///
    /// Called by loader collaborators (typically from a drain loop) to
    /// redeem the [`LoadTicket`] of an earlier [`load`](Self::load) call.
    /// Returns whether the signal was consumed.
    ///
    /// A signal is dropped (returns `false`) when the ticket's resource has
    /// been destroyed, when no load is in flight, or when the ticket belongs
    /// to a superseded episode — this is what makes the listeners one-shot.
    ///
    /// On a consumed signal both listeners are released *before* the state
    /// transition and change notification, so observers never see a dangling
    /// listener:
    ///
    /// - `Loaded`: installs the decoded size (and backing key, if any) into
    ///   the raster handle; if the resolution is unset, derives it from the
    ///   extent height and the decoded pixel height; transitions to
    ///   [`LoadState::Loaded`].
    /// - `Failed`: transitions to [`LoadState::Error`]. Retry is manual,
    ///   via another `load()` call.
    pub fn deliver(&mut self, ticket: LoadTicket, signal: CompletionSignal) -> bool {
        // Late completions for destroyed resources are expected; drop them.
        if !self.is_alive(ticket.image) {
            return false;
        }
        let idx = ticket.image.idx as usize;

        match self.pending[idx] {
            Some(pair) if pair.episode == ticket.episode => {}
            _ => return false,
        }
        // Release both listeners together, before any observable effect of
        // the completion.
        self.pending[idx] = None;

        match signal {
            CompletionSignal::Loaded { size, key } => {
                if self.resolution[idx].is_none() {
                    self.resolution[idx] =
                        Some(geo::resolution_for_height(&self.extent[idx], size.height));
                }
                self.raster[idx].size = Some(size);
                if key.is_some() {
                    self.raster[idx].key = key;
                }
                self.state[idx] = LoadState::Loaded;
            }
            CompletionSignal::Failed => {
                self.state[idx] = LoadState::Error;
            }
        }

        self.dirty.mark(ticket.image.idx, dirty::STATE);
        true
    }

    // -- Property getters (validated handles) --

    /// Returns the lifecycle state of a resource.
    #[must_use]
    pub fn state(&self, id: ImageId) -> LoadState {
        self.validate(id);
        self.state[id.idx as usize]
    }

    /// Returns the map-space extent of a resource.
    #[must_use]
    pub fn extent(&self, id: ImageId) -> Extent {
        self.validate(id);
        self.extent[id.idx as usize]
    }

    /// Returns the resolution (map units per pixel), if known.
    ///
    /// `None` until either a preset value is supplied at creation or the
    /// first successful load infers one.
    #[must_use]
    pub fn resolution(&self, id: ImageId) -> Option<f64> {
        self.validate(id);
        self.resolution[id.idx as usize]
    }

    /// Returns the pixel density ratio of a resource.
    #[must_use]
    pub fn pixel_ratio(&self, id: ImageId) -> f64 {
        self.validate(id);
        self.pixel_ratio[id.idx as usize]
    }

    /// Returns the source locator of a resource.
    #[must_use]
    pub fn src(&self, id: ImageId) -> &str {
        self.validate(id);
        &self.src[id.idx as usize]
    }

    /// Returns the cross-origin fetch policy of a resource.
    #[must_use]
    pub fn cross_origin(&self, id: ImageId) -> Option<CrossOrigin> {
        self.validate(id);
        self.cross_origin[id.idx as usize]
    }

    /// Returns the owned raster handle of a resource.
    #[must_use]
    pub fn raster(&self, id: ImageId) -> &Raster {
        self.validate(id);
        &self.raster[id.idx as usize]
    }

    /// Returns the number of registered one-shot completion listeners:
    /// 2 while a load is in flight, 0 otherwise.
    #[must_use]
    pub fn listener_count(&self, id: ImageId) -> usize {
        self.validate(id);
        match self.pending[id.idx as usize] {
            Some(_) => ListenPair::LISTENERS,
            None => 0,
        }
    }

    // -- Escape hatches --

    /// Replaces the owned raster handle directly.
    ///
    /// Performs **no** state transition and emits no change notification:
    /// this is the escape hatch for injecting a pre-decoded raster (e.g.
    /// from a shared cache) while bypassing the load path entirely.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_raster(&mut self, id: ImageId, raster: Raster) {
        self.validate(id);
        self.raster[id.idx as usize] = raster;
    }

    /// Clears the resolution back to unset.
    ///
    /// The next successful load re-derives it from the extent height and
    /// decoded pixel height; until then, [`resolution`](Self::resolution)
    /// returns `None`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn clear_resolution(&mut self, id: ImageId) {
        self.validate(id);
        self.resolution[id.idx as usize] = None;
    }

    // -- Change stream --

    /// Drains the change notification stream accumulated since the last
    /// drain.
    ///
    /// Lifecycle transitions (`load` starting, completions delivered) mark
    /// the STATE channel; created and destroyed resources are reported via
    /// the `added`/`removed` lists.
    pub fn take_changes(&mut self) -> ImageChanges {
        let mut changes = ImageChanges::default();
        self.take_changes_into(&mut changes);
        changes
    }

    /// Like [`take_changes`](Self::take_changes), but reuses a
    /// caller-provided buffer to avoid allocation.
    pub fn take_changes_into(&mut self, changes: &mut ImageChanges) {
        changes.clear();

        changes.states = self.dirty.drain(dirty::STATE).deterministic().run().collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    // -- Raw-index accessors for collaborators --
    //
    // These accept raw slot indices (as found in `ImageChanges`) rather than
    // `ImageId` handles, skipping generation validation. Only use with
    // indices that came from a drained change list.

    /// Returns the lifecycle state at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn state_at(&self, idx: u32) -> LoadState {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.state[idx as usize]
    }

    /// Returns the raster handle at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn raster_at(&self, idx: u32) -> &Raster {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        &self.raster[idx as usize]
    }

    /// Returns the resolution at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn resolution_at(&self, idx: u32) -> Option<f64> {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.resolution[idx as usize]
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: ImageId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ImageId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use super::*;
    use crate::image::RasterSize;

    /// Records every request instead of fetching; tests redeem the recorded
    /// tickets by hand.
    #[derive(Default)]
    struct RecordingLoader {
        requests: Vec<(LoadTicket, String)>,
    }

    impl ImageLoader for RecordingLoader {
        fn load(&mut self, request: &LoadRequest<'_>) {
            self.requests.push((request.ticket, request.src.to_string()));
        }
    }

    fn options() -> ImageOptions {
        ImageOptions::new("terrane://raster.png", Extent::new(0.0, 0.0, 100.0, 100.0))
    }

    #[test]
    fn create_and_destroy() {
        let mut store = ImageStore::new();
        let id = store.create_image(options());
        assert!(store.is_alive(id));
        store.destroy_image(id);
        assert!(!store.is_alive(id));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = ImageStore::new();
        let id1 = store.create_image(options());
        store.destroy_image(id1);
        let id2 = store.create_image(options());
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    #[should_panic(expected = "stale ImageId")]
    fn destroyed_handle_panics_on_state() {
        let mut store = ImageStore::new();
        let id = store.create_image(options());
        store.destroy_image(id);
        let _ = store.state(id);
    }

    #[test]
    #[should_panic(expected = "stale ImageId")]
    fn destroyed_handle_panics_on_load() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let id = store.create_image(options());
        store.destroy_image(id);
        store.load(id, &mut loader);
    }

    #[test]
    fn creation_properties_are_readable() {
        let mut store = ImageStore::new();
        let id = store.create_image(
            options()
                .with_resolution(2.5)
                .with_pixel_ratio(2.0)
                .with_cross_origin(CrossOrigin::Anonymous),
        );
        assert_eq!(store.state(id), LoadState::Idle);
        assert_eq!(store.resolution(id), Some(2.5));
        assert_eq!(store.src(id), "terrane://raster.png");
        assert_eq!(store.cross_origin(id), Some(CrossOrigin::Anonymous));
        let eps = 1e-12;
        assert!((store.pixel_ratio(id) - 2.0).abs() < eps);
        assert_eq!(store.raster(id), &Raster::default());
    }

    #[test]
    fn load_from_idle_starts_loading() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let id = store.create_image(options());
        let _ = store.take_changes();

        store.load(id, &mut loader);

        assert_eq!(store.state(id), LoadState::Loading);
        assert_eq!(store.listener_count(id), 2);
        assert_eq!(loader.requests.len(), 1);
        assert_eq!(loader.requests[0].1, "terrane://raster.png");

        let changes = store.take_changes();
        assert_eq!(changes.states, [id.idx]);
    }

    #[test]
    fn redundant_load_while_loading_is_noop() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let id = store.create_image(options());

        store.load(id, &mut loader);
        let _ = store.take_changes();

        store.load(id, &mut loader);

        assert_eq!(store.state(id), LoadState::Loading);
        assert_eq!(store.listener_count(id), 2);
        assert_eq!(loader.requests.len(), 1, "no duplicate fetch");
        assert!(store.take_changes().is_empty(), "no duplicate notification");
    }

    #[test]
    fn load_while_loaded_is_noop() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let id = store.create_image(options());

        store.load(id, &mut loader);
        let (ticket, _) = loader.requests[0];
        assert!(store.deliver(
            ticket,
            CompletionSignal::Loaded {
                size: RasterSize::new(64, 64),
                key: None,
            },
        ));
        let _ = store.take_changes();

        store.load(id, &mut loader);

        assert_eq!(store.state(id), LoadState::Loaded);
        assert_eq!(store.listener_count(id), 0);
        assert_eq!(loader.requests.len(), 1);
        assert!(store.take_changes().is_empty());
    }

    #[test]
    fn success_transitions_to_loaded_and_releases_listeners() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let id = store.create_image(options());
        store.load(id, &mut loader);
        let _ = store.take_changes();

        let (ticket, _) = loader.requests[0];
        let consumed = store.deliver(
            ticket,
            CompletionSignal::Loaded {
                size: RasterSize::new(32, 64),
                key: Some(crate::image::RasterKey(7)),
            },
        );

        assert!(consumed);
        assert_eq!(store.state(id), LoadState::Loaded);
        assert_eq!(store.listener_count(id), 0, "pair released as a unit");
        assert_eq!(store.raster(id).size, Some(RasterSize::new(32, 64)));
        assert_eq!(store.raster(id).key, Some(crate::image::RasterKey(7)));
        assert_eq!(store.take_changes().states, [id.idx]);
    }

    #[test]
    fn failure_transitions_to_error_and_retry_works() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let id = store.create_image(options());

        store.load(id, &mut loader);
        let (ticket, _) = loader.requests[0];
        assert!(store.deliver(ticket, CompletionSignal::Failed));
        assert_eq!(store.state(id), LoadState::Error);
        assert_eq!(store.listener_count(id), 0);

        // Retry re-enters Loading with a fresh episode.
        store.load(id, &mut loader);
        assert_eq!(store.state(id), LoadState::Loading);
        assert_eq!(loader.requests.len(), 2);

        let (retry_ticket, _) = loader.requests[1];
        assert!(store.deliver(
            retry_ticket,
            CompletionSignal::Loaded {
                size: RasterSize::new(16, 16),
                key: None,
            },
        ));
        assert_eq!(store.state(id), LoadState::Loaded);
    }

    #[test]
    fn resolution_inferred_from_extent_height() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let id = store.create_image(ImageOptions::new(
            "terrane://raster.png",
            Extent::new(0.0, 0.0, 300.0, 100.0),
        ));
        assert_eq!(store.resolution(id), None);

        store.load(id, &mut loader);
        let (ticket, _) = loader.requests[0];
        assert!(store.deliver(
            ticket,
            CompletionSignal::Loaded {
                size: RasterSize::new(150, 50),
                key: None,
            },
        ));

        // extent height 100 / pixel height 50
        assert_eq!(store.resolution(id), Some(2.0));
        assert_eq!(store.state(id), LoadState::Loaded);
    }

    #[test]
    fn resolution_computed_exactly_once() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let id = store.create_image(ImageOptions::new(
            "terrane://raster.png",
            Extent::new(0.0, 0.0, 100.0, 100.0),
        ));

        // First attempt fails; inference only runs on success.
        store.load(id, &mut loader);
        let (ticket, _) = loader.requests[0];
        let _ = store.deliver(ticket, CompletionSignal::Failed);
        assert_eq!(store.resolution(id), None);

        // Retry succeeds: inference runs once.
        store.load(id, &mut loader);
        let (ticket, _) = loader.requests[1];
        let _ = store.deliver(
            ticket,
            CompletionSignal::Loaded {
                size: RasterSize::new(50, 50),
                key: None,
            },
        );
        assert_eq!(store.resolution(id), Some(2.0));

        // A duplicate success with a different pixel height is dropped and
        // must not recompute.
        assert!(!store.deliver(
            ticket,
            CompletionSignal::Loaded {
                size: RasterSize::new(25, 25),
                key: None,
            },
        ));
        assert_eq!(store.resolution(id), Some(2.0));
    }

    #[test]
    fn preset_resolution_is_never_overwritten() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let id = store.create_image(options().with_resolution(8.0));

        store.load(id, &mut loader);
        let (ticket, _) = loader.requests[0];
        let _ = store.deliver(
            ticket,
            CompletionSignal::Loaded {
                size: RasterSize::new(10, 10),
                key: None,
            },
        );
        assert_eq!(store.resolution(id), Some(8.0));
    }

    #[test]
    fn cleared_resolution_rederives_on_next_success() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let id = store.create_image(
            ImageOptions::new("terrane://raster.png", Extent::new(0.0, 0.0, 100.0, 100.0))
                .with_resolution(8.0),
        );

        // Clearing before the first load re-arms inference.
        store.clear_resolution(id);
        assert_eq!(store.resolution(id), None);

        store.load(id, &mut loader);
        let (ticket, _) = loader.requests[0];
        let _ = store.deliver(
            ticket,
            CompletionSignal::Loaded {
                size: RasterSize::new(25, 25),
                key: None,
            },
        );
        assert_eq!(store.resolution(id), Some(4.0));
    }

    #[test]
    fn stale_ticket_is_dropped() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let id = store.create_image(options());

        store.load(id, &mut loader);
        let (ticket, _) = loader.requests[0];
        assert!(store.deliver(ticket, CompletionSignal::Failed));

        // Second redemption of the same ticket: the pair is gone.
        assert!(!store.deliver(
            ticket,
            CompletionSignal::Loaded {
                size: RasterSize::new(4, 4),
                key: None,
            },
        ));
        assert_eq!(store.state(id), LoadState::Error);
    }

    #[test]
    fn superseded_episode_ticket_is_dropped() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let id = store.create_image(options());

        store.load(id, &mut loader);
        let (first_ticket, _) = loader.requests[0];
        assert!(store.deliver(first_ticket, CompletionSignal::Failed));

        // A retry mints a new episode; the old ticket must not complete it.
        store.load(id, &mut loader);
        assert!(!store.deliver(
            first_ticket,
            CompletionSignal::Loaded {
                size: RasterSize::new(4, 4),
                key: None,
            },
        ));
        assert_eq!(store.state(id), LoadState::Loading);
        assert_eq!(store.listener_count(id), 2);
    }

    #[test]
    fn late_completion_after_destroy_is_dropped() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let id = store.create_image(options());

        store.load(id, &mut loader);
        let (ticket, _) = loader.requests[0];
        store.destroy_image(id);

        assert!(!store.deliver(
            ticket,
            CompletionSignal::Loaded {
                size: RasterSize::new(4, 4),
                key: None,
            },
        ));
    }

    #[test]
    fn deliver_without_load_is_dropped() {
        let mut store = ImageStore::new();
        let id = store.create_image(options());
        let ticket = LoadTicket {
            image: id,
            episode: 1,
        };
        assert!(!store.deliver(ticket, CompletionSignal::Failed));
        assert_eq!(store.state(id), LoadState::Idle);
    }

    #[test]
    fn set_raster_injects_without_transition() {
        let mut store = ImageStore::new();
        let id = store.create_image(options());
        let _ = store.take_changes();

        let raster = Raster::decoded(crate::image::RasterKey(3), RasterSize::new(8, 8));
        store.set_raster(id, raster);

        assert_eq!(store.raster(id), &raster);
        assert_eq!(store.state(id), LoadState::Idle, "no state transition");
        assert!(store.take_changes().is_empty(), "no notification");
    }

    #[test]
    fn added_and_removed_lifecycle() {
        let mut store = ImageStore::new();
        let id = store.create_image(options());

        let changes = store.take_changes();
        assert!(changes.added.contains(&id.idx));
        assert!(changes.removed.is_empty());

        let changes = store.take_changes();
        assert!(changes.is_empty());

        store.destroy_image(id);
        let changes = store.take_changes();
        assert!(changes.removed.contains(&id.idx));
        assert!(changes.added.is_empty());
    }

    #[test]
    fn take_changes_into_reuses_buffer() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let a = store.create_image(options());
        let b = store.create_image(options());

        let mut changes = ImageChanges::default();
        store.take_changes_into(&mut changes);
        assert_eq!(changes.added.len(), 2);

        store.load(a, &mut loader);
        store.take_changes_into(&mut changes);

        assert!(changes.added.is_empty(), "added should be cleared");
        assert!(changes.states.contains(&a.idx));
        assert!(!changes.states.contains(&b.idx));
    }

    #[test]
    fn raw_accessors_match_drained_indices() {
        let mut store = ImageStore::new();
        let mut loader = RecordingLoader::default();
        let id = store.create_image(options());
        store.load(id, &mut loader);
        let (ticket, _) = loader.requests[0];
        let _ = store.deliver(
            ticket,
            CompletionSignal::Loaded {
                size: RasterSize::new(10, 20),
                key: None,
            },
        );

        let changes = store.take_changes();
        let idx = changes.states[0];
        assert_eq!(store.state_at(idx), LoadState::Loaded);
        assert_eq!(store.raster_at(idx).size, Some(RasterSize::new(10, 20)));
        assert_eq!(store.resolution_at(idx), Some(5.0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn raw_accessor_out_of_range_panics() {
        let store = ImageStore::new();
        let _ = store.state_at(0);
    }
}
