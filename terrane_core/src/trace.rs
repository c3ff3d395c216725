// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the load loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! load-loop instrumentation calls at each stage. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! Events are emitted by the embedding loop (the code that calls
//! [`ImageStore::load`], drains completions, and syncs bindings), not by the
//! stores themselves. Timestamps are embedder-supplied microseconds from
//! whatever monotonic clock the platform has; a deterministic harness may
//! simply count steps.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//!
//! [`ImageStore::load`]: crate::image::ImageStore::load

/// How a loading episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadOutcome {
    /// The raster decoded successfully.
    Loaded,
    /// The fetch or decode failed.
    Failed,
}

/// Emitted when a loading episode begins.
#[derive(Clone, Copy, Debug)]
pub struct LoadBeginEvent {
    /// Raw slot index of the image resource.
    pub image: u32,
    /// The loading episode that began.
    pub episode: u64,
    /// Embedder-supplied timestamp in microseconds.
    pub at_us: u64,
}

/// Emitted when a completion signal is consumed.
#[derive(Clone, Copy, Debug)]
pub struct LoadEndEvent {
    /// Raw slot index of the image resource.
    pub image: u32,
    /// The loading episode that ended.
    pub episode: u64,
    /// How the episode ended.
    pub outcome: LoadOutcome,
    /// Embedder-supplied timestamp in microseconds.
    pub at_us: u64,
}

/// Emitted when a binding pushes a rebuilt style into its host feature.
#[derive(Clone, Copy, Debug)]
pub struct StylePushEvent {
    /// Raw slot index of the host feature.
    pub feature: u32,
    /// Embedder-supplied timestamp in microseconds.
    pub at_us: u64,
}

/// Emitted after a change-stream drain, with the drained counts.
#[derive(Clone, Copy, Debug)]
pub struct DrainEvent {
    /// Number of image resources whose state changed.
    pub images: u32,
    /// Number of features whose style or position changed.
    pub features: u32,
    /// Embedder-supplied timestamp in microseconds.
    pub at_us: u64,
}

/// Receives trace events from the load loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a loading episode begins.
    fn on_load_begin(&mut self, e: &LoadBeginEvent) {
        _ = e;
    }

    /// Called when a completion signal is consumed.
    fn on_load_end(&mut self, e: &LoadEndEvent) {
        _ = e;
    }

    /// Called when a rebuilt style is pushed into a feature.
    fn on_style_push(&mut self, e: &StylePushEvent) {
        _ = e;
    }

    /// Called after a change-stream drain.
    fn on_drain(&mut self, e: &DrainEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`LoadBeginEvent`].
    #[inline]
    pub fn load_begin(&mut self, e: &LoadBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_load_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LoadEndEvent`].
    #[inline]
    pub fn load_end(&mut self, e: &LoadEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_load_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StylePushEvent`].
    #[inline]
    pub fn style_push(&mut self, e: &StylePushEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_style_push(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DrainEvent`].
    #[inline]
    pub fn drain(&mut self, e: &DrainEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_drain(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}
