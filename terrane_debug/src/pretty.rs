// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use terrane_core::trace::{
    DrainEvent, LoadBeginEvent, LoadEndEvent, LoadOutcome, StylePushEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn outcome_name(outcome: LoadOutcome) -> &'static str {
    match outcome {
        LoadOutcome::Loaded => "loaded",
        LoadOutcome::Failed => "failed",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_load_begin(&mut self, e: &LoadBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[load] begin image={} episode={} t={}µs",
            e.image, e.episode, e.at_us,
        );
    }

    fn on_load_end(&mut self, e: &LoadEndEvent) {
        let _ = writeln!(
            self.writer,
            "[load] end image={} episode={} outcome={} t={}µs",
            e.image,
            e.episode,
            outcome_name(e.outcome),
            e.at_us,
        );
    }

    fn on_style_push(&mut self, e: &StylePushEvent) {
        let _ = writeln!(
            self.writer,
            "[style] push feature={} t={}µs",
            e.feature, e.at_us,
        );
    }

    fn on_drain(&mut self, e: &DrainEvent) {
        let _ = writeln!(
            self.writer,
            "[drain] images={} features={} t={}µs",
            e.images, e.features, e.at_us,
        );
    }
}
