// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event in a
//! `Vec` for later inspection or [export](crate::chrome::export). Load-loop
//! events are rare compared to per-frame rendering traffic, so a plain
//! in-memory log is plenty.

use terrane_core::trace::{DrainEvent, LoadBeginEvent, LoadEndEvent, StylePushEvent, TraceSink};

/// One recorded load-loop event.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A loading episode began.
    LoadBegin(LoadBeginEvent),
    /// A completion signal was consumed.
    LoadEnd(LoadEndEvent),
    /// A rebuilt style was pushed into a feature.
    StylePush(StylePushEvent),
    /// A change-stream drain completed.
    Drain(DrainEvent),
}

/// A [`TraceSink`] that records every event in order.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }
}

impl TraceSink for RecorderSink {
    fn on_load_begin(&mut self, e: &LoadBeginEvent) {
        self.events.push(RecordedEvent::LoadBegin(*e));
    }

    fn on_load_end(&mut self, e: &LoadEndEvent) {
        self.events.push(RecordedEvent::LoadEnd(*e));
    }

    fn on_style_push(&mut self, e: &StylePushEvent) {
        self.events.push(RecordedEvent::StylePush(*e));
    }

    fn on_drain(&mut self, e: &DrainEvent) {
        self.events.push(RecordedEvent::Drain(*e));
    }
}
