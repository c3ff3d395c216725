// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for terrane
//! diagnostics.
//!
//! This crate provides [`TraceSink`](terrane_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`recorder::RecorderSink`] — in-memory event recording for later
//!   inspection or export.
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`chrome::export`] — writes Chrome Trace Event Format JSON from
//!   recorded events.

pub mod chrome;
pub mod pretty;
pub mod recorder;
