// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] writes recorded events as [Chrome Trace Event Format][spec]
//! JSON, suitable for loading into `chrome://tracing` or
//! [Perfetto](https://ui.perfetto.dev/). Each image resource gets its own
//! track (`tid`), so overlapping loading episodes stay visually separate.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::RecordedEvent;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects. Timestamps
/// are the embedder-supplied microsecond values carried by the events.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::new();

    for recorded in events {
        match *recorded {
            RecordedEvent::LoadBegin(e) => {
                out.push(json!({
                    "ph": "B",
                    "name": "Load",
                    "cat": "Imagery",
                    "ts": e.at_us,
                    "pid": 0,
                    "tid": e.image,
                    "args": {
                        "episode": e.episode,
                    }
                }));
            }
            RecordedEvent::LoadEnd(e) => {
                out.push(json!({
                    "ph": "E",
                    "name": "Load",
                    "cat": "Imagery",
                    "ts": e.at_us,
                    "pid": 0,
                    "tid": e.image,
                    "args": {
                        "episode": e.episode,
                        "outcome": format!("{:?}", e.outcome),
                    }
                }));
            }
            RecordedEvent::StylePush(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "StylePush",
                    "cat": "Style",
                    "ts": e.at_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "feature": e.feature,
                    }
                }));
            }
            RecordedEvent::Drain(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "Drain",
                    "cat": "Changes",
                    "ts": e.at_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "images": e.images,
                        "features": e.features,
                    }
                }));
            }
        }
    }

    serde_json::to_writer(&mut *writer, &out).map_err(io::Error::other)
}
