// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for terrane.
//!
//! This crate provides the browser implementation of the
//! [`ImageLoader`](terrane_core::image::ImageLoader) contract:
//! [`DomImageLoader`] fetches rasters through `Image` elements, with
//! one-shot `onload`/`onerror` handlers feeding a completion queue that the
//! embedding frame loop drains into the store.

#![no_std]

extern crate alloc;

mod loader;

pub use loader::DomImageLoader;
pub use terrane_core::image::ImageLoader;
