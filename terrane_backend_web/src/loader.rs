// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `Image`-element loading with one-shot completion handlers.
//!
//! [`DomImageLoader`] starts one browser fetch per [`LoadRequest`] by
//! creating an `Image` element, applying the cross-origin policy, wiring
//! `onload`/`onerror` handlers, and setting `src`. The handlers only push a
//! completion record into a queue; the embedding frame loop calls
//! [`drain`](DomImageLoader::drain) to deliver queued signals into the
//! store on the next tick, which keeps all store mutation in one place.
//!
//! Handlers are one-shot: when a completion is drained (or a later episode
//! supersedes it), both handlers are detached and the element is released
//! together with them. There is no cancellation — an undrained in-flight
//! fetch simply runs to completion and its signal is dropped by the store
//! if the episode is stale.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use terrane_core::image::{
    CompletionSignal, CrossOrigin, ImageLoader, ImageStore, LoadRequest, LoadTicket, RasterSize,
};

// Direct bindings to the `Image` constructor instead of wrapper types — the
// loader needs nothing else from the DOM.
#[wasm_bindgen]
extern "C" {
    type HtmlImage;

    #[wasm_bindgen(constructor, js_class = "Image")]
    fn new() -> HtmlImage;

    #[wasm_bindgen(method, setter, js_name = "src")]
    fn set_src(this: &HtmlImage, src: &str);

    #[wasm_bindgen(method, setter, js_name = "crossOrigin")]
    fn set_cross_origin(this: &HtmlImage, value: Option<&str>);

    #[wasm_bindgen(method, setter, js_name = "onload")]
    fn set_onload(this: &HtmlImage, callback: &JsValue);

    #[wasm_bindgen(method, setter, js_name = "onerror")]
    fn set_onerror(this: &HtmlImage, callback: &JsValue);

    #[wasm_bindgen(method, getter, js_name = "naturalWidth")]
    fn natural_width(this: &HtmlImage) -> u32;

    #[wasm_bindgen(method, getter, js_name = "naturalHeight")]
    fn natural_height(this: &HtmlImage) -> u32;
}

/// The `crossorigin` attribute value for a [`CrossOrigin`] policy.
fn cross_origin_value(policy: CrossOrigin) -> &'static str {
    match policy {
        CrossOrigin::Anonymous => "anonymous",
        CrossOrigin::UseCredentials => "use-credentials",
    }
}

/// One fetch in progress: the element plus its pair of one-shot handlers,
/// held together and released together.
struct InFlight {
    ticket: LoadTicket,
    element: HtmlImage,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

struct LoaderInner {
    /// Completions pushed by `onload`/`onerror`, drained by the frame loop.
    completions: RefCell<Vec<(LoadTicket, CompletionSignal)>>,
    /// Fetches whose handlers have not fired or been drained yet.
    in_flight: RefCell<Vec<InFlight>>,
}

/// Browser [`ImageLoader`] backed by `Image` elements.
///
/// Create once, pass to [`ImageStore::load`] for each resource, and call
/// [`drain`](Self::drain) from the frame loop to deliver completions.
pub struct DomImageLoader {
    inner: Rc<LoaderInner>,
}

impl core::fmt::Debug for DomImageLoader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomImageLoader")
            .field("in_flight", &self.inner.in_flight.borrow().len())
            .field("queued", &self.inner.completions.borrow().len())
            .finish()
    }
}

impl Default for DomImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DomImageLoader {
    /// Creates a loader with no fetches in flight.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(LoaderInner {
                completions: RefCell::new(Vec::new()),
                in_flight: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Returns the number of fetches whose completion has not been drained.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.borrow().len()
    }

    /// Delivers all queued completion signals into `store`.
    ///
    /// Returns the number of signals the store consumed. Each drained
    /// completion also detaches the element's handlers and releases the
    /// element, whether or not the store consumed the signal.
    pub fn drain(&self, store: &mut ImageStore) -> usize {
        let completions: Vec<(LoadTicket, CompletionSignal)> =
            self.inner.completions.borrow_mut().drain(..).collect();

        let mut consumed = 0;
        for (ticket, signal) in completions {
            self.release(ticket);
            if store.deliver(ticket, signal) {
                consumed += 1;
            }
        }
        consumed
    }

    /// Detaches both handlers for `ticket` and drops the element.
    fn release(&self, ticket: LoadTicket) {
        let mut in_flight = self.inner.in_flight.borrow_mut();
        if let Some(pos) = in_flight.iter().position(|f| f.ticket == ticket) {
            let entry = in_flight.swap_remove(pos);
            entry.element.set_onload(&JsValue::NULL);
            entry.element.set_onerror(&JsValue::NULL);
        }
    }
}

impl ImageLoader for DomImageLoader {
    fn load(&mut self, request: &LoadRequest<'_>) {
        let element = HtmlImage::new();
        element.set_cross_origin(request.cross_origin.map(cross_origin_value));

        let ticket = request.ticket;

        let inner = Rc::clone(&self.inner);
        let el = element.clone();
        let onload = Closure::wrap(Box::new(move || {
            let size = RasterSize::new(el.natural_width(), el.natural_height());
            inner
                .completions
                .borrow_mut()
                .push((ticket, CompletionSignal::Loaded { size, key: None }));
        }) as Box<dyn FnMut()>);

        let inner = Rc::clone(&self.inner);
        let onerror = Closure::wrap(Box::new(move || {
            inner
                .completions
                .borrow_mut()
                .push((ticket, CompletionSignal::Failed));
        }) as Box<dyn FnMut()>);

        // Wire the one-shot pair before starting the fetch, so a cached
        // image completing synchronously still lands in the queue.
        element.set_onload(onload.as_ref());
        element.set_onerror(onerror.as_ref());
        element.set_src(request.src);

        self.inner.in_flight.borrow_mut().push(InFlight {
            ticket,
            element,
            _onload: onload,
            _onerror: onerror,
        });
    }
}
