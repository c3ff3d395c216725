// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays feature storage with position and style management.

use alloc::vec::Vec;

use kurbo::Point;
use understory_dirty::{CycleHandling, DirtyTracker};

use crate::dirty;
use crate::style::IconStyle;

use super::id::FeatureId;

/// The set of changes produced by a single
/// [`FeatureStore::take_changes`] call.
///
/// Each field contains the raw slot indices of features that changed in the
/// corresponding category, for use with the `*_at()` accessors.
#[derive(Clone, Debug, Default)]
pub struct FeatureChanges {
    /// Features whose icon style was replaced.
    pub styles: Vec<u32>,
    /// Features whose map position changed.
    pub positions: Vec<u32>,
    /// Features created since the last drain.
    pub added: Vec<u32>,
    /// Features destroyed since the last drain.
    pub removed: Vec<u32>,
}

impl FeatureChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.styles.clear();
        self.positions.clear();
        self.added.clear();
        self.removed.clear();
    }

    /// Returns whether no change of any kind was drained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
            && self.positions.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
    }
}

/// Struct-of-arrays storage for all features.
///
/// Features are addressed by [`FeatureId`] handles. Internally, each feature
/// occupies a slot in parallel arrays. Destroyed features are recycled via a
/// free list, and generation counters prevent stale handle access.
#[derive(Debug)]
pub struct FeatureStore {
    // -- Properties (set by callers) --
    position: Vec<Point>,
    style: Vec<Option<IconStyle>>,

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

impl Default for FeatureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureStore {
    /// Creates an empty feature store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec::new(),
            style: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new feature at the map origin with no style.
    pub fn create_feature(&mut self) -> FeatureId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.position[idx as usize] = Point::ZERO;
            self.style[idx as usize] = None;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.position.push(Point::ZERO);
            self.style.push(None);
            self.generation.push(0);
            idx
        };

        self.pending_added.push(idx);

        FeatureId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a feature, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_feature(&mut self, id: FeatureId) {
        self.validate(id);
        let idx = id.idx;

        self.style[idx as usize] = None;
        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.pending_removed.push(idx);
    }

    /// Returns whether the given handle refers to a live feature.
    #[must_use]
    pub fn is_alive(&self, id: FeatureId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the handles of all live features.
    #[must_use]
    pub fn features(&self) -> Vec<FeatureId> {
        let mut out = Vec::new();
        for idx in 0..self.len {
            if !self.free_list.contains(&idx) {
                out.push(FeatureId {
                    idx,
                    generation: self.generation[idx as usize],
                });
            }
        }
        out
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the map-space position of a feature.
    #[must_use]
    pub fn position(&self, id: FeatureId) -> Point {
        self.validate(id);
        self.position[id.idx as usize]
    }

    /// Returns the icon style of a feature, if any.
    #[must_use]
    pub fn style(&self, id: FeatureId) -> Option<&IconStyle> {
        self.validate(id);
        self.style[id.idx as usize].as_ref()
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the map-space position of a feature.
    ///
    /// Marks the GEOMETRY channel dirty.
    pub fn set_position(&mut self, id: FeatureId, position: Point) {
        self.validate(id);
        self.position[id.idx as usize] = position;
        self.dirty.mark(id.idx, dirty::GEOMETRY);
    }

    /// Replaces the icon style of a feature.
    ///
    /// Marks the STYLE channel dirty.
    pub fn set_style(&mut self, id: FeatureId, style: Option<IconStyle>) {
        self.validate(id);
        self.style[id.idx as usize] = style;
        self.dirty.mark(id.idx, dirty::STYLE);
    }

    // -- Change stream --

    /// Drains the changes accumulated since the last drain.
    pub fn take_changes(&mut self) -> FeatureChanges {
        let mut changes = FeatureChanges::default();
        self.take_changes_into(&mut changes);
        changes
    }

    /// Like [`take_changes`](Self::take_changes), but reuses a
    /// caller-provided buffer to avoid allocation.
    pub fn take_changes_into(&mut self, changes: &mut FeatureChanges) {
        changes.clear();

        changes.styles = self.dirty.drain(dirty::STYLE).deterministic().run().collect();
        changes.positions = self
            .dirty
            .drain(dirty::GEOMETRY)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    // -- Raw-index accessors for collaborators --
    //
    // These accept raw slot indices (as found in `FeatureChanges`) rather
    // than `FeatureId` handles, skipping generation validation. Only use
    // with indices that came from a drained change list.

    /// Returns the position at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn position_at(&self, idx: u32) -> Point {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.position[idx as usize]
    }

    /// Returns the style at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn style_at(&self, idx: u32) -> Option<&IconStyle> {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.style[idx as usize].as_ref()
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: FeatureId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale FeatureId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }
}
