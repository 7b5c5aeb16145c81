// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay layer: slot storage, updates, damage, and hit testing.

use alloc::vec::Vec;
use kurbo::{Point, Rect, RoundedRect, Shape};

use crate::damage::Damage;
use crate::types::{OverlayFlags, OverlayId, OverlayNode};

/// Filter applied during hit testing.
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, only consider overlays marked [`OverlayFlags::VISIBLE`].
    pub visible_only: bool,
    /// If true, only consider overlays marked [`OverlayFlags::PICKABLE`].
    pub pickable_only: bool,
}

/// Lifetime counters, for instrumentation and leak checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerStats {
    /// Overlays ever inserted.
    pub created: u64,
    /// Overlays ever removed.
    pub disposed: u64,
}

impl LayerStats {
    /// Overlays currently alive.
    pub fn live(&self) -> u64 {
        self.created - self.disposed
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: OverlayNode,
    // Bounds as of the last commit; `None` until first committed.
    committed: Option<Rect>,
    dirty: bool,
}

/// Top-of-stack layer holding transient overlays.
///
/// The layer sits outside any declarative render tree: overlays are inserted and
/// removed explicitly and are never rebuilt by a re-render. It is shared by every
/// morph control on a page; each control owns at most one overlay at a time.
#[derive(Default)]
pub struct OverlayLayer {
    slots: Vec<Option<Slot>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    // Bounds of overlays removed since the last commit.
    removed: Vec<Rect>,
    stats: LayerStats,
}

impl core::fmt::Debug for OverlayLayer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OverlayLayer")
            .field("slots_total", &self.slots.len())
            .field("live", &self.live_count())
            .field("free_list", &self.free_list.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl OverlayLayer {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an overlay and return its handle.
    pub fn insert(&mut self, node: OverlayNode) -> OverlayId {
        let slot = |generation| Slot {
            generation,
            node,
            committed: None,
            dirty: true,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(slot(generation));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(slot(generation)));
            self.generations.push(generation);
            (self.slots.len() - 1, generation)
        };
        self.stats.created += 1;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "OverlayId uses 32-bit indices by design."
        )]
        OverlayId::new(idx as u32, generation)
    }

    /// Remove an overlay. Stale or already-removed ids are ignored.
    ///
    /// Returns true if an overlay was removed.
    pub fn remove(&mut self, id: OverlayId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(slot) = self.slots[id.idx()].take() {
            if let Some(bounds) = slot.committed {
                self.removed.push(bounds);
            }
        }
        self.free_list.push(id.idx());
        self.stats.disposed += 1;
        true
    }

    /// Returns true if `id` refers to a live overlay.
    pub fn is_alive(&self, id: OverlayId) -> bool {
        self.slot(id).is_some()
    }

    /// Access a live overlay.
    pub fn get(&self, id: OverlayId) -> Option<&OverlayNode> {
        self.slot(id).map(|s| &s.node)
    }

    /// Update the shape of a live overlay.
    pub fn set_shape(&mut self, id: OverlayId, shape: RoundedRect) {
        if let Some(s) = self.slot_mut(id) {
            if s.node.shape != shape {
                s.node.shape = shape;
                s.dirty = true;
            }
        }
    }

    /// Update the opacity of a live overlay, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, id: OverlayId, opacity: f64) {
        if let Some(s) = self.slot_mut(id) {
            let opacity = opacity.clamp(0.0, 1.0);
            if s.node.opacity != opacity {
                s.node.opacity = opacity;
                s.dirty = true;
            }
        }
    }

    /// Number of live overlays.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Lifetime counters.
    pub fn stats(&self) -> LayerStats {
        self.stats
    }

    /// Iterate live overlays in paint order (lowest z first, older first on ties).
    pub fn iter_paint_order(&self) -> impl Iterator<Item = (OverlayId, &OverlayNode)> + '_ {
        let mut live: Vec<(OverlayId, &OverlayNode)> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| {
                let s = s.as_ref()?;
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "OverlayId uses 32-bit indices by design."
                )]
                Some((OverlayId::new(i as u32, s.generation), &s.node))
            })
            .collect();
        live.sort_by(|(a, na), (b, nb)| {
            na.z_index.cmp(&nb.z_index).then_with(|| {
                if a.is_newer_than(*b) {
                    core::cmp::Ordering::Greater
                } else {
                    core::cmp::Ordering::Less
                }
            })
        });
        live.into_iter()
    }

    /// Collect damage since the last commit.
    ///
    /// Removed overlays contribute their last committed bounds. Changed overlays
    /// contribute both old and new bounds.
    pub fn commit(&mut self) -> Damage {
        let mut damage = Damage::default();
        for r in self.removed.drain(..) {
            damage.push(r);
        }
        for slot in self.slots.iter_mut().flatten() {
            if !slot.dirty {
                continue;
            }
            let bounds = slot.node.shape.bounding_box();
            match slot.committed {
                Some(old) if old != bounds => {
                    damage.push(old);
                    damage.push(bounds);
                }
                // New, or same bounds with only the paint changed.
                _ => damage.push(bounds),
            }
            slot.committed = Some(bounds);
            slot.dirty = false;
        }
        damage
    }

    /// Hit test a viewport point. Returns the topmost matching overlay.
    ///
    /// If several overlays share the highest z-index, the newer [`OverlayId`] wins.
    pub fn hit_test_point(&self, pt: Point, filter: QueryFilter) -> Option<OverlayId> {
        let mut best: Option<(OverlayId, i32)> = None;
        for (i, slot) in self.slots.iter().enumerate() {
            let Some(slot) = slot else {
                continue;
            };
            let flags = slot.node.flags;
            if filter.visible_only && !flags.contains(OverlayFlags::VISIBLE) {
                continue;
            }
            if filter.pickable_only && !flags.contains(OverlayFlags::PICKABLE) {
                continue;
            }
            if !slot.node.shape.contains(pt) {
                continue;
            }
            #[allow(
                clippy::cast_possible_truncation,
                reason = "OverlayId uses 32-bit indices by design."
            )]
            let id = OverlayId::new(i as u32, slot.generation);
            let z = slot.node.z_index;
            let beats_best = match best {
                Some((best_id, z_best)) => z > z_best || (z == z_best && id.is_newer_than(best_id)),
                None => true,
            };
            if beats_best {
                best = Some((id, z));
            }
        }
        best.map(|(id, _)| id)
    }

    // --- internals ---

    fn slot(&self, id: OverlayId) -> Option<&Slot> {
        self.slots
            .get(id.idx())?
            .as_ref()
            .filter(|s| s.generation == id.generation())
    }

    fn slot_mut(&mut self, id: OverlayId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.idx())?
            .as_mut()
            .filter(|s| s.generation == id.generation())
    }
}
