// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coarse damage returned by [`OverlayLayer::commit`](crate::OverlayLayer::commit).

use alloc::vec::Vec;
use kurbo::Rect;

/// Regions that need repainting since the previous commit.
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// Bounding boxes of added, removed, moved, or repainted overlays.
    pub dirty_rects: Vec<Rect>,
}

impl Damage {
    /// True if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.dirty_rects.is_empty()
    }

    /// Union of all dirty rectangles. Returns `None` if empty.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    pub(crate) fn push(&mut self, r: Rect) {
        if r.width() > 0.0 && r.height() > 0.0 {
            self.dirty_rects.push(r);
        }
    }
}
