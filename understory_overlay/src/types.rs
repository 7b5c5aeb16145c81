// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the overlay layer: identifiers, flags, colors, and geometry.

use kurbo::{Rect, RoundedRect};

/// Z-index given to morph overlays. Nothing stacks above it.
pub const OVERLAY_Z: i32 = i32::MAX;

/// Identifier for an overlay in an [`OverlayLayer`](crate::OverlayLayer).
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `OverlayId` for that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct
///   `OverlayId`.
///
/// Stale ids never alias a different live overlay because the generation must match.
/// Use [`OverlayLayer::is_alive`](crate::OverlayLayer::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct OverlayId(pub(crate) u32, pub(crate) u32);

impl OverlayId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }

    /// Returns true if `self` was created after `other`.
    ///
    /// Higher generation wins; on equal generations the higher slot wins.
    pub const fn is_newer_than(self, other: Self) -> bool {
        (self.1 > other.1) || (self.1 == other.1 && self.0 > other.0)
    }
}

bitflags::bitflags! {
    /// Overlay flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OverlayFlags: u8 {
        /// Overlay is drawn.
        const VISIBLE  = 0b0000_0001;
        /// Overlay takes part in hit testing. Morph overlays leave this unset.
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for OverlayFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// An opaque color supplied by the caller, stored as packed RGBA.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColorToken(u32);

impl ColorToken {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);

    /// Build a token from 8-bit channels.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    /// Build an opaque token from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 0xff)
    }

    /// The packed `0xRRGGBBAA` value.
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// The 8-bit channels `[r, g, b, a]`.
    pub const fn to_rgba8(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

/// Snapshot of a trigger's on-screen box and corner radius at activation.
///
/// Captured once per run and never recomputed; the overlay grows from this
/// frozen rectangle even if the trigger moves afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TriggerGeometry {
    /// Left edge in viewport coordinates.
    pub left: f64,
    /// Top edge in viewport coordinates.
    pub top: f64,
    /// Width of the box.
    pub width: f64,
    /// Height of the box.
    pub height: f64,
    /// Resolved corner radius.
    pub corner_radius: f64,
}

impl TriggerGeometry {
    /// Capture geometry from a bounding rectangle and a corner radius.
    ///
    /// The rectangle is normalized (non-negative width and height) and a negative
    /// radius is treated as `0.0`.
    pub fn capture(bounds: Rect, corner_radius: f64) -> Self {
        let r = bounds.abs();
        Self {
            left: r.x0,
            top: r.y0,
            width: r.width(),
            height: r.height(),
            corner_radius: corner_radius.max(0.0),
        }
    }

    /// The captured box as a rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }

    /// The captured box with its corner radius.
    pub fn rounded_rect(&self) -> RoundedRect {
        RoundedRect::from_rect(self.rect(), self.corner_radius)
    }
}

/// Visual state of one overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayNode {
    /// Current shape in viewport coordinates.
    pub shape: RoundedRect,
    /// Fill color.
    pub color: ColorToken,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Stacking order. Higher is drawn on top.
    pub z_index: i32,
    /// Visibility and picking flags.
    pub flags: OverlayFlags,
}

impl OverlayNode {
    /// A fully opaque, pointer-inert overlay at the top of the stack.
    pub fn morph(shape: RoundedRect, color: ColorToken) -> Self {
        Self {
            shape,
            color,
            opacity: 1.0,
            z_index: OVERLAY_Z,
            flags: OverlayFlags::VISIBLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_channels_round_trip() {
        let c = ColorToken::from_rgba8(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c.to_u32(), 0x1234_5678);
        assert_eq!(c.to_rgba8(), [0x12, 0x34, 0x56, 0x78]);
        assert_eq!(ColorToken::from_rgb8(1, 2, 3).to_rgba8()[3], 0xff);
    }

    #[test]
    fn capture_normalizes_bounds_and_radius() {
        let g = TriggerGeometry::capture(Rect::new(110.0, 50.0, 10.0, 10.0), -4.0);
        assert_eq!(g.left, 10.0);
        assert_eq!(g.top, 10.0);
        assert_eq!(g.width, 100.0);
        assert_eq!(g.height, 40.0);
        assert_eq!(g.corner_radius, 0.0);
        assert_eq!(g.rect(), Rect::new(10.0, 10.0, 110.0, 50.0));
    }

    #[test]
    fn morph_nodes_are_inert_and_on_top() {
        let node = OverlayNode::morph(
            RoundedRect::from_rect(Rect::new(0.0, 0.0, 1.0, 1.0), 0.0),
            ColorToken::TRANSPARENT,
        );
        assert!(node.flags.contains(OverlayFlags::VISIBLE));
        assert!(!node.flags.contains(OverlayFlags::PICKABLE));
        assert_eq!(node.z_index, OVERLAY_Z);
        assert_eq!(node.opacity, 1.0);
    }

    #[test]
    fn newer_than_semantics() {
        let old = OverlayId::new(10, 1);
        let newer_same_slot = OverlayId::new(10, 2);
        let same_gen_higher_slot = OverlayId::new(11, 2);
        let same_gen_lower_slot = OverlayId::new(9, 2);

        assert!(newer_same_slot.is_newer_than(old));
        assert!(same_gen_higher_slot.is_newer_than(newer_same_slot));
        assert!(!same_gen_lower_slot.is_newer_than(newer_same_slot));
    }
}
