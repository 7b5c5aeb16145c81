// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay sessions: one overlay plus its expansion and fade.
//!
//! ## Lifecycle
//!
//! 1) [`OverlaySession::begin`] inserts an opaque, pointer-inert overlay at the frozen
//!    trigger geometry, on top of everything else.
//! 2) [`OverlaySession::expand`] schedules the growth to the full viewport. The viewport
//!    size is read at this call, not earlier.
//! 3) [`OverlaySession::fade_out`] schedules the opacity fade.
//! 4) [`OverlaySession::dispose`] removes the overlay from the layer.
//!
//! [`OverlaySession::advance`] writes the frame for the current clock value into the
//! layer; call it once per host frame while the session is live.
//!
//! After `dispose`, every method is a no-op. Disposing twice is fine.

use core::time::Duration;

use kurbo::{Rect, RoundedRect, Size};
use understory_motion::{MorphTiming, Tween};

use crate::layer::OverlayLayer;
use crate::types::{ColorToken, OverlayId, OverlayNode, TriggerGeometry};

/// Completion handle for a scheduled animation.
///
/// The animation has finished once the host clock reaches [`AnimationHandle::deadline`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AnimationHandle {
    deadline: Duration,
}

impl AnimationHandle {
    fn new(tween: &Tween) -> Self {
        Self {
            deadline: tween.end(),
        }
    }

    /// Clock value at which the animation completes.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Returns true once the animation has completed. Never true early.
    pub fn is_complete(&self, now: Duration) -> bool {
        now >= self.deadline
    }
}

#[derive(Copy, Clone, Debug)]
struct Expansion {
    tween: Tween,
    to: Rect,
}

/// One live overlay and its two animations.
#[derive(Debug)]
pub struct OverlaySession {
    id: OverlayId,
    geometry: TriggerGeometry,
    color: ColorToken,
    expansion: Option<Expansion>,
    fade: Option<Tween>,
    disposed: bool,
}

impl OverlaySession {
    /// Insert an overlay at `geometry`, filled with `color`.
    ///
    /// The color is copied; later changes to the caller's token do not affect this session.
    pub fn begin(layer: &mut OverlayLayer, geometry: TriggerGeometry, color: ColorToken) -> Self {
        let id = layer.insert(OverlayNode::morph(geometry.rounded_rect(), color));
        tracing::debug!(?id, rect = ?geometry.rect(), "overlay session begun");
        Self {
            id,
            geometry,
            color,
            expansion: None,
            fade: None,
            disposed: false,
        }
    }

    /// Handle of the overlay in its layer.
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// The frozen trigger geometry.
    pub fn geometry(&self) -> TriggerGeometry {
        self.geometry
    }

    /// The color captured at `begin`.
    pub fn color(&self) -> ColorToken {
        self.color
    }

    /// Returns true after [`OverlaySession::dispose`].
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Schedule the expansion from the trigger rectangle to `(0, 0)..viewport`.
    ///
    /// The corner radius shrinks to zero over the same curve. Returns `None` on a
    /// disposed session. A second call returns the handle of the first.
    pub fn expand(
        &mut self,
        viewport: Size,
        start: Duration,
        timing: &MorphTiming,
    ) -> Option<AnimationHandle> {
        if self.disposed {
            return None;
        }
        let expansion = *self.expansion.get_or_insert_with(|| Expansion {
            tween: Tween::new(start, timing.expand_duration, timing.expand_easing),
            to: Rect::from_origin_size((0.0, 0.0), viewport),
        });
        Some(AnimationHandle::new(&expansion.tween))
    }

    /// Schedule the fade from fully opaque to fully transparent.
    ///
    /// Returns `None` on a disposed session. A second call returns the handle of the first.
    pub fn fade_out(&mut self, start: Duration, timing: &MorphTiming) -> Option<AnimationHandle> {
        if self.disposed {
            return None;
        }
        let fade = *self
            .fade
            .get_or_insert_with(|| Tween::new(start, timing.fade_duration, timing.fade_easing));
        Some(AnimationHandle::new(&fade))
    }

    /// Shape and opacity at `now`.
    pub fn frame(&self, now: Duration) -> (RoundedRect, f64) {
        let from = self.geometry.rect();
        let shape = match &self.expansion {
            Some(e) => {
                let t = e.tween.progress(now);
                let rect = Rect::new(
                    lerp(from.x0, e.to.x0, t),
                    lerp(from.y0, e.to.y0, t),
                    lerp(from.x1, e.to.x1, t),
                    lerp(from.y1, e.to.y1, t),
                );
                RoundedRect::from_rect(rect, lerp(self.geometry.corner_radius, 0.0, t))
            }
            None => self.geometry.rounded_rect(),
        };
        let opacity = self.fade.map_or(1.0, |f| f.sample(1.0, 0.0, now));
        (shape, opacity)
    }

    /// Write the frame for `now` into the layer.
    pub fn advance(&self, layer: &mut OverlayLayer, now: Duration) {
        if self.disposed {
            return;
        }
        let (shape, opacity) = self.frame(now);
        tracing::trace!(id = ?self.id, ?now, opacity, "overlay frame");
        layer.set_shape(self.id, shape);
        layer.set_opacity(self.id, opacity);
    }

    /// Remove the overlay from the layer and drop both animations.
    pub fn dispose(&mut self, layer: &mut OverlayLayer) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.expansion = None;
        self.fade = None;
        layer.remove(self.id);
        tracing::debug!(id = ?self.id, "overlay session disposed");
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OVERLAY_Z, OverlayFlags};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn geometry() -> TriggerGeometry {
        TriggerGeometry {
            left: 10.0,
            top: 10.0,
            width: 100.0,
            height: 40.0,
            corner_radius: 8.0,
        }
    }

    const VIEWPORT: Size = Size::new(1280.0, 800.0);

    #[test]
    fn begin_places_inert_overlay_at_trigger() {
        let mut layer = OverlayLayer::new();
        let color = ColorToken::from_rgb8(0x33, 0x66, 0x99);
        let s = OverlaySession::begin(&mut layer, geometry(), color);
        let node = layer.get(s.id()).expect("overlay should be live");
        assert_eq!(node.shape.rect(), Rect::new(10.0, 10.0, 110.0, 50.0));
        assert_eq!(node.shape.radii().as_single_radius(), Some(8.0));
        assert_eq!(node.color, color);
        assert_eq!(node.z_index, OVERLAY_Z);
        assert!(!node.flags.contains(OverlayFlags::PICKABLE));
    }

    #[test]
    fn expansion_reaches_full_viewport_at_deadline() {
        let mut layer = OverlayLayer::new();
        let timing = MorphTiming::default();
        let mut s = OverlaySession::begin(&mut layer, geometry(), ColorToken::TRANSPARENT);
        let h = s.expand(VIEWPORT, ms(0), &timing).expect("live session");
        assert_eq!(h.deadline(), ms(600));
        assert!(!h.is_complete(ms(599)));
        assert!(h.is_complete(ms(600)));

        s.advance(&mut layer, ms(600));
        let node = layer.get(s.id()).expect("overlay should be live");
        assert_eq!(node.shape.rect(), Rect::new(0.0, 0.0, 1280.0, 800.0));
        assert_eq!(node.shape.radii().as_single_radius(), Some(0.0));
        assert_eq!(node.opacity, 1.0);
    }

    #[test]
    fn expansion_midpoint_is_half_way() {
        let mut layer = OverlayLayer::new();
        let timing = MorphTiming::default();
        let mut s = OverlaySession::begin(&mut layer, geometry(), ColorToken::TRANSPARENT);
        let _ = s.expand(VIEWPORT, ms(0), &timing);
        let (shape, _) = s.frame(ms(300));
        let r = shape.rect();
        assert!((r.x0 - 5.0).abs() < 1e-6, "x0 = {}", r.x0);
        assert!((r.x1 - 695.0).abs() < 1e-6, "x1 = {}", r.x1);
        assert!((shape.radii().top_left - 4.0).abs() < 1e-6);
    }

    #[test]
    fn second_expand_keeps_first_schedule() {
        let mut layer = OverlayLayer::new();
        let timing = MorphTiming::default();
        let mut s = OverlaySession::begin(&mut layer, geometry(), ColorToken::TRANSPARENT);
        let first = s.expand(VIEWPORT, ms(0), &timing);
        let second = s.expand(Size::new(1.0, 1.0), ms(100), &timing);
        assert_eq!(first, second);
    }

    #[test]
    fn fade_goes_opaque_to_transparent() {
        let mut layer = OverlayLayer::new();
        let timing = MorphTiming::default();
        let mut s = OverlaySession::begin(&mut layer, geometry(), ColorToken::TRANSPARENT);
        let h = s.fade_out(ms(600), &timing).expect("live session");
        assert_eq!(h.deadline(), ms(1000));
        assert_eq!(s.frame(ms(600)).1, 1.0);
        assert!(s.frame(ms(800)).1 < 0.5, "ease-out fades quickly");
        assert_eq!(s.frame(ms(1000)).1, 0.0);
    }

    #[test]
    fn captured_geometry_and_color_survive_the_run() {
        let mut layer = OverlayLayer::new();
        let timing = MorphTiming::default();
        let color = ColorToken::from_rgba8(0x10, 0x20, 0x30, 0xff);
        let mut s = OverlaySession::begin(&mut layer, geometry(), color);
        let _ = s.expand(VIEWPORT, ms(0), &timing);
        let _ = s.fade_out(ms(600), &timing);
        s.advance(&mut layer, ms(800));

        assert_eq!(s.geometry(), geometry());
        assert_eq!(s.color(), color);
        assert_eq!(layer.get(s.id()).map(|n| n.color), Some(color));
    }

    #[test]
    fn dispose_is_idempotent_and_later_calls_are_noops() {
        let mut layer = OverlayLayer::new();
        let timing = MorphTiming::default();
        let mut s = OverlaySession::begin(&mut layer, geometry(), ColorToken::TRANSPARENT);
        s.dispose(&mut layer);
        s.dispose(&mut layer);
        assert!(s.is_disposed());
        assert_eq!(layer.live_count(), 0);
        assert_eq!(layer.stats().disposed, 1);

        assert!(s.expand(VIEWPORT, ms(0), &timing).is_none());
        assert!(s.fade_out(ms(0), &timing).is_none());
        s.advance(&mut layer, ms(10));
        assert_eq!(layer.live_count(), 0);
    }

    #[test]
    fn dispose_does_not_touch_reused_slot() {
        let mut layer = OverlayLayer::new();
        let mut s = OverlaySession::begin(&mut layer, geometry(), ColorToken::TRANSPARENT);
        s.dispose(&mut layer);
        let other = OverlaySession::begin(&mut layer, geometry(), ColorToken::TRANSPARENT);
        s.dispose(&mut layer);
        assert!(layer.is_alive(other.id()));
    }
}
