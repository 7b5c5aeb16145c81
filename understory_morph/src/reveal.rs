// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Morph controller that reveals content in place.
//!
//! ## Timeline
//!
//! With the default [`MorphTiming`], for an activation at `T`:
//!
//! - `T`: overlay inserted at the trigger's box; `Expanding`.
//! - `T + 600ms`: viewport fully covered; `HandoffPending`, the reveal callback runs,
//!   then `Settled` while the revealed content paints under full cover.
//! - `T + 800ms`: `FadingOut`.
//! - `T + 1200ms`: overlay disposed; `Idle`.
//!
//! Unlike navigation, the reveal is never fired early: revealed content shows as soon
//! as it mounts and must not pop in while the overlay is still growing.

use core::time::Duration;

use understory_motion::{MorphTiming, TimingError};
use understory_overlay::{ColorToken, OverlayLayer};

use crate::control::{Activation, MorphCore};
use crate::host::{TriggerElement, Viewport};
use crate::phase::AnimationPhase;

/// A control that expands into the viewport and then calls `on_reveal_complete`.
///
/// ```
/// use core::time::Duration;
/// use kurbo::{Rect, Size};
/// use understory_morph::{AnimationPhase, RevealMorph, RevealSignal};
/// use understory_overlay::{ColorToken, OverlayLayer, TriggerGeometry};
///
/// let mut layer = OverlayLayer::new();
/// let revealed = RevealSignal::new();
/// let mut control = RevealMorph::new(revealed.trigger(), ColorToken::from_rgb8(0x20, 0x20, 0x20));
///
/// let trigger = TriggerGeometry::capture(Rect::new(40.0, 300.0, 200.0, 348.0), 24.0);
/// control.activate(&mut layer, &trigger, &Size::new(1280.0, 800.0), Duration::ZERO);
///
/// control.update(&mut layer, Duration::from_millis(400));
/// assert!(!revealed.is_revealed());
/// control.update(&mut layer, Duration::from_millis(600));
/// assert!(revealed.is_revealed());
/// assert_eq!(control.update(&mut layer, Duration::from_millis(1200)), AnimationPhase::Idle);
/// ```
pub struct RevealMorph<F: FnMut()> {
    core: MorphCore,
    on_reveal_complete: F,
    hold_until: Duration,
}

impl<F: FnMut()> core::fmt::Debug for RevealMorph<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RevealMorph")
            .field("core", &self.core)
            .field("hold_until", &self.hold_until)
            .finish_non_exhaustive()
    }
}

impl<F: FnMut()> RevealMorph<F> {
    /// Create a control with the default timing.
    pub fn new(on_reveal_complete: F, accent: ColorToken) -> Self {
        Self {
            core: MorphCore::new(accent),
            on_reveal_complete,
            hold_until: Duration::ZERO,
        }
    }

    /// Create a control with custom timing.
    pub fn with_timing(
        on_reveal_complete: F,
        accent: ColorToken,
        timing: MorphTiming,
    ) -> Result<Self, TimingError> {
        Ok(Self {
            core: MorphCore::with_timing(accent, timing)?,
            on_reveal_complete,
            hold_until: Duration::ZERO,
        })
    }

    /// Current phase.
    pub fn phase(&self) -> AnimationPhase {
        self.core.phase()
    }

    /// Returns true while a run is in flight.
    pub fn is_running(&self) -> bool {
        self.core.phase() != AnimationPhase::Idle
    }

    /// Number of runs started so far.
    pub fn runs(&self) -> u64 {
        self.core.machine.runs()
    }

    /// Replace the accent color. A run in flight keeps the color it started with.
    pub fn set_accent(&mut self, accent: ColorToken) {
        self.core.accent = accent;
    }

    /// Start a run from `trigger`, unless one is already in flight.
    pub fn activate(
        &mut self,
        layer: &mut OverlayLayer,
        trigger: &impl TriggerElement,
        viewport: &impl Viewport,
        now: Duration,
    ) -> Activation {
        self.core.activate(layer, trigger, viewport, now)
    }

    /// Advance to `now`: reveal on full cover, hold, fade, and clean up as deadlines pass.
    ///
    /// Call once per host frame. A late call catches up through every elapsed deadline
    /// in order; the callback still runs exactly once per run.
    pub fn update(&mut self, layer: &mut OverlayLayer, now: Duration) -> AnimationPhase {
        loop {
            match self.core.phase() {
                AnimationPhase::Idle => break,
                AnimationPhase::Expanding => {
                    let Some(covered_at) = self.core.expansion_done(now) else {
                        break;
                    };
                    self.core
                        .machine
                        .advance(AnimationPhase::HandoffPending, covered_at);
                }
                AnimationPhase::HandoffPending => {
                    let at = self.core.machine.entered_at();
                    tracing::info!(?at, "revealing under full cover");
                    (self.on_reveal_complete)();
                    self.hold_until = at.saturating_add(self.core.timing.reveal_hold);
                    self.core.machine.advance(AnimationPhase::Settled, at);
                }
                AnimationPhase::Settled => {
                    if now < self.hold_until {
                        break;
                    }
                    self.core.begin_fade(self.hold_until);
                }
                AnimationPhase::FadingOut => {
                    if !self.core.finish_if_faded(layer, now) {
                        break;
                    }
                }
            }
        }
        self.core.paint(layer, now);
        self.core.phase()
    }

    /// Dispose any live overlay and return to `Idle`, for when the control is torn down.
    ///
    /// If the reveal has not run yet, it will not run for this activation.
    pub fn unmount(&mut self, layer: &mut OverlayLayer, now: Duration) {
        self.core.unmount(layer, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use kurbo::{Rect, Size};
    use understory_overlay::TriggerGeometry;

    const VIEWPORT: Size = Size::new(1280.0, 800.0);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn trigger() -> TriggerGeometry {
        TriggerGeometry::capture(Rect::new(10.0, 10.0, 110.0, 50.0), 8.0)
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut()) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn reveal_waits_for_full_cover() {
        let mut layer = OverlayLayer::new();
        let (count, cb) = counter();
        let mut control = RevealMorph::new(cb, ColorToken::TRANSPARENT);
        control.activate(&mut layer, &trigger(), &VIEWPORT, ms(0));

        assert_eq!(control.update(&mut layer, ms(400)), AnimationPhase::Expanding);
        assert_eq!(count.get(), 0, "revealed while still expanding");
        assert_eq!(control.update(&mut layer, ms(599)), AnimationPhase::Expanding);
        assert_eq!(count.get(), 0);

        assert_eq!(control.update(&mut layer, ms(650)), AnimationPhase::Settled);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn double_activation_reveals_once() {
        let mut layer = OverlayLayer::new();
        let (count, cb) = counter();
        let mut control = RevealMorph::new(cb, ColorToken::TRANSPARENT);
        assert!(control.activate(&mut layer, &trigger(), &VIEWPORT, ms(0)).is_started());
        control.update(&mut layer, ms(16));
        assert_eq!(
            control.activate(&mut layer, &trigger(), &VIEWPORT, ms(50)),
            Activation::Ignored
        );
        assert_eq!(layer.live_count(), 1);
        for t in (66..=1_300).step_by(16) {
            control.update(&mut layer, ms(t));
        }
        assert_eq!(count.get(), 1);
        assert_eq!(control.phase(), AnimationPhase::Idle);
        assert_eq!(layer.stats().created, 1);
        assert_eq!(layer.live_count(), 0);
    }

    #[test]
    fn hold_then_fade_then_idle() {
        let mut layer = OverlayLayer::new();
        let (_count, cb) = counter();
        let mut control = RevealMorph::new(cb, ColorToken::TRANSPARENT);
        let Activation::Started(id) = control.activate(&mut layer, &trigger(), &VIEWPORT, ms(0))
        else {
            panic!("activation must start");
        };
        control.update(&mut layer, ms(600));
        assert_eq!(control.update(&mut layer, ms(799)), AnimationPhase::Settled);
        assert_eq!(layer.get(id).map(|n| n.opacity), Some(1.0), "opaque during hold");
        assert_eq!(control.update(&mut layer, ms(800)), AnimationPhase::FadingOut);
        assert_eq!(control.update(&mut layer, ms(1_199)), AnimationPhase::FadingOut);
        assert_eq!(control.update(&mut layer, ms(1_200)), AnimationPhase::Idle);
        assert!(!layer.is_alive(id));
    }

    #[test]
    fn phases_run_in_order() {
        let mut log = Vec::new();
        let mut layer = OverlayLayer::new();
        let mut control = RevealMorph::new(|| {}, ColorToken::TRANSPARENT);
        control.activate(&mut layer, &trigger(), &VIEWPORT, ms(0));
        for t in (0..=1_300).step_by(10) {
            let phase = control.update(&mut layer, ms(t));
            if log.last() != Some(&phase) {
                log.push(phase);
            }
        }
        assert_eq!(
            log,
            [
                AnimationPhase::Expanding,
                AnimationPhase::Settled,
                AnimationPhase::FadingOut,
                AnimationPhase::Idle
            ]
        );
    }

    #[test]
    fn late_frame_reveals_once_and_finishes() {
        let mut layer = OverlayLayer::new();
        let (count, cb) = counter();
        let mut control = RevealMorph::new(cb, ColorToken::TRANSPARENT);
        control.activate(&mut layer, &trigger(), &VIEWPORT, ms(0));
        assert_eq!(control.update(&mut layer, ms(10_000)), AnimationPhase::Idle);
        assert_eq!(count.get(), 1);
        assert_eq!(layer.live_count(), 0);
    }

    #[test]
    fn second_run_reveals_again() {
        let mut layer = OverlayLayer::new();
        let (count, cb) = counter();
        let mut control = RevealMorph::new(cb, ColorToken::TRANSPARENT);
        control.activate(&mut layer, &trigger(), &VIEWPORT, ms(0));
        control.update(&mut layer, ms(1_200));
        assert!(control.activate(&mut layer, &trigger(), &VIEWPORT, ms(1_300)).is_started());
        control.update(&mut layer, ms(2_500));
        assert_eq!(count.get(), 2);
        assert_eq!(control.runs(), 2);
    }

    #[test]
    fn custom_hold_is_respected() {
        let mut layer = OverlayLayer::new();
        let timing = MorphTiming::default().with_reveal_hold(ms(50));
        let mut control =
            RevealMorph::with_timing(|| {}, ColorToken::TRANSPARENT, timing).expect("valid timing");
        control.activate(&mut layer, &trigger(), &VIEWPORT, ms(0));
        control.update(&mut layer, ms(600));
        assert_eq!(control.update(&mut layer, ms(650)), AnimationPhase::FadingOut);
    }

    #[test]
    fn clock_near_limit_does_not_overflow() {
        let mut layer = OverlayLayer::new();
        let (count, cb) = counter();
        let mut control = RevealMorph::new(cb, ColorToken::TRANSPARENT);
        control.activate(&mut layer, &trigger(), &VIEWPORT, Duration::MAX - ms(100));
        assert_eq!(control.update(&mut layer, Duration::MAX), AnimationPhase::Idle);
        assert_eq!(count.get(), 1);
        assert_eq!(layer.live_count(), 0);
    }

    #[test]
    fn unmount_before_cover_skips_reveal() {
        let mut layer = OverlayLayer::new();
        let (count, cb) = counter();
        let mut control = RevealMorph::new(cb, ColorToken::TRANSPARENT);
        control.activate(&mut layer, &trigger(), &VIEWPORT, ms(0));
        control.unmount(&mut layer, ms(300));
        control.update(&mut layer, ms(700));
        assert_eq!(count.get(), 0);
        assert!(!control.is_running());
        assert_eq!(layer.live_count(), 0);
    }
}
