// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Morph controller that navigates.
//!
//! ## Timeline
//!
//! With the default [`MorphTiming`], for an activation at `T`:
//!
//! - `T`: overlay inserted at the trigger's box; `Expanding`.
//! - `T + 300ms`: [`Navigator::navigate_to`] is called while the overlay is still growing,
//!   so the destination loads under the second half of the expansion.
//! - `T + 600ms`: viewport fully covered; `Settled`, then `FadingOut` at once.
//! - `T + 1000ms`: overlay disposed; `Idle`.
//!
//! The fade runs on its own schedule whatever the navigation outcome.

use alloc::string::String;
use core::time::Duration;

use understory_motion::{MorphTiming, TimingError};
use understory_overlay::{ColorToken, OverlayLayer};

use crate::control::{Activation, MorphCore};
use crate::host::{Navigator, TriggerElement, Viewport};
use crate::phase::AnimationPhase;

/// A control that expands into the viewport and navigates to `destination`.
///
/// ```
/// use core::time::Duration;
/// use kurbo::{Rect, Size};
/// use understory_morph::{AnimationPhase, NavigateMorph, NavigationError};
/// use understory_overlay::{ColorToken, OverlayLayer, TriggerGeometry};
///
/// let mut layer = OverlayLayer::new();
/// let mut visited = Vec::new();
/// let mut navigator = |to: &str| -> Result<(), NavigationError> {
///     visited.push(to.to_owned());
///     Ok(())
/// };
///
/// let mut control = NavigateMorph::new("/contact", ColorToken::from_rgb8(0xe0, 0x40, 0x40));
/// let trigger = TriggerGeometry::capture(Rect::new(10.0, 10.0, 110.0, 50.0), 8.0);
/// control.activate(&mut layer, &trigger, &Size::new(1280.0, 800.0), Duration::ZERO);
///
/// for frame in 1..=70 {
///     control.update(&mut layer, &mut navigator, Duration::from_millis(frame * 16));
/// }
/// assert_eq!(control.phase(), AnimationPhase::Idle);
/// assert_eq!(layer.live_count(), 0);
/// assert_eq!(visited, ["/contact"]);
/// ```
#[derive(Debug)]
pub struct NavigateMorph {
    core: MorphCore,
    destination: String,
    navigated: bool,
}

impl NavigateMorph {
    /// Create a control with the default timing.
    pub fn new(destination: impl Into<String>, accent: ColorToken) -> Self {
        Self {
            core: MorphCore::new(accent),
            destination: destination.into(),
            navigated: false,
        }
    }

    /// Create a control with custom timing.
    pub fn with_timing(
        destination: impl Into<String>,
        accent: ColorToken,
        timing: MorphTiming,
    ) -> Result<Self, TimingError> {
        Ok(Self {
            core: MorphCore::with_timing(accent, timing)?,
            destination: destination.into(),
            navigated: false,
        })
    }

    /// Where activation navigates to.
    pub fn destination(&self) -> &str {
        &self.destination
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
        let activation = self.core.activate(layer, trigger, viewport, now);
        if activation.is_started() {
            self.navigated = false;
        }
        activation
    }

    /// Advance to `now`: issue the navigation, settle, fade, and clean up as deadlines pass.
    ///
    /// Call once per host frame. A late call catches up through every elapsed deadline
    /// in order, so navigation is always issued before the run settles.
    ///
    /// The hand-off already happened mid-expansion, so this variant moves from
    /// `Expanding` straight to `Settled` and [`AnimationPhase::HandoffPending`] is never
    /// returned.
    pub fn update(
        &mut self,
        layer: &mut OverlayLayer,
        navigator: &mut impl Navigator,
        now: Duration,
    ) -> AnimationPhase {
        loop {
            match self.core.phase() {
                AnimationPhase::Idle => break,
                AnimationPhase::Expanding => {
                    let handoff_at = self
                        .core
                        .started_at()
                        .saturating_add(self.core.timing.navigate_offset);
                    if !self.navigated && now >= handoff_at {
                        self.navigate(navigator);
                    }
                    let Some(covered_at) = self.core.expansion_done(now) else {
                        break;
                    };
                    // Handed off mid-expansion, so there is nothing left to do on cover.
                    self.core.machine.advance(AnimationPhase::Settled, covered_at);
                    self.core.begin_fade(covered_at);
                }
                AnimationPhase::HandoffPending | AnimationPhase::Settled => {
                    let at = self.core.machine.entered_at();
                    self.core.begin_fade(at);
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
    pub fn unmount(&mut self, layer: &mut OverlayLayer, now: Duration) {
        self.core.unmount(layer, now);
        self.navigated = false;
    }

    fn navigate(&mut self, navigator: &mut impl Navigator) {
        self.navigated = true;
        match navigator.navigate_to(&self.destination) {
            Ok(()) => tracing::info!(destination = %self.destination, "navigation issued"),
            Err(err) => tracing::warn!(
                destination = %self.destination,
                %err,
                "navigation failed; overlay continues on its own timer"
            ),
        }
    }
}
