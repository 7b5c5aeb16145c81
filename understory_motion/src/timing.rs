// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared timing contract for morph transitions.

use core::time::Duration;

use crate::easing::Easing;

/// Length of the expansion from the trigger rectangle to the full viewport.
pub const EXPAND_DURATION: Duration = Duration::from_millis(600);

/// Length of the closing opacity fade.
pub const FADE_DURATION: Duration = Duration::from_millis(400);

/// Offset into the expansion at which a navigation is issued.
///
/// Half of [`EXPAND_DURATION`]. Tuned by eye; retune together with the expansion.
pub const NAVIGATE_OFFSET: Duration = Duration::from_millis(300);

/// Hold between an in-page reveal and the start of the fade.
pub const REVEAL_HOLD: Duration = Duration::from_millis(200);

/// Length of the route-level crossfade.
pub const ROUTE_CROSSFADE: Duration = Duration::from_millis(250);

/// Rejected timing configurations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TimingError {
    /// Navigation would not fire strictly before the expansion completes.
    #[error("navigate offset {offset:?} must be shorter than the expansion ({expand:?})")]
    NavigateOffsetNotBeforeExpandEnd {
        /// Configured navigate offset.
        offset: Duration,
        /// Configured expansion duration.
        expand: Duration,
    },
    /// The fade has no length, so the overlay would vanish in one frame.
    #[error("fade duration must be non-zero")]
    FadeOutOfRange,
}

/// Durations and curves used by every phase of a morph run.
///
/// Passed explicitly to each controller. Changes apply from the next run on.
///
/// ```
/// use core::time::Duration;
/// use understory_motion::{Easing, MorphTiming};
///
/// let timing = MorphTiming::default()
///     .with_fade(Duration::from_millis(300), Easing::CubicOut)
///     .with_reveal_hold(Duration::from_millis(150));
/// assert!(timing.validate().is_ok());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MorphTiming {
    /// Length of the expansion.
    pub expand_duration: Duration,
    /// Curve of the expansion.
    pub expand_easing: Easing,
    /// Length of the fade.
    pub fade_duration: Duration,
    /// Curve of the fade.
    pub fade_easing: Easing,
    /// Offset into the expansion at which navigation is issued.
    pub navigate_offset: Duration,
    /// Hold after an in-page reveal before fading.
    pub reveal_hold: Duration,
}

impl Default for MorphTiming {
    fn default() -> Self {
        Self {
            expand_duration: EXPAND_DURATION,
            expand_easing: Easing::CubicInOut,
            fade_duration: FADE_DURATION,
            fade_easing: Easing::CubicOut,
            navigate_offset: NAVIGATE_OFFSET,
            reveal_hold: REVEAL_HOLD,
        }
    }
}

impl MorphTiming {
    /// Replace the expansion duration and curve.
    #[must_use]
    pub fn with_expand(mut self, duration: Duration, easing: Easing) -> Self {
        self.expand_duration = duration;
        self.expand_easing = easing;
        self
    }

    /// Replace the fade duration and curve.
    #[must_use]
    pub fn with_fade(mut self, duration: Duration, easing: Easing) -> Self {
        self.fade_duration = duration;
        self.fade_easing = easing;
        self
    }

    /// Replace the navigate offset.
    #[must_use]
    pub fn with_navigate_offset(mut self, offset: Duration) -> Self {
        self.navigate_offset = offset;
        self
    }

    /// Replace the reveal hold.
    #[must_use]
    pub fn with_reveal_hold(mut self, hold: Duration) -> Self {
        self.reveal_hold = hold;
        self
    }

    /// Check the relationships the controllers rely on.
    pub fn validate(&self) -> Result<(), TimingError> {
        if self.navigate_offset >= self.expand_duration {
            return Err(TimingError::NavigateOffsetNotBeforeExpandEnd {
                offset: self.navigate_offset,
                expand: self.expand_duration,
            });
        }
        if self.fade_duration.is_zero() {
            return Err(TimingError::FadeOutOfRange);
        }
        Ok(())
    }
}
