// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clock-driven tweens.
//!
//! A [`Tween`] is a pure function of the host clock: it stores when it started,
//! how long it runs, and which [`Easing`] shapes it. It never needs ticking, so
//! a late or skipped frame cannot drift it.

use core::time::Duration;

use crate::easing::{Easing, clamp_unit};

/// A single eased interpolation over a fixed span of the host clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tween {
    /// Clock value at which the tween starts.
    pub start: Duration,
    /// Length of the tween.
    pub duration: Duration,
    /// Curve applied to linear progress.
    pub easing: Easing,
}

impl Tween {
    /// Create a tween starting at `start`.
    pub const fn new(start: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            duration,
            easing,
        }
    }

    /// Clock value at which the tween is finished.
    pub fn end(&self) -> Duration {
        self.start.saturating_add(self.duration)
    }

    /// Returns true once `now` has reached [`Tween::end`].
    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.end()
    }

    /// Linear progress in `[0, 1]`.
    ///
    /// Before `start` this is `0.0`. From [`Tween::end`] on it is `1.0`, including for a
    /// zero-length tween and for an end clamped to `Duration::MAX`.
    pub fn raw_progress(&self, now: Duration) -> f64 {
        if now < self.start {
            return 0.0;
        }
        if self.is_finished(now) {
            return 1.0;
        }
        let elapsed = now - self.start;
        clamp_unit(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now: Duration) -> f64 {
        self.easing.apply(self.raw_progress(now))
    }

    /// Interpolate between `from` and `to` at `now`.
    pub fn sample(&self, from: f64, to: f64, now: Duration) -> f64 {
        let t = self.progress(now);
        from + (to - from) * t
    }
}
