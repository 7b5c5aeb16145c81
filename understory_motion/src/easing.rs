// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves.
//!
//! Every curve maps `0.0 → 0.0` and `1.0 → 1.0`, is monotonic on `[0, 1]`,
//! and clamps its input to that range. Inputs are assumed to be finite.

/// An easing curve applied to linear progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// No acceleration.
    Linear,
    /// Cubic ease-in: slow start, accelerates.
    CubicIn,
    /// Cubic ease-out: fast start, decelerates.
    CubicOut,
    /// Symmetric cubic ease-in/ease-out: slow start and slow end.
    #[default]
    CubicInOut,
}

impl Easing {
    /// Apply the curve to linear progress `t`.
    pub fn apply(self, t: f64) -> f64 {
        let t = clamp_unit(t);
        match self {
            Self::Linear => t,
            Self::CubicIn => t * t * t,
            Self::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
        }
    }
}

/// Clamp to `[0, 1]`. NaN maps to `0.0`.
#[inline]
pub(crate) fn clamp_unit(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else if t > 0.0 {
        t
    } else {
        0.0
    }
}
