// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_motion --heading-base-level=0

//! Understory Motion: the timing contract shared by morph transitions.
//!
//! - [`Easing`]: cubic curves mapping linear progress to eased progress.
//! - [`Tween`]: an eased span of the host clock, sampled with `now` rather than ticked.
//! - [`MorphTiming`]: the durations and curves of one morph run, with named defaults
//!   ([`EXPAND_DURATION`], [`FADE_DURATION`], [`NAVIGATE_OFFSET`], [`REVEAL_HOLD`]).
//!
//! ## Clock
//!
//! Time is a [`Duration`](core::time::Duration) since an arbitrary epoch chosen by the host
//! (for example the first animation frame). The host passes its current value in; nothing
//! here reads a system clock.
//!
//! # Example
//!
//! ```rust
//! use core::time::Duration;
//! use understory_motion::{Easing, Tween, EXPAND_DURATION};
//!
//! let expand = Tween::new(Duration::ZERO, EXPAND_DURATION, Easing::CubicInOut);
//! assert!((expand.progress(Duration::from_millis(300)) - 0.5).abs() < 1e-9);
//! assert!(expand.is_finished(Duration::from_millis(600)));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod easing;
pub mod timing;
pub mod tween;

pub use easing::Easing;
pub use timing::{
    EXPAND_DURATION, FADE_DURATION, MorphTiming, NAVIGATE_OFFSET, REVEAL_HOLD, ROUTE_CROSSFADE,
    TimingError,
};
pub use tween::Tween;
