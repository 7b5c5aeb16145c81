// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_morph --heading-base-level=0

//! Understory Morph: choreography for "morph" transitions.
//!
//! ## Overview
//!
//! A morph transition turns a click on a control into a colored overlay that grows from
//! the control's box to cover the whole viewport, performs a hand-off while the screen is
//! covered, and then fades away. Two controllers share that shape and differ only in the
//! hand-off:
//!
//! - [`NavigateMorph`] asks the host [`Navigator`] to load a destination halfway through
//!   the expansion, so the new page loads under the second half of the growth.
//! - [`RevealMorph`] waits for full cover, calls a reveal callback, holds briefly so the
//!   revealed content paints, then fades.
//!
//! [`RouteTransition`](route::RouteTransition) is the separate route-level crossfade that a
//! navigation ends up triggering.
//!
//! ## Phases
//!
//! Each control owns a [`PhaseMachine`] that moves strictly forward through
//! [`AnimationPhase`] values and always returns to `Idle` before a new run. Activating a
//! control that is not `Idle` is dropped, not queued ([`Activation::Ignored`]), so a
//! control never owns more than one overlay. Separate controls are fully independent.
//!
//! ## Driving a controller
//!
//! The crate never reads a clock or spawns timers. The host:
//!
//! 1) calls `activate` with the [`TriggerElement`], the [`Viewport`], and the current time;
//! 2) calls `update` on every animation frame with the current time;
//! 3) paints the shared [`OverlayLayer`](understory_overlay::OverlayLayer).
//!
//! All deadlines are scheduled on the host clock, so a late frame catches up through every
//! missed step in order. A host that stops delivering frames (a throttled background tab)
//! leaves the run paused where it was; the next frame completes it.
//!
//! ## Failures
//!
//! A [`NavigationError`] is logged and otherwise ignored: the overlay fades on its own
//! schedule whatever happens to the navigation. Invalid timing is reported as a
//! [`TimingError`](understory_motion::TimingError) when building a controller.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod control;
mod host;
mod navigate;
mod phase;
mod reveal;
pub mod route;
mod signal;

pub use control::Activation;
pub use host::{NavigationError, Navigator, TriggerElement, Viewport};
pub use navigate::NavigateMorph;
pub use phase::{AnimationPhase, PhaseMachine};
pub use reveal::RevealMorph;
pub use signal::RevealSignal;
