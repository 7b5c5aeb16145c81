// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-control phase machine.
//!
//! ## Shape
//!
//! `Idle → Expanding → HandoffPending → Settled → FadingOut → Idle`
//!
//! Transitions only move forward within a run. A variant may pass over a phase it
//! has no use for (the navigation controller hands off mid-expansion and goes
//! straight from `Expanding` to `Settled`), but no phase is entered twice per run,
//! and a new run may only start from `Idle`.

use core::time::Duration;

/// Phase of one morph-enabled control.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    /// No run in flight; activations are accepted.
    #[default]
    Idle,
    /// The overlay is growing to cover the viewport.
    Expanding,
    /// Expansion is complete and the hand-off is being performed.
    HandoffPending,
    /// The viewport is fully covered and the hand-off is done.
    Settled,
    /// The overlay is fading out.
    FadingOut,
}

impl AnimationPhase {
    const fn rank(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Expanding => 1,
            Self::HandoffPending => 2,
            Self::Settled => 3,
            Self::FadingOut => 4,
        }
    }

    /// Returns true if a run may move from `self` to `next`.
    pub const fn can_advance_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Idle, Self::Expanding) | (Self::FadingOut, Self::Idle) => true,
            (Self::Idle, _) | (_, Self::Idle) => false,
            _ => next.rank() > self.rank(),
        }
    }
}

/// Tracks the phase of one control, when it was entered, and how many runs started.
#[derive(Clone, Debug, Default)]
pub struct PhaseMachine {
    phase: AnimationPhase,
    entered_at: Duration,
    runs: u64,
}

impl PhaseMachine {
    /// A machine in [`AnimationPhase::Idle`].
    pub const fn new() -> Self {
        Self {
            phase: AnimationPhase::Idle,
            entered_at: Duration::ZERO,
            runs: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Clock value at which the current phase was entered.
    pub fn entered_at(&self) -> Duration {
        self.entered_at
    }

    /// Number of runs started so far.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Returns true in [`AnimationPhase::Idle`].
    pub fn is_idle(&self) -> bool {
        self.phase == AnimationPhase::Idle
    }

    /// Move to `next` at clock value `at`.
    ///
    /// Returns false, leaving the machine untouched, if the transition would go
    /// backwards or start a run outside `Idle`.
    pub fn advance(&mut self, next: AnimationPhase, at: Duration) -> bool {
        if !self.phase.can_advance_to(next) {
            tracing::warn!(from = ?self.phase, to = ?next, "rejected phase transition");
            return false;
        }
        if next == AnimationPhase::Expanding {
            self.runs += 1;
        }
        tracing::debug!(from = ?self.phase, to = ?next, ?at, run = self.runs, "phase");
        self.phase = next;
        self.entered_at = at;
        true
    }

    /// Return to `Idle` from any phase. Used when a control is torn down mid-run.
    pub fn reset(&mut self, at: Duration) {
        if self.phase != AnimationPhase::Idle {
            tracing::debug!(from = ?self.phase, ?at, "phase reset");
        }
        self.phase = AnimationPhase::Idle;
        self.entered_at = at;
    }
}
