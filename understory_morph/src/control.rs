// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State shared by both controllers: the phase machine and the overlay session.

use core::time::Duration;

use understory_motion::{MorphTiming, TimingError};
use understory_overlay::{AnimationHandle, ColorToken, OverlayId, OverlayLayer, OverlaySession};

use crate::host::{TriggerElement, Viewport};
use crate::phase::{AnimationPhase, PhaseMachine};

/// Outcome of an activation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    /// A run started with a fresh overlay.
    Started(OverlayId),
    /// A run was already in flight; the activation was dropped, not queued.
    Ignored,
}

impl Activation {
    /// Returns true if a run started.
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started(_))
    }
}

/// One control's run state. Owns at most one overlay session.
#[derive(Debug)]
pub(crate) struct MorphCore {
    pub(crate) machine: PhaseMachine,
    pub(crate) accent: ColorToken,
    pub(crate) timing: MorphTiming,
    session: Option<OverlaySession>,
    started_at: Duration,
    expand: Option<AnimationHandle>,
    fade: Option<AnimationHandle>,
}

impl MorphCore {
    pub(crate) fn new(accent: ColorToken) -> Self {
        Self {
            machine: PhaseMachine::new(),
            accent,
            timing: MorphTiming::default(),
            session: None,
            started_at: Duration::ZERO,
            expand: None,
            fade: None,
        }
    }

    pub(crate) fn with_timing(
        accent: ColorToken,
        timing: MorphTiming,
    ) -> Result<Self, TimingError> {
        timing.validate()?;
        Ok(Self {
            timing,
            ..Self::new(accent)
        })
    }

    pub(crate) fn phase(&self) -> AnimationPhase {
        self.machine.phase()
    }

    /// Clock value at which the current run was activated.
    pub(crate) fn started_at(&self) -> Duration {
        self.started_at
    }

    /// Capture the trigger, insert the overlay, and start expanding.
    pub(crate) fn activate(
        &mut self,
        layer: &mut OverlayLayer,
        trigger: &impl TriggerElement,
        viewport: &impl Viewport,
        now: Duration,
    ) -> Activation {
        if !self.machine.is_idle() {
            tracing::debug!(phase = ?self.machine.phase(), "activation ignored: run in flight");
            return Activation::Ignored;
        }
        let geometry = trigger.capture();
        let mut session = OverlaySession::begin(layer, geometry, self.accent);
        let Some(expand) = session.expand(viewport.size(), now, &self.timing) else {
            session.dispose(layer);
            return Activation::Ignored;
        };
        session.advance(layer, now);
        let id = session.id();
        self.machine.advance(AnimationPhase::Expanding, now);
        self.started_at = now;
        self.expand = Some(expand);
        self.fade = None;
        self.session = Some(session);
        tracing::info!(?id, run = self.machine.runs(), "morph run started");
        Activation::Started(id)
    }

    /// Deadline of the expansion, if it has completed by `now`.
    pub(crate) fn expansion_done(&self, now: Duration) -> Option<Duration> {
        self.expand
            .filter(|h| h.is_complete(now))
            .map(|h| h.deadline())
    }

    /// Enter `FadingOut` and schedule the fade to begin at `at`.
    pub(crate) fn begin_fade(&mut self, at: Duration) {
        self.machine.advance(AnimationPhase::FadingOut, at);
        self.fade = self
            .session
            .as_mut()
            .and_then(|s| s.fade_out(at, &self.timing));
    }

    /// In `FadingOut`, dispose the overlay and return to `Idle` once the fade is done.
    ///
    /// Returns true if the run finished.
    pub(crate) fn finish_if_faded(&mut self, layer: &mut OverlayLayer, now: Duration) -> bool {
        // A missing handle means the session went away under us; finish immediately.
        let done_at = match self.fade {
            Some(h) if !h.is_complete(now) => return false,
            Some(h) => h.deadline(),
            None => now,
        };
        self.release(layer);
        self.machine.advance(AnimationPhase::Idle, done_at);
        tracing::debug!(run = self.machine.runs(), ?done_at, "morph run finished");
        true
    }

    /// Write the current frame into the layer.
    pub(crate) fn paint(&self, layer: &mut OverlayLayer, now: Duration) {
        if let Some(session) = &self.session {
            session.advance(layer, now);
        }
    }

    /// Dispose any live overlay and return to `Idle`.
    pub(crate) fn unmount(&mut self, layer: &mut OverlayLayer, now: Duration) {
        self.release(layer);
        self.machine.reset(now);
    }

    fn release(&mut self, layer: &mut OverlayLayer) {
        if let Some(mut session) = self.session.take() {
            session.dispose(layer);
        }
        self.expand = None;
        self.fade = None;
    }
}
