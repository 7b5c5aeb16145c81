// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Route-level crossfade: keep the outgoing route mounted while it fades.
//!
//! ## Usage
//!
//! 1) Call [`RouteTransition::navigate`] whenever the active route identity changes and
//!    mount or unmount content according to the returned [`RouteEvent`]s.
//! 2) Call [`RouteTransition::update`] every frame to learn when an outgoing route may be
//!    unmounted.
//! 3) Paint the routes from [`RouteTransition::mounted`] with the opacity it reports.
//!
//! This runs independently of the morph controllers. A navigation issued by
//! [`NavigateMorph`](crate::NavigateMorph) lands here as an ordinary route change; the
//! morph overlay still covers the viewport at that point, which hides the seam.
//!
//! ```
//! use core::time::Duration;
//! use understory_morph::route::{RouteEvent, RouteTransition};
//!
//! let mut routes = RouteTransition::new(Duration::from_millis(250));
//! assert_eq!(routes.navigate("/", Duration::ZERO), vec![RouteEvent::Mount("/")]);
//!
//! let t = Duration::from_millis(1_000);
//! assert_eq!(routes.navigate("/contact", t), vec![RouteEvent::Mount("/contact")]);
//! assert_eq!(routes.mounted(t).len(), 2);
//!
//! let done = t + Duration::from_millis(250);
//! assert_eq!(routes.update(done), vec![RouteEvent::Unmount("/")]);
//! assert_eq!(routes.mounted(done), vec![("/contact", 1.0)]);
//! ```

use alloc::vec::Vec;
use core::time::Duration;

use understory_motion::{Easing, ROUTE_CROSSFADE, Tween};

/// A mount-state change produced by [`RouteTransition`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RouteEvent<K> {
    /// Mount content for this route.
    Mount(K),
    /// Unmount content for this route.
    Unmount(K),
}

/// Crossfade between successive route identities.
///
/// The first route mounts fully opaque. On each later change the previous route fades
/// out while the new one fades in over the same span. If the route changes again before
/// a crossfade ends, the route that was already fading out is unmounted at once.
#[derive(Clone, Debug)]
pub struct RouteTransition<K> {
    duration: Duration,
    easing: Easing,
    current: Option<K>,
    incoming: Option<Tween>,
    outgoing: Option<(K, Tween)>,
}

impl<K> Default for RouteTransition<K> {
    fn default() -> Self {
        Self::new(ROUTE_CROSSFADE)
    }
}

impl<K> RouteTransition<K> {
    /// Create a transition with a linear crossfade of `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            easing: Easing::Linear,
            current: None,
            incoming: None,
            outgoing: None,
        }
    }

    /// Use `easing` for both halves of the crossfade.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// The active route, if any.
    pub fn current(&self) -> Option<&K> {
        self.current.as_ref()
    }

    /// Returns true while an outgoing route is still mounted.
    pub fn is_transitioning(&self) -> bool {
        self.outgoing.is_some()
    }
}

impl<K: Clone + Eq> RouteTransition<K> {
    /// Make `key` the active route at `now`.
    ///
    /// Navigating to the active route is a no-op.
    pub fn navigate(&mut self, key: K, now: Duration) -> Vec<RouteEvent<K>> {
        let mut out = Vec::new();
        if self.current.as_ref() == Some(&key) {
            return out;
        }
        if let Some((stale, _)) = self.outgoing.take() {
            out.push(RouteEvent::Unmount(stale));
        }
        let fade = Tween::new(now, self.duration, self.easing);
        match self.current.take() {
            Some(previous) => {
                self.outgoing = Some((previous, fade));
                self.incoming = Some(fade);
            }
            None => self.incoming = None,
        }
        out.push(RouteEvent::Mount(key.clone()));
        self.current = Some(key);
        out
    }

    /// Finish any crossfade that has run its course by `now`.
    pub fn update(&mut self, now: Duration) -> Vec<RouteEvent<K>> {
        let mut out = Vec::new();
        if self.incoming.is_some_and(|t| t.is_finished(now)) {
            self.incoming = None;
        }
        if self
            .outgoing
            .as_ref()
            .is_some_and(|(_, t)| t.is_finished(now))
        {
            if let Some((key, _)) = self.outgoing.take() {
                out.push(RouteEvent::Unmount(key));
            }
        }
        out
    }

    /// Mounted routes with their opacity at `now`, outgoing first.
    pub fn mounted(&self, now: Duration) -> Vec<(K, f64)> {
        let mut out = Vec::new();
        if let Some((key, t)) = &self.outgoing {
            out.push((key.clone(), t.sample(1.0, 0.0, now)));
        }
        if let Some(key) = &self.current {
            let opacity = self.incoming.map_or(1.0, |t| t.progress(now));
            out.push((key.clone(), opacity));
        }
        out
    }
}
