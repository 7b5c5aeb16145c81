// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams to the host: navigation, the trigger element, and the viewport.

use alloc::string::String;

use kurbo::{Rect, Size};
use understory_overlay::TriggerGeometry;

/// Why a navigation request did not go through.
///
/// The controllers log these and carry on; the overlay finishes its fade either way.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// The router refused the destination.
    #[error("navigation to `{0}` was rejected")]
    Rejected(String),
    /// A newer navigation replaced this one before it completed.
    #[error("navigation was superseded by a newer request")]
    Superseded,
}

/// The host's navigation subsystem.
///
/// Calls are fire-and-forget: the result only reports whether the request was accepted.
pub trait Navigator {
    /// Begin loading `destination`.
    fn navigate_to(&mut self, destination: &str) -> Result<(), NavigationError>;
}

impl<F> Navigator for F
where
    F: FnMut(&str) -> Result<(), NavigationError>,
{
    fn navigate_to(&mut self, destination: &str) -> Result<(), NavigationError> {
        self(destination)
    }
}

/// The control that was activated.
pub trait TriggerElement {
    /// On-screen bounding box in viewport coordinates.
    fn bounding_rect(&self) -> Rect;
    /// Resolved corner radius.
    fn corner_radius(&self) -> f64;

    /// Snapshot the element for one run.
    fn capture(&self) -> TriggerGeometry {
        TriggerGeometry::capture(self.bounding_rect(), self.corner_radius())
    }
}

impl TriggerElement for TriggerGeometry {
    fn bounding_rect(&self) -> Rect {
        self.rect()
    }

    fn corner_radius(&self) -> f64 {
        self.corner_radius
    }
}

/// The visible area the overlay grows to fill.
pub trait Viewport {
    /// Current size. Read when the expansion starts.
    fn size(&self) -> Size;
}

impl Viewport for Size {
    fn size(&self) -> Size {
        *self
    }
}
