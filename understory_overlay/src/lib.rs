// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlay --heading-base-level=0

//! Understory Overlay: transient shapes stacked above all other content.
//!
//! An overlay layer is a small arena of shapes that lives beside (not inside) a
//! declarative render tree. Code that needs a short-lived visual, such as a morph
//! transition growing out of a button, inserts a node here, animates it, and removes it.
//! Re-renders of the surrounding UI never see these nodes.
//!
//! ## API overview
//!
//! - [`OverlayLayer`]: slot storage with generational [`OverlayId`] handles, z-order,
//!   coarse [`Damage`] via [`OverlayLayer::commit`], and hit testing.
//! - [`OverlayNode`]: shape, [`ColorToken`], opacity, z-index, and [`OverlayFlags`].
//! - [`TriggerGeometry`]: the frozen box and corner radius an overlay grows from.
//! - [`OverlaySession`]: the lifecycle of one overlay: `begin`, `expand`, `fade_out`,
//!   `dispose`, plus `advance` to write the current frame.
//!
//! Morph overlays sit at [`OVERLAY_Z`] and are not [`OverlayFlags::PICKABLE`], so pointer
//! input that lands on them during a transition falls through to whatever is below.
//!
//! ## Minimal usage
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Rect, Size};
//! use understory_motion::MorphTiming;
//! use understory_overlay::{ColorToken, OverlayLayer, OverlaySession, TriggerGeometry};
//!
//! let mut layer = OverlayLayer::new();
//! let timing = MorphTiming::default();
//! let geometry = TriggerGeometry::capture(Rect::new(10.0, 10.0, 110.0, 50.0), 8.0);
//!
//! let accent = ColorToken::from_rgb8(0, 0x80, 0xff);
//! let mut session = OverlaySession::begin(&mut layer, geometry, accent);
//! let expand = session.expand(Size::new(800.0, 600.0), Duration::ZERO, &timing).unwrap();
//!
//! session.advance(&mut layer, expand.deadline());
//! let node = layer.get(session.id()).unwrap();
//! assert_eq!(node.shape.rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
//!
//! let fade = session.fade_out(expand.deadline(), &timing).unwrap();
//! session.advance(&mut layer, fade.deadline());
//! session.dispose(&mut layer);
//! assert_eq!(layer.live_count(), 0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod damage;
mod layer;
mod session;
mod types;

pub use damage::Damage;
pub use layer::{LayerStats, OverlayLayer, QueryFilter};
pub use session::{AnimationHandle, OverlaySession};
pub use types::{ColorToken, OVERLAY_Z, OverlayFlags, OverlayId, OverlayNode, TriggerGeometry};
