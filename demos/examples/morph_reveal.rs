// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-page reveal morph with a subscriber standing in for a page header.
//!
//! The header learns about the reveal through a shared signal rather than by checking
//! whether the revealed section exists yet.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example morph_reveal`

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_morph::{Activation, AnimationPhase, RevealMorph, RevealSignal};
use understory_overlay::{ColorToken, OverlayLayer, QueryFilter, TriggerGeometry};

const FRAME: Duration = Duration::from_millis(16);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut layer = OverlayLayer::new();
    let viewport = Size::new(1280.0, 800.0);
    let button = TriggerGeometry::capture(Rect::new(540.0, 600.0, 740.0, 648.0), 24.0);

    let revealed = RevealSignal::new();
    let header_solid = Rc::new(Cell::new(false));
    {
        let header_solid = Rc::clone(&header_solid);
        revealed.subscribe(move || header_solid.set(true));
    }
    let mut control = RevealMorph::new(revealed.trigger(), ColorToken::from_rgb8(0x1d, 0x1d, 0x1f));

    let mut now = Duration::ZERO;
    assert!(control.activate(&mut layer, &button, &viewport, now).is_started());

    // A second click 48ms later is dropped.
    for _ in 0..3 {
        now += FRAME;
        control.update(&mut layer, now);
    }
    let second = control.activate(&mut layer, &button, &viewport, now);
    println!("{now:>8?}  second click: {second:?}");
    assert_eq!(second, Activation::Ignored);

    // The overlay never swallows pointer input.
    let pickable = QueryFilter {
        visible_only: true,
        pickable_only: true,
    };
    assert!(layer.hit_test_point(Point::new(640.0, 620.0), pickable).is_none());

    let mut last = control.phase();
    while control.is_running() {
        now += FRAME;
        let phase = control.update(&mut layer, now);
        if phase != last {
            println!(
                "{now:>8?}  {last:?} -> {phase:?}  (revealed: {}, header solid: {})",
                revealed.is_revealed(),
                header_solid.get()
            );
            last = phase;
        }
    }

    assert_eq!(control.phase(), AnimationPhase::Idle);
    assert_eq!(revealed.notifications(), 1);
    assert!(header_solid.get());
    assert_eq!(layer.live_count(), 0);
}
