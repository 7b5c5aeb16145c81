// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation morph on a simulated 60 Hz clock.
//!
//! A "Contact" button expands into the viewport, navigation is handed off halfway
//! through, and the overlay fades once the viewport is covered. The route crossfade
//! runs underneath as an independent transition.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example morph_navigate`

use std::time::Duration;

use kurbo::{Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_morph::route::{RouteEvent, RouteTransition};
use understory_morph::{Activation, AnimationPhase, NavigateMorph, NavigationError};
use understory_overlay::{ColorToken, OverlayLayer, TriggerGeometry};

const FRAME: Duration = Duration::from_micros(16_667);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut layer = OverlayLayer::new();
    let mut routes = RouteTransition::default();
    let viewport = Size::new(1280.0, 800.0);
    let button = TriggerGeometry::capture(Rect::new(10.0, 10.0, 110.0, 50.0), 8.0);
    let mut control = NavigateMorph::new("/contact", ColorToken::from_rgb8(0xf2, 0x5c, 0x54));

    let mut now = Duration::ZERO;
    routes.navigate(String::from("/"), now);

    let Activation::Started(id) = control.activate(&mut layer, &button, &viewport, now) else {
        unreachable!("a fresh control is idle");
    };
    println!("activated at {now:?}, overlay {id:?}");

    let mut last = control.phase();
    while control.is_running() {
        now += FRAME;
        let mut pending = None;
        let mut navigator = |to: &str| -> Result<(), NavigationError> {
            pending = Some(to.to_owned());
            Ok(())
        };
        let phase = control.update(&mut layer, &mut navigator, now);
        if let Some(to) = pending {
            println!("{now:>10.3?}  navigate_to({to})");
            for event in routes.navigate(to, now) {
                println!("{now:>10.3?}  route {event:?}");
            }
        }
        for event in routes.update(now) {
            if let RouteEvent::Unmount(key) = event {
                println!("{now:>10.3?}  route unmounted {key}");
            }
        }
        if phase != last {
            println!("{now:>10.3?}  {last:?} -> {phase:?}");
            last = phase;
        }
        if let Some(node) = layer.get(id) {
            let r = node.shape.rect();
            println!(
                "{now:>10.3?}  overlay {:.0}x{:.0} at ({:.0}, {:.0}) opacity {:.2}",
                r.width(),
                r.height(),
                r.x0,
                r.y0,
                node.opacity
            );
        }
        let _ = layer.commit();
    }

    assert_eq!(control.phase(), AnimationPhase::Idle);
    assert_eq!(layer.live_count(), 0);
    println!("done at {now:?}; {:?}", layer.stats());
}
