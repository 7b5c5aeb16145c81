// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Route crossfade on its own.
//!
//! Navigates three times, the last one before the previous crossfade has finished.
//!
//! Run:
//! - `cargo run -p understory_demos --example route_crossfade`

use std::time::Duration;

use understory_motion::{Easing, ROUTE_CROSSFADE};
use understory_morph::route::RouteTransition;

fn main() {
    let mut routes = RouteTransition::new(ROUTE_CROSSFADE).with_easing(Easing::CubicOut);
    let plan = [(0, "/"), (1_000, "/work"), (1_100, "/contact")];

    let mut plan = plan.into_iter().peekable();
    for ms in (0..=1_500_u64).step_by(50) {
        let now = Duration::from_millis(ms);
        while let Some((_, route)) = plan.next_if(|(at, _)| *at <= ms) {
            println!("{ms:>5}ms  navigate {route}: {:?}", routes.navigate(route, now));
        }
        let finished = routes.update(now);
        if !finished.is_empty() {
            println!("{ms:>5}ms  finished: {finished:?}");
        }
        let mounted: Vec<String> = routes
            .mounted(now)
            .into_iter()
            .map(|(route, opacity)| format!("{route}@{opacity:.2}"))
            .collect();
        println!("{ms:>5}ms  mounted: {}", mounted.join(", "));
    }

    assert_eq!(routes.current(), Some(&"/contact"));
    assert!(!routes.is_transitioning());
}
