// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests over random activation and frame schedules.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Rect, Size};
use proptest::prelude::*;
use understory_morph::{Activation, AnimationPhase, NavigateMorph, NavigationError, RevealMorph};
use understory_overlay::{ColorToken, OverlayLayer, TriggerGeometry};

const VIEWPORT: Size = Size::new(1280.0, 800.0);

fn trigger() -> TriggerGeometry {
    TriggerGeometry::capture(Rect::new(10.0, 10.0, 110.0, 50.0), 8.0)
}

/// Per-frame input: clock step, and whether the user clicks on that frame.
fn schedule() -> impl Strategy<Value = Vec<(u64, bool)>> {
    prop::collection::vec((1_u64..120, prop::bool::weighted(0.1)), 1..200)
}

proptest! {
    #[test]
    fn reveal_control_owns_at_most_one_overlay(frames in schedule()) {
        let mut layer = OverlayLayer::new();
        let reveals = Rc::new(Cell::new(0_u64));
        let counter = Rc::clone(&reveals);
        let mut control =
            RevealMorph::new(move || counter.set(counter.get() + 1), ColorToken::TRANSPARENT);

        let mut now = Duration::ZERO;
        let mut started = 0_u64;
        for (step, click) in frames {
            now += Duration::from_millis(step);
            if click {
                let was_idle = control.phase() == AnimationPhase::Idle;
                let activation = control.activate(&mut layer, &trigger(), &VIEWPORT, now);
                prop_assert_eq!(activation.is_started(), was_idle);
                if activation.is_started() {
                    started += 1;
                }
            }
            control.update(&mut layer, now);
            prop_assert!(layer.live_count() <= 1);
            prop_assert_eq!(layer.stats().created, started);
            prop_assert!(reveals.get() <= started);
        }

        // Drain: one frame far in the future completes any run in flight.
        now += Duration::from_secs(10);
        prop_assert_eq!(control.update(&mut layer, now), AnimationPhase::Idle);
        prop_assert_eq!(layer.live_count(), 0);
        prop_assert_eq!(reveals.get(), started);
        prop_assert_eq!(control.runs(), started);
    }

    #[test]
    fn navigation_fires_once_per_run_before_cover(frames in schedule()) {
        let mut layer = OverlayLayer::new();
        let mut control = NavigateMorph::new("/contact", ColorToken::TRANSPARENT);
        let mut calls: Vec<Duration> = Vec::new();
        let mut run_starts: Vec<Duration> = Vec::new();

        let mut now = Duration::ZERO;
        for (step, click) in frames {
            now += Duration::from_millis(step);
            if click {
                let activation = control.activate(&mut layer, &trigger(), &VIEWPORT, now);
                if let Activation::Started(_) = activation {
                    run_starts.push(now);
                }
            }
            let at = now;
            let mut nav = |_: &str| -> Result<(), NavigationError> {
                calls.push(at);
                Ok(())
            };
            control.update(&mut layer, &mut nav, now);
            prop_assert!(layer.live_count() <= 1);
        }
        let at = now + Duration::from_secs(10);
        let mut nav = |_: &str| -> Result<(), NavigationError> {
            calls.push(at);
            Ok(())
        };
        control.update(&mut layer, &mut nav, at);

        prop_assert_eq!(calls.len(), run_starts.len());
        for (start, call) in run_starts.iter().zip(&calls) {
            prop_assert!(*call >= *start + Duration::from_millis(300));
        }
        prop_assert_eq!(layer.live_count(), 0);
    }
}

#[test]
fn dense_frames_navigate_strictly_before_cover() {
    let mut layer = OverlayLayer::new();
    let mut control = NavigateMorph::new("/contact", ColorToken::TRANSPARENT);
    control.activate(&mut layer, &trigger(), &VIEWPORT, Duration::ZERO);

    let mut navigated_at = None;
    let mut covered_at = None;
    for ms in 1..=1_000_u64 {
        let now = Duration::from_millis(ms);
        let mut nav = |_: &str| -> Result<(), NavigationError> {
            navigated_at.get_or_insert(now);
            Ok(())
        };
        let phase = control.update(&mut layer, &mut nav, now);
        if phase != AnimationPhase::Expanding && covered_at.is_none() {
            covered_at = Some(now);
        }
    }
    assert_eq!(navigated_at, Some(Duration::from_millis(300)));
    assert_eq!(covered_at, Some(Duration::from_millis(600)));
    assert_eq!(control.phase(), AnimationPhase::Idle);
}

#[test]
fn independent_controls_do_not_interfere() {
    let mut layer = OverlayLayer::new();
    let revealed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&revealed);
    let mut nav_control = NavigateMorph::new("/work", ColorToken::from_rgb8(0xff, 0, 0));
    let mut reveal_control =
        RevealMorph::new(move || flag.set(true), ColorToken::from_rgb8(0, 0, 0xff));
    let mut nav = |_: &str| -> Result<(), NavigationError> { Ok(()) };

    assert!(nav_control
        .activate(&mut layer, &trigger(), &VIEWPORT, Duration::ZERO)
        .is_started());
    assert!(reveal_control
        .activate(&mut layer, &trigger(), &VIEWPORT, Duration::from_millis(100))
        .is_started());
    assert_eq!(layer.live_count(), 2);

    let t = Duration::from_millis(1_000);
    assert_eq!(nav_control.update(&mut layer, &mut nav, t), AnimationPhase::Idle);
    assert_eq!(reveal_control.update(&mut layer, t), AnimationPhase::FadingOut);
    assert!(revealed.get());
    assert_eq!(layer.live_count(), 1);

    let t = Duration::from_millis(1_300);
    assert_eq!(reveal_control.update(&mut layer, t), AnimationPhase::Idle);
    assert_eq!(layer.live_count(), 0);
}
