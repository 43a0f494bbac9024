use crate::*;

use carousel::{Carousel, CarouselOptions, InputKind, Phase, SpringConfig};
use std::collections::HashMap;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn desktop(count: usize) -> Controller {
    Controller::new(CarouselOptions::new(count).with_initial_viewport_width(Some(1200.0))).unwrap()
}

// Ticks at 60fps until the settle finishes. Returns the final timestamp.
fn run_until_idle(c: &mut Controller, mut now_ms: u64) -> u64 {
    for _ in 0..1000 {
        now_ms += 16;
        if c.tick(now_ms).is_none() {
            break;
        }
    }
    assert!(!c.is_animating());
    assert_eq!(c.carousel().phase(), Phase::Idle);
    now_ms
}

#[test]
fn anchor_keeps_item_centered_across_prepend() {
    let mut c1 = Carousel::new(
        CarouselOptions::new_with_key(8, |i| 1000u64 + i as u64)
            .with_initial_viewport_width(Some(1200.0)),
    )
    .unwrap();
    c1.jump_to_index(11);

    let anchor = capture_center_anchor(&c1).unwrap();
    assert_eq!(anchor.key, 1003);
    assert_close(anchor.fraction, 0.0);

    // Prepend 2 items: old items shift by +2 indexes.
    let mut c2 = Carousel::new(
        CarouselOptions::new_with_key(10, |i| {
            if i < 2 {
                2000u64 + i as u64
            } else {
                1000u64 + (i - 2) as u64
            }
        })
        .with_initial_viewport_width(Some(1200.0)),
    )
    .unwrap();

    let mut map = HashMap::<u64, usize>::new();
    for i in 0..10usize {
        map.insert(c2.key_for(i), i);
    }

    assert!(apply_center_anchor(&mut c2, &anchor, |k| map.get(k).copied()));
    assert_eq!(c2.centered_original_index(), Some(5));
    assert_eq!(c2.centered_index(), Some(15));
}

#[test]
fn anchor_for_missing_key_is_not_applied() {
    let mut c = Carousel::new(CarouselOptions::new(8).with_initial_viewport_width(Some(1200.0)))
        .unwrap();
    let anchor = CenterAnchor {
        key: 99u64,
        fraction: 0.0,
    };
    assert!(!apply_center_anchor(&mut c, &anchor, |_| None));
    assert!(!apply_center_anchor(&mut c, &anchor, |_| Some(8)));
    assert_eq!(c.centered_index(), Some(8));
}

#[test]
fn set_items_follows_the_centered_key() {
    let mut c = Controller::new(
        CarouselOptions::new_with_key(8, |i| 1000u64 + i as u64)
            .with_initial_viewport_width(Some(1200.0)),
    )
    .unwrap();
    c.jump_to_index(11);

    let found = c
        .set_items(10, |i| {
            if i < 2 {
                2000u64 + i as u64
            } else {
                1000u64 + (i - 2) as u64
            }
        })
        .unwrap();
    assert!(found);
    assert_eq!(c.carousel().count(), 10);
    assert_eq!(c.carousel().centered_original_index(), Some(5));

    // The centered item disappears: fall back to the clamped original index.
    let found = c.set_items(3, |i| 5000u64 + i as u64).unwrap();
    assert!(!found);
    assert_eq!(c.carousel().centered_original_index(), Some(2));
}

#[test]
fn set_items_with_new_keys_ends_a_running_settle() {
    let mut c = Controller::new(
        CarouselOptions::new_with_key(8, |i| 1000u64 + i as u64)
            .with_initial_viewport_width(Some(1200.0)),
    )
    .unwrap();
    c.snap_to_index(10, InputKind::Pointer, 0).unwrap();
    c.tick(16);
    assert!(c.is_interacting());

    // Same count, none of the old keys survive.
    let found = c.set_items(8, |i| 9000u64 + i as u64).unwrap();
    assert!(!found);
    assert!(!c.is_animating());
    assert!(!c.is_interacting());
    assert_eq!(c.carousel().phase(), Phase::Idle);
    assert_eq!(c.tick(32), None);

    c.snap_to_index(9, InputKind::Pointer, 48).unwrap();
    run_until_idle(&mut c, 48);
    assert_eq!(c.carousel().centered_index(), Some(9));
}

#[test]
fn refused_drag_start_leaves_no_settle_behind() {
    let mut c = desktop(8);
    c.snap_to_index(10, InputKind::Pointer, 0).unwrap();
    c.tick(16);

    c.on_resize(0.0);
    assert!(!c.carousel().is_settling());
    assert!(!c.on_drag_start(InputKind::Pointer, 32));
    assert!(!c.is_interacting());

    c.on_resize(1200.0);
    run_until_idle(&mut c, 48);
    assert_close(c.carousel().virtual_index().unwrap(), 10.0);
    assert!(c.on_drag_start(InputKind::Pointer, 64));
}

#[test]
fn refused_drag_start_keeps_the_active_gesture() {
    let mut c = desktop(8);
    assert!(c.on_drag_start(InputKind::Pointer, 0));
    assert!(c.on_drag_move(-100.0, 16));
    assert!(!c.on_drag_start(InputKind::Touch, 32));
    assert_eq!(c.carousel().drag_session().unwrap().input, InputKind::Pointer);

    let target = c.on_drag_end(48, Some(0.0)).unwrap();
    assert_eq!(target.index, 8);
    run_until_idle(&mut c, 48);
}

#[test]
fn release_without_velocity_lands_on_nearest_card() {
    let mut c = desktop(8);
    assert!(c.on_drag_start(InputKind::Pointer, 0));
    assert!(c.on_drag_move(362.0, 16));
    let target = c.on_drag_end(32, Some(0.0)).unwrap();
    assert_eq!(target.index, 7);
    assert!(c.is_interacting());

    run_until_idle(&mut c, 32);
    assert_close(c.carousel().position(), -2114.0);
    assert!(!c.is_interacting());
}

#[test]
fn tracked_flick_biases_toward_travel_direction() {
    let mut c = desktop(8);
    assert!(c.on_drag_start(InputKind::Pointer, 0));
    for frame in 1..=5u64 {
        assert!(c.on_drag_move(-30.0, frame * 16));
    }
    let target = c.on_drag_end(80, None).unwrap();
    assert!(target.swiped);
    assert_close(target.velocity, -1875.0);
    assert_eq!(target.index, 9);

    run_until_idle(&mut c, 80);
    assert_eq!(c.carousel().centered_index(), Some(9));
    let layout = c.carousel().layout().unwrap();
    assert_close(c.carousel().position(), layout.position_for(9.0));
}

#[test]
fn slow_release_after_a_pause_does_not_swipe() {
    let mut c = desktop(8);
    assert!(c.on_drag_start(InputKind::Touch, 0));
    assert!(c.on_drag_move(-100.0, 16));
    assert!(c.on_drag_move(-100.0, 32));
    let target = c.on_drag_end(500, None).unwrap();
    assert!(!target.swiped);
    assert_eq!(target.index, 9);
}

#[test]
fn settle_outside_band_folds_on_completion() {
    let mut c = desktop(8);
    c.snap_to_index(2, InputKind::Pointer, 0).unwrap();
    run_until_idle(&mut c, 0);
    assert_close(c.carousel().virtual_index().unwrap(), 10.0);
    assert_eq!(c.carousel().centered_original_index(), Some(2));
}

#[test]
fn settle_frames_move_monotonically_toward_a_near_target() {
    let mut c = desktop(8);
    c.snap_to_index(9, InputKind::Touch, 0).unwrap();
    let start = c.carousel().position();
    let mut last = start;
    let mut now_ms = 0;
    while let Some(position) = c.tick(now_ms + 16) {
        now_ms += 16;
        assert!(position <= last + 1.0, "{position} moved away from target");
        last = position;
    }
    assert_close(c.carousel().position(), start - 362.0);
}

#[test]
fn drag_interrupts_settle() {
    let mut c = desktop(8);
    c.snap_to_index(12, InputKind::Pointer, 0).unwrap();
    c.tick(16);
    c.tick(32);
    assert!(c.is_animating());

    assert!(c.on_drag_start(InputKind::Touch, 40));
    assert!(!c.is_animating());
    assert!(c.carousel().is_dragging());
    assert!(c.tick(56).is_none());
}

#[test]
fn tap_is_ignored_while_dragging_and_retargets_while_settling() {
    let mut c = desktop(8);
    assert!(c.on_drag_start(InputKind::Pointer, 0));
    assert!(c.on_card_tap(3, InputKind::Pointer, 8).is_none());
    c.on_drag_end(16, Some(0.0)).unwrap();
    run_until_idle(&mut c, 16);

    c.snap_to_index(12, InputKind::Pointer, 100).unwrap();
    c.tick(116);
    let target = c.on_card_tap(10, InputKind::Pointer, 120).unwrap();
    assert_eq!(target.index, 10);
    run_until_idle(&mut c, 120);
    assert_eq!(c.carousel().centered_index(), Some(10));
}

#[test]
fn next_and_previous_animate_one_card() {
    let mut c = desktop(8);
    c.next(InputKind::Pointer, 0).unwrap();
    let now = run_until_idle(&mut c, 0);
    assert_eq!(c.carousel().centered_index(), Some(9));

    c.previous(InputKind::Pointer, now).unwrap();
    c.previous(InputKind::Pointer, now).unwrap();
    run_until_idle(&mut c, now);
    assert_eq!(c.carousel().centered_index(), Some(7));
}

#[test]
fn resize_during_settle_keeps_the_target_card() {
    let mut c = desktop(8);
    c.snap_to_index(10, InputKind::Pointer, 0).unwrap();
    c.tick(16);
    c.tick(32);
    c.on_resize(375.0);

    let target = c.carousel().settle_target().unwrap();
    assert_close(target.position, 129.0 - 10.0 * 119.0);
    assert_close(c.spring().unwrap().target, target.position);

    run_until_idle(&mut c, 32);
    assert_close(c.carousel().position(), 129.0 - 10.0 * 119.0);
}

#[test]
fn cancelled_gesture_settles_on_nearest() {
    let mut c = desktop(8);
    assert!(c.on_drag_start(InputKind::Pointer, 0));
    for frame in 1..=4u64 {
        c.on_drag_move(-60.0, frame * 16);
    }
    let target = c.on_drag_cancel(64).unwrap();
    assert!(!target.swiped);
    assert_eq!(target.index, 9);
    run_until_idle(&mut c, 64);
}

#[test]
fn cancel_animation_stops_in_place_and_folds() {
    let mut c = desktop(8);
    c.snap_to_index(1, InputKind::Pointer, 0).unwrap();
    for t in 1..=10u64 {
        c.tick(t * 16);
    }
    c.cancel_animation();
    assert!(!c.is_animating());
    let index = c.carousel().virtual_index().unwrap();
    let (low, high) = carousel::fold_band(8);
    assert!((low..=high).contains(&index));
}

#[test]
fn empty_controller_ignores_gestures() {
    let mut c = desktop(0);
    assert!(!c.on_drag_start(InputKind::Pointer, 0));
    assert!(!c.on_drag_move(10.0, 16));
    assert!(c.on_drag_end(32, None).is_none());
    assert!(c.on_card_tap(0, InputKind::Pointer, 40).is_none());
    assert!(c.tick(48).is_none());
}

#[test]
fn spring_settles_with_negligible_overshoot() {
    let mut spring = Spring::new(0.0, 362.0, 0.0, SpringConfig::new(300.0, 30.0), 0);
    let mut max = 0.0_f64;
    let mut now_ms = 0;
    while !spring.is_at_rest() && now_ms < 3000 {
        now_ms += 16;
        max = max.max(spring.sample(now_ms));
    }
    assert!(spring.is_at_rest(), "spring still moving after {now_ms}ms");
    assert!(max < 362.0 + 5.0, "overshoot {max}");
    assert_close(spring.position, 362.0);
}

#[test]
fn spring_carries_release_velocity() {
    let mut spring = Spring::new(0.0, 0.0, -600.0, SpringConfig::new(300.0, 30.0), 0);
    assert!(!spring.is_at_rest());
    assert!(spring.sample(16) < 0.0);
}

#[test]
fn spring_at_target_is_immediately_at_rest() {
    let spring = Spring::new(5.0, 5.2, 1.0, SpringConfig::new(300.0, 30.0), 0);
    assert!(spring.is_at_rest());
    assert_close(spring.position, 5.2);
}

#[test]
fn long_frame_gaps_are_capped() {
    let mut spring = Spring::new(0.0, 1000.0, 0.0, SpringConfig::new(400.0, 40.0), 0);
    let p = spring.sample(10_000);
    assert!(p.is_finite());
    assert!(p > 0.0 && p < 1000.0 + 50.0);
}

#[test]
fn velocity_tracker_window_and_clamp() {
    let mut t = VelocityTracker::default();
    t.record(0, 0.0);
    t.record(16, 10.0);
    assert_close(t.velocity(16), 625.0);
    assert_close(t.velocity(500), 0.0);

    t.reset();
    t.record(0, 0.0);
    t.record(1, 1000.0);
    assert_close(t.velocity(1), MAX_FLING_VELOCITY);

    t.reset();
    t.record(10, 0.0);
    assert_close(t.velocity(10), 0.0);
}
