// Host-side tests for pointer normalization and tracking.

use backdrop_core::*;
use glam::Vec2;

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn normalize_flips_y() {
    let rect = ContainerRect::new(100.0, 50.0, 200.0, 100.0);
    assert!(approx(rect.normalize(Vec2::new(200.0, 100.0)).unwrap(), Vec2::new(0.5, 0.5)));
    assert!(approx(rect.normalize(Vec2::new(100.0, 150.0)).unwrap(), Vec2::new(0.0, 0.0)));
    assert!(approx(rect.normalize(Vec2::new(300.0, 50.0)).unwrap(), Vec2::new(1.0, 1.0)));
}

#[test]
fn empty_rect_is_ignored() {
    let rect = ContainerRect::new(0.0, 0.0, 0.0, 100.0);
    assert_eq!(rect.normalize(Vec2::new(10.0, 10.0)), None);

    let mut tracker = PointerTracker::new(1.5);
    tracker.on_move(Vec2::new(10.0, 10.0), rect);
    assert!(tracker.is_at_rest());
}

#[test]
fn tracker_starts_at_rest() {
    let tracker = PointerTracker::new(1.5);
    assert!(tracker.is_at_rest());
    assert_eq!(tracker.position, Vec2::new(0.5, 0.5));
    assert_eq!(tracker.smoothing, 0.1);
}

#[test]
fn move_updates_velocity_and_target() {
    let rect = ContainerRect::new(0.0, 0.0, 100.0, 100.0);
    let mut tracker = PointerTracker::new(2.0);
    tracker.on_move(Vec2::new(60.0, 50.0), rect);

    assert!(approx(tracker.position, Vec2::new(0.6, 0.5)));
    assert!(approx(tracker.previous, tracker.position));
    assert!(approx(tracker.velocity, Vec2::new(0.2, 0.0)));
    assert!(approx(tracker.target, Vec2::new(0.2, 0.0)));

    tracker.on_move(Vec2::new(60.0, 40.0), rect);
    assert!(approx(tracker.velocity, Vec2::new(0.0, 0.2)));
}

#[test]
fn repeated_moves_to_same_point_stop_the_pointer() {
    let rect = ContainerRect::new(0.0, 0.0, 100.0, 100.0);
    let mut tracker = PointerTracker::new(1.5);
    tracker.on_move(Vec2::new(70.0, 50.0), rect);
    assert_ne!(tracker.velocity, Vec2::ZERO);

    for _ in 0..3 {
        tracker.on_move(Vec2::new(70.0, 50.0), rect);
        assert_eq!(tracker.velocity, Vec2::ZERO);
    }
    assert!(approx(tracker.position, Vec2::new(0.7, 0.5)));
}

#[test]
fn leave_resets_to_rest() {
    let rect = ContainerRect::new(0.0, 0.0, 100.0, 100.0);
    let mut tracker = PointerTracker::new(1.5);
    tracker.on_move(Vec2::new(10.0, 90.0), rect);
    tracker.on_leave();
    assert!(tracker.is_at_rest());
    assert_eq!(tracker.force, 1.5);
}
